//! Judge queue and worker pool
//!
//! Submissions are judged off a bounded mpsc channel by a small pool of
//! workers, so a burst of submissions backpressures producers instead of
//! spawning one task per submission.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::JudgeService;
use crate::state::AppState;

/// Producer half of the judge queue. Cheap to clone.
#[derive(Clone)]
pub struct JudgeQueue {
    tx: mpsc::Sender<Uuid>,
}

impl JudgeQueue {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Uuid>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Enqueue a submission for judging. Waits when the queue is full.
    pub async fn enqueue(&self, submission_id: Uuid) -> AppResult<()> {
        self.tx
            .send(submission_id)
            .await
            .map_err(|_| AppError::QueueClosed)
    }
}

/// Spawn `count` workers draining `receiver`. Workers run until the queue
/// is closed and every pending submission has been judged.
pub fn spawn_workers(
    state: AppState,
    receiver: mpsc::Receiver<Uuid>,
    count: usize,
) -> Vec<JoinHandle<()>> {
    let receiver = Arc::new(Mutex::new(receiver));

    (0..count)
        .map(|worker| {
            let state = state.clone();
            let receiver = Arc::clone(&receiver);
            tokio::spawn(async move {
                loop {
                    // Lock only long enough to take one id, so the other
                    // workers can drain the queue while this one judges.
                    let next = { receiver.lock().await.recv().await };
                    match next {
                        Some(submission_id) => {
                            tracing::info!(worker, %submission_id, "picked up submission");
                            JudgeService::judge(&state, submission_id).await;
                        }
                        None => {
                            tracing::info!(worker, "judge queue closed, worker stopping");
                            break;
                        }
                    }
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueue_fails_once_receiver_is_dropped() {
        let (queue, rx) = JudgeQueue::new(4);
        drop(rx);

        let err = queue.enqueue(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::QueueClosed));
    }

    #[tokio::test]
    async fn queue_preserves_submission_order() {
        let (queue, mut rx) = JudgeQueue::new(4);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        queue.enqueue(first).await.unwrap();
        queue.enqueue(second).await.unwrap();

        assert_eq!(rx.recv().await, Some(first));
        assert_eq!(rx.recv().await, Some(second));
    }
}
