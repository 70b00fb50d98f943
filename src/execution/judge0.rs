//! HTTP client for a Judge0-compatible execution backend

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::ExecutionConfig;
use crate::error::{AppError, AppResult};

use super::{BackendStatus, ExecutionBackend, ExecutionHandle, ExecutionReport, ExecutionRequest};

/// Client for the external compile-and-run service.
///
/// Source and stdin travel base64-encoded so arbitrary program text survives
/// transport. Limits convert at this boundary: milliseconds to seconds for
/// CPU time, megabytes to kilobytes for memory.
pub struct Judge0Client {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SubmitPayload {
    source_code: String,
    language_id: u32,
    stdin: String,
    cpu_time_limit: f64,
    memory_limit: u64,
    base64_encoded: bool,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
    status: RawStatus,
    /// CPU time in seconds, as a decimal string
    time: Option<String>,
    /// Peak memory in kilobytes
    memory: Option<u64>,
}

impl Judge0Client {
    /// Build a client from execution configuration
    pub fn new(config: &ExecutionConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn decode_field(field: &Option<String>) -> String {
        field
            .as_deref()
            .map(|encoded| match BASE64.decode(encoded.trim()) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
                Err(_) => encoded.trim().to_string(),
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ExecutionBackend for Judge0Client {
    async fn submit(&self, request: ExecutionRequest) -> AppResult<ExecutionHandle> {
        let payload = SubmitPayload {
            source_code: BASE64.encode(&request.source_code),
            language_id: request.language_id,
            stdin: BASE64.encode(&request.stdin),
            cpu_time_limit: request.time_limit_ms as f64 / 1000.0,
            memory_limit: request.memory_limit_mb * 1024,
            base64_encoded: true,
        };

        let url = format!(
            "{}/submissions?base64_encoded=true&wait=false&fields=token",
            self.base_url
        );

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body: SubmitResponse = response.json().await?;
        Ok(ExecutionHandle(body.token))
    }

    async fn poll(&self, handle: &ExecutionHandle) -> AppResult<ExecutionReport> {
        let url = format!(
            "{}/submissions/{}?base64_encoded=true&fields=stdout,stderr,compile_output,status,time,memory",
            self.base_url, handle.0
        );

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let raw: RawResult = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("malformed poll response: {e}")))?;

        let time_ms = raw
            .time
            .as_deref()
            .and_then(|t| t.parse::<f64>().ok())
            .unwrap_or(0.0)
            * 1000.0;

        Ok(ExecutionReport {
            status: BackendStatus::from_code(raw.status.id),
            stdout: Self::decode_field(&raw.stdout),
            stderr: Self::decode_field(&raw.stderr),
            compile_output: Self::decode_field(&raw.compile_output),
            time_ms,
            memory_kb: raw.memory.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_field_handles_base64_and_absent_values() {
        let encoded = Some(BASE64.encode("0 1\n"));
        assert_eq!(Judge0Client::decode_field(&encoded), "0 1");
        assert_eq!(Judge0Client::decode_field(&None), "");
    }

    #[test]
    fn decode_field_falls_back_to_raw_text() {
        // Not valid base64; keep the raw text rather than dropping it
        let raw = Some("plain!output".to_string());
        assert_eq!(Judge0Client::decode_field(&raw), "plain!output");
    }

    #[test]
    fn client_normalizes_trailing_slash() {
        let config = ExecutionConfig {
            base_url: "http://judge.local/".to_string(),
            request_timeout_secs: 5,
        };
        let client = Judge0Client::new(&config).unwrap();
        assert_eq!(client.base_url, "http://judge.local");
    }
}
