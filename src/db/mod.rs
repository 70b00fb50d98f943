//! Storage collaborator
//!
//! The durable document store lives outside this crate. [`store::JudgeStore`]
//! is the narrow contract it must satisfy: atomic increments and
//! conditional updates rather than whole-document read-modify-write, so
//! concurrent judging never loses counter updates. [`memory::MemoryStore`]
//! is the in-process implementation used by tests and embedded deployments.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::JudgeStore;
