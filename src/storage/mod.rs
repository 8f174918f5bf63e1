//! Outbox persistence (JSONL) and seed loading.
//!
//! Committed payloads are appended one per line to `events.jsonl` or
//! `leases.jsonl`, so a commit is a single-line file append with no
//! read/rewrite.

mod error;
mod outbox;

pub use error::StorageError;
pub use outbox::{Outbox, load_seed};
