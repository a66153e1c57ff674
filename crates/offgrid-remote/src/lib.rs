//! Remote artifact size lookup for offgrid.
//!
//! Budgeting needs the byte size of user-supplied remote URLs before anything
//! is downloaded. This crate issues the metadata-only HEAD request and wraps
//! it in an explicit timeout and a bounded retry policy; the budgeting
//! pipeline stays agnostic to the policy and only sees the two outcomes
//! (size obtained, or failure). A failed lookup is never replaced by an
//! estimated size.

pub mod head;

pub use head::{LookupPolicy, SizeLookup};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport-level failure or an HTTP status worth retrying (429, 5xx).
    /// Retried up to the policy's attempt budget before surfacing.
    #[error("transient lookup failure for {url}: {reason}")]
    Transient { url: String, reason: String },
    /// Definitive HTTP failure (4xx other than 429). Never retried.
    #[error("HTTP {status} for HEAD {url}")]
    Http { url: String, status: u16 },
    /// The response carried no usable Content-Length header.
    #[error("no Content-Length for {0}")]
    MissingLength(String),
}
