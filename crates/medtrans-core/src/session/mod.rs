//! Session bookkeeping - rate-limit windows and conversation context.
//!
//! Everything here mutates a `Session` value in place; loading and saving it
//! is the caller's job via the `SessionStore` port.

mod context;
mod rate_limit;

pub use context::MAX_CONTEXT_EXCHANGES;
pub use rate_limit::{RateLimitDecision, RateLimitPolicy};
