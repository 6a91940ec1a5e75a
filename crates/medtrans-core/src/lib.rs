//! # MedTrans Core
//!
//! The domain layer of the medical translation backend.
//! This crate contains session bookkeeping, validation and the ports that
//! infrastructure implements. It performs no I/O of its own.

pub mod domain;
pub mod error;
pub mod ports;
pub mod session;

pub use error::{SessionStoreError, TranslateError};
