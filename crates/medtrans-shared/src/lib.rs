//! # MedTrans Shared
//!
//! Wire types exchanged with the browser client.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
