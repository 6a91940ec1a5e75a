//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod session_store;
mod translator;

pub use session_store::SessionStore;
pub use translator::{ModelCatalog, Translator};
