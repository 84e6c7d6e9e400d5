//! File-backed persistence for the SmartDay client.
//!
//! Implements the core storage ports against small files under the platform
//! config directory: the signed-in session record, the per-user preference
//! value, and the client configuration.

pub mod config_service;
pub mod paths;
pub mod preference_store;
pub mod session_store;

pub use config_service::{load_config, load_config_from};
pub use paths::SmartdayPaths;
pub use preference_store::FilePreferenceStore;
pub use session_store::JsonSessionStore;
