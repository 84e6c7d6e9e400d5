//! Domain models, state machines, and ports for the SmartDay client.
//!
//! This crate holds everything the client knows independent of transport and
//! rendering: the session record, the preference selection, the view
//! navigator, the map overlay model, the chat transcript, and the trait
//! seams (backend API, stores, map surface) that the outer crates implement.

pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod map;
pub mod preference;
pub mod session;
pub mod view;

// Re-export common error type
pub use error::SmartdayError;
