//! reqwest implementation of the SmartDay backend API ports.
//!
//! [`BackendClient`] implements every port trait from
//! `smartday_core::backend` against the HTTP contract of the SmartDay
//! backend. Non-success statuses are mapped to typed errors carrying the
//! backend's `message`/`detail` body fields so the UI can surface them.

mod auth;
mod chat;
mod client;
mod error;
mod map;
mod preferences;

pub use client::BackendClient;
pub use error::BackendError;
