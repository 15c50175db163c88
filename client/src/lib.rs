//! Typed client for the attendance service: session attendance marking,
//! student punch-in/punch-out and punch history.

pub mod api;
pub mod config;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
