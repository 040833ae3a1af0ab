//! REST API client module for the Wordify backend.
//!
//! This module provides the `ApiClient` for looking up definitions, managing
//! the saved collection and generating practice sentences.
//!
//! Authentication is a JWT bearer token obtained from `/auth/login` or
//! `/auth/signup` and held by the `SessionGate`.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{user_message, ApiError};
