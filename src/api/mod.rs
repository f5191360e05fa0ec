//! Authenticated access to the session analysis API
//!
//! This module provides the request gateway every other component goes through:
//! - Bearer token attachment from an injected `TokenProvider`
//! - JSON / multipart content-type handling
//! - Normalization of error bodies into a single `ApiError`

mod auth;
mod error;
mod gateway;

pub use auth::{StaticToken, TokenProvider};
pub use error::ApiError;
pub use gateway::{error_message, ApiGateway, RequestBody};
