//! HTTP protocol layer module
//!
//! JSON response builders, the request error type and request input extraction,
//! kept apart from the product handlers that use them.

pub mod error;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use error::ApiError;
pub use request::{read_json, require_id};
pub use response::{error_response, json_response, message_response};
