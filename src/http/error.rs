//! Request error kinds and their HTTP mapping

use hyper::{Method, StatusCode};
use thiserror::Error;

/// Everything a handler can fail with; each kind maps to exactly one status code
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid method")]
    MethodNotAllowed { allow: Method },

    /// Missing or unknown id, unreadable body
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Error while parsing JSON")]
    Decode(#[source] serde_json::Error),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Error while encoding JSON")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub const fn invalid_id() -> Self {
        Self::BadRequest("Invalid ID")
    }

    pub const fn product_not_found() -> Self {
        Self::BadRequest("Product not found")
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let decode = serde_json::from_str::<u8>("{").unwrap_err();
        assert_eq!(
            ApiError::MethodNotAllowed { allow: Method::GET }.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::invalid_id().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Decode(decode).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::invalid_id().to_string(), "Invalid ID");
        assert_eq!(ApiError::product_not_found().to_string(), "Product not found");
        assert_eq!(
            ApiError::MethodNotAllowed { allow: Method::PUT }.to_string(),
            "Invalid method"
        );
    }
}
