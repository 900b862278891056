//! JSON response building module
//!
//! Every response body is built fully in memory, then handed to hyper in one piece.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::error::ApiError;

const JSON: &str = "application/json";

/// `{"message": ...}` body shared by status and error responses
#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

/// Serialize `body` and wrap it in a response with the given status
pub fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Full<Bytes>>, ApiError> {
    let json = serde_json::to_vec(body).map_err(ApiError::Encode)?;
    Ok(build_json(status, Bytes::from(json)))
}

/// Build `{"message": message}` with the given status
pub fn message_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    // A struct holding one &str always serializes
    let json = serde_json::to_vec(&MessageBody { message })
        .unwrap_or_else(|_| br#"{"message":""}"#.to_vec());
    build_json(status, Bytes::from(json))
}

/// The single place an `ApiError` becomes a response
pub fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    let mut response = message_response(err.status(), &err.to_string());
    if let ApiError::MethodNotAllowed { allow } = err {
        if let Ok(value) = HeaderValue::from_str(allow.as_str()) {
            response.headers_mut().insert(ALLOW, value);
        }
    }
    response
}

fn build_json(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to build {status} response: {e}"));
            let mut fallback = Response::new(Full::new(body));
            *fallback.status_mut() = status;
            fallback
        })
}
