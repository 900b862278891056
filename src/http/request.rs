//! Request input extraction: query parameters and size-limited JSON bodies

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::Uri;
use serde::de::DeserializeOwned;
use std::error::Error as StdError;

use super::error::ApiError;

/// First value of `name` in the query string, percent-decoded
pub fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// The `id` query parameter, or `BadRequest` before anything else touches it
pub fn require_id(uri: &Uri) -> Result<String, ApiError> {
    query_param(uri, "id").ok_or_else(ApiError::invalid_id)
}

/// Collect at most `max_bytes` of body and decode the first JSON value in it.
///
/// Bytes after that value are left unread, so `{..} trailing` still decodes.
pub async fn read_json<T, B>(body: B, max_bytes: u64) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let limit = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let collected = Limited::new(body, limit).collect().await.map_err(|e| {
        if e.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::PayloadTooLarge
        } else {
            crate::logger::log_warning(&format!("Failed to read request body: {e}"));
            ApiError::BadRequest("Failed to read request body")
        }
    })?;

    let bytes = collected.to_bytes();
    let mut de = serde_json::Deserializer::from_slice(&bytes);
    T::deserialize(&mut de).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Product;
    use http_body_util::Full;
    use hyper::body::Bytes;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_query_param_present() {
        assert_eq!(query_param(&uri("/get-product?id=4"), "id"), Some("4".to_string()));
        assert_eq!(
            query_param(&uri("/get-product?x=1&id=a%20b&id=c"), "id"),
            Some("a b".to_string())
        );
    }

    #[test]
    fn test_query_param_absent() {
        assert_eq!(query_param(&uri("/get-product"), "id"), None);
        assert_eq!(query_param(&uri("/get-product?ids=1"), "id"), None);
    }

    #[test]
    fn test_empty_id_is_present() {
        assert_eq!(require_id(&uri("/get-product?id=")).unwrap(), "");
        assert!(matches!(
            require_id(&uri("/update-product")),
            Err(ApiError::BadRequest("Invalid ID"))
        ));
    }

    #[tokio::test]
    async fn test_read_json_ok() {
        let body = Full::new(Bytes::from(
            r#"{"id":"4","name":"Monitor","price":200,"quantity":5}"#,
        ));
        let product: Product = read_json(body, 1024).await.unwrap();
        assert_eq!(product, Product::new("4", "Monitor", 200, 5));
    }

    #[tokio::test]
    async fn test_read_json_malformed() {
        let body = Full::new(Bytes::from("{not json"));
        let result: Result<Product, _> = read_json(body, 1024).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_read_json_ignores_trailing_bytes() {
        let body = Full::new(Bytes::from(
            r#"{"id":"6","name":"Dock","price":80,"quantity":2} x"#,
        ));
        let product: Product = read_json(body, 1024).await.unwrap();
        assert_eq!(product, Product::new("6", "Dock", 80, 2));
    }

    #[tokio::test]
    async fn test_read_json_empty_body() {
        let body = Full::new(Bytes::new());
        let result: Result<Product, _> = read_json(body, 1024).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_read_json_too_large() {
        let body = Full::new(Bytes::from(vec![b' '; 64]));
        let result: Result<Product, _> = read_json(body, 16).await;
        assert!(matches!(result, Err(ApiError::PayloadTooLarge)));
    }
}
