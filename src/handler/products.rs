//! Product route handlers
//!
//! Each handler checks its method, performs one store operation and encodes the
//! result. Errors are returned as `ApiError` and rendered by the router.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::error::Error as StdError;

use crate::config::AppState;
use crate::http::{self, ApiError};
use crate::logger;
use crate::store::{Product, ProductUpdate};

type HandlerResult = Result<Response<Full<Bytes>>, ApiError>;

fn ensure_method<B>(req: &Request<B>, expected: Method) -> Result<(), ApiError> {
    if *req.method() == expected {
        Ok(())
    } else {
        Err(ApiError::MethodNotAllowed { allow: expected })
    }
}

/// `/` and every unmatched path, any method
pub fn server_status() -> Response<Full<Bytes>> {
    http::message_response(StatusCode::OK, "Server Is Running")
}

/// GET `/get-products`: every product, in no particular order
pub fn get_products<B>(req: &Request<B>, state: &AppState) -> HandlerResult {
    ensure_method(req, Method::GET)?;
    let products = state.store.list_all();
    http::json_response(StatusCode::OK, &products)
}

/// POST `/add-product`: insert or overwrite by the body's id
pub async fn add_product<B>(req: Request<B>, state: &AppState) -> HandlerResult
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    ensure_method(&req, Method::POST)?;
    let product: Product = http::read_json(req.into_body(), state.config.http.max_body_size).await?;

    logger::log_debug(&format!("Storing product {}", product.id));
    state.store.put(product);
    Ok(http::message_response(StatusCode::OK, "Product added successfully"))
}

/// GET `/get-product?id=`
pub fn get_product<B>(req: &Request<B>, state: &AppState) -> HandlerResult {
    ensure_method(req, Method::GET)?;
    let id = http::require_id(req.uri())?;
    let product = state.store.get(&id).ok_or_else(ApiError::product_not_found)?;
    http::json_response(StatusCode::OK, &product)
}

/// DELETE `/delete-product?id=`: responds with the removed product
pub fn delete_product<B>(req: &Request<B>, state: &AppState) -> HandlerResult {
    ensure_method(req, Method::DELETE)?;
    let id = http::require_id(req.uri())?;
    let product = state.store.delete(&id).ok_or_else(ApiError::product_not_found)?;

    logger::log_debug(&format!("Deleted product {id}"));
    http::json_response(StatusCode::OK, &product)
}

/// PUT `/update-product?id=`: replaces name and price only
///
/// The id is validated against the store before the body is read, so an unknown
/// id is reported even when the body is malformed.
pub async fn update_product<B>(req: Request<B>, state: &AppState) -> HandlerResult
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    ensure_method(&req, Method::PUT)?;
    let id = http::require_id(req.uri())?;
    if state.store.get(&id).is_none() {
        return Err(ApiError::product_not_found());
    }

    let update: ProductUpdate =
        http::read_json(req.into_body(), state.config.http.max_body_size).await?;

    // Deleted by a concurrent request while the body was in flight
    let product = state
        .store
        .update(&id, update)
        .ok_or_else(ApiError::product_not_found)?;

    logger::log_debug(&format!("Updated product {id}"));
    http::json_response(StatusCode::OK, &product)
}
