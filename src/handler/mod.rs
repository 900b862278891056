//! Request handler module
//!
//! Route dispatch plus the product CRUD handlers behind it.

pub mod products;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
