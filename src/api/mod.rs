//! API Module
//!
//! HTTP handlers and routing that expose the cache as a JSON service.
//! See [`create_router`] for the endpoint list.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
