//! HTTP surface of the backend.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod status;

pub use routes::*;
