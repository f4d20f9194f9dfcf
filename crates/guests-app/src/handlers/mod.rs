//! HTTP handlers.

pub mod guest_handler;
pub mod health_handler;

pub use guest_handler::guest_routes;
pub use health_handler::health_routes;
