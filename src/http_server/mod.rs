//! # HTTP Server
//!
//! Read-only query API over the in-memory portfolio store.

pub mod config;
pub mod property_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use property_routes::{property_routes, PropertyState};
pub use server::HttpServer;
