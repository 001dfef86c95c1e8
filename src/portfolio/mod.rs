//! Portfolio subsystem
//!
//! Property records and the read-only in-memory store behind the query
//! API, the report renderers and the note generator.

pub mod errors;
pub mod store;
pub mod types;

pub use errors::{StoreError, StoreResult};
pub use store::PortfolioStore;
pub use types::{PortfolioStats, Property, PropertyFilter};
