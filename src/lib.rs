//! imobi - real-estate portfolio validation, query API and reporting
//!
//! The schema validation engine is the core; everything else consumes
//! its output or the loaded portfolio.

pub mod cli;
pub mod db;
pub mod http_server;
pub mod notes;
pub mod observability;
pub mod portfolio;
pub mod report;
pub mod schema;
pub mod sync;
