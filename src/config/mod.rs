//! Service configuration (TOML + env overrides).

pub mod service;

pub use service::{CatalogSection, Limits, LoggingSection, ServiceConfig};
