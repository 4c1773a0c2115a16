// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod devlog;
pub mod error;
pub mod metrics;
pub mod model;

// Requirement text → model, and the refinement chat on top of it
pub mod extract;
pub mod refine;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::error::ServiceError;
pub use crate::extract::{extract_model, extract_with_catalog, Catalog};
pub use crate::model::{Model, RelationshipKind, SchemaViolation};
pub use crate::refine::{refine, ChatTurn, RefineReply};
