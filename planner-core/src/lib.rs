//! planner-core: shared web infrastructure for the trip planner services.
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use tracing;
pub use validator;
