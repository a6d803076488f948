//! Custom extractors for Axum handlers.
//!
//! All extractors reject with [`crate::errors::AppError`], so failures share
//! the standard error body.

pub mod id_path;
pub mod query;
pub mod validated_json;

pub use id_path::IdPath;
pub use query::QueryParams;
pub use validated_json::{JsonBody, ValidatedJson};
