//! Request, response and error types for the HTTP surface

pub mod check;
pub mod error;
pub mod json;

pub use check::{CheckClaimRequest, KnowledgeBaseInfo};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
