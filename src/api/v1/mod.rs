//! Versioned claim-checking endpoints

pub mod claims;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/claims/check", post(claims::check_claim))
        .route("/knowledge-base", get(claims::knowledge_base))
}
