//! Claim check and knowledge base endpoints

use axum::extract::State;
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, CheckClaimRequest, Json, KnowledgeBaseInfo};
use crate::domain::ClaimReport;

/// `POST /v1/claims/check`
pub async fn check_claim(
    State(state): State<AppState>,
    Json(request): Json<CheckClaimRequest>,
) -> Result<Json<ClaimReport>, ApiError> {
    info!(claim_len = request.claim.len(), "Checking claim");

    let report = state
        .fact_checker
        .check_claim(&request.claim)
        .await
        .inspect_err(|e| warn!(error = %e, "Claim check failed"))?;

    Ok(Json(report))
}

/// `GET /v1/knowledge-base`
pub async fn knowledge_base(
    State(state): State<AppState>,
) -> Result<Json<KnowledgeBaseInfo>, ApiError> {
    let info = state.fact_checker.knowledge_base().await?;
    Ok(Json(info))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use super::*;
    use crate::api::state::mock::MockFactChecker;
    use crate::domain::{Judgment, RetrievalMetadata, RetrievedFact, Verdict};

    fn report() -> ClaimReport {
        let judgment: Judgment = serde_json::from_value(serde_json::json!({
            "verdict": "False",
            "reasoning": "Contradicts known fact.",
            "evidence_used": ["The sky is blue on a clear day."]
        }))
        .unwrap();

        ClaimReport::grounded(
            judgment,
            RetrievalMetadata::new(
                &[RetrievedFact::new("1", "The sky is blue on a clear day.", 0.12)],
                vec![],
            ),
        )
    }

    fn state(checker: MockFactChecker) -> (AppState, Arc<MockFactChecker>) {
        let checker = Arc::new(checker);
        (AppState::new(checker.clone()), checker)
    }

    fn body(claim: &str) -> Json<CheckClaimRequest> {
        Json(CheckClaimRequest {
            claim: claim.to_string(),
        })
    }

    #[tokio::test]
    async fn test_check_claim_returns_report() {
        let (state, checker) = state(MockFactChecker::new().with_facts(1).with_report(report()));

        let Json(result) = check_claim(State(state), body("The sky is green."))
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::False);
        assert_eq!(result.confidence_scores(), &[0.88]);
        assert_eq!(checker.claims(), vec!["The sky is green.".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_claim_is_bad_request() {
        let (state, _) = state(MockFactChecker::new().with_facts(1).with_report(report()));

        let err = check_claim(State(state), body("  ")).await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_judgment_failure_is_bad_gateway() {
        let (state, _) = state(MockFactChecker::new().with_facts(1).with_error("HTTP 500"));

        let err = check_claim(State(state), body("The sky is green.")).await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_empty_index_is_unavailable() {
        let (state, _) = state(MockFactChecker::new().with_report(report()));

        let err = check_claim(State(state), body("The sky is green.")).await.unwrap_err();

        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_knowledge_base_info() {
        let (state, _) = state(MockFactChecker::new().with_facts(5));

        let Json(info) = knowledge_base(State(state)).await.unwrap();

        assert_eq!(info.collection, "fact_check_db");
        assert_eq!(info.facts, 5);
    }
}
