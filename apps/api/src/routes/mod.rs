pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout;

    Router::new()
        .route("/health", get(health::health_handler))
        // Wizard steps 2-4
        .route(
            "/api/project-plan/generate",
            post(handlers::handle_generate_plan),
        )
        .route(
            "/api/feasibility/generate",
            post(handlers::handle_generate_feasibility),
        )
        .route("/api/rfp/generate", post(handlers::handle_generate_rfp))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::generation::dispatcher::stubs::FixedRemote;
    use crate::generation::feasibility::score_feasibility;
    use crate::generation::plan::{synthesize_plan, PlanDefaults};
    use crate::llm_client::{DisabledRemote, RemoteGenerationError, RemoteGenerator};
    use crate::models::requirement::fixtures::{bare_requirement, requirement};

    fn app_with(remote: Arc<dyn RemoteGenerator>) -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        build_router(AppState { remote, config })
    }

    fn app() -> Router {
        app_with(Arc::new(DisabledRemote))
    }

    async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_disabled_remote() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["remoteGeneration"], "disabled");
    }

    #[tokio::test]
    async fn test_plan_endpoint_falls_back_without_remote() {
        let body = serde_json::to_string(&bare_requirement()).unwrap();
        let (status, json) = post_json(app(), "/api/project-plan/generate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["usedFallback"], true);
        assert_eq!(json["data"]["milestones"].as_array().unwrap().len(), 4);
        assert_eq!(json["data"]["projectName"], "Clinic Booking Portal");
    }

    #[tokio::test]
    async fn test_plan_endpoint_returns_remote_plan() {
        let remote_plan = synthesize_plan(&requirement(), &PlanDefaults::default());
        let mut remote_json = serde_json::to_value(&remote_plan).unwrap();
        remote_json["projectType"] = json!("Mobile App");
        let app = app_with(Arc::new(FixedRemote(remote_json)));

        let body = serde_json::to_string(&requirement()).unwrap();
        let (status, json) = post_json(app, "/api/project-plan/generate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["usedFallback"], false);
        assert_eq!(json["data"]["projectType"], "Mobile App");
    }

    #[tokio::test]
    async fn test_feasibility_endpoint() {
        let req = requirement();
        let plan = synthesize_plan(&req, &PlanDefaults::default());
        let body = json!({"projectRequirement": req, "projectPlan": plan}).to_string();
        let (status, json) = post_json(app(), "/api/feasibility/generate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["usedFallback"], true);
        assert_eq!(json["data"]["overallScore"], 74);
        assert_eq!(json["data"]["financialData"]["estimatedCost"], "R750,000 - R850,000");
    }

    #[tokio::test]
    async fn test_rfp_endpoint_keeps_unknown_document_type() {
        let req = bare_requirement();
        let plan = synthesize_plan(&req, &PlanDefaults::default());
        let study = score_feasibility(&req, &plan);
        let body = json!({
            "projectRequirement": req,
            "projectPlan": plan,
            "feasibilityStudy": study,
            "documentType": "Municipal"
        })
        .to_string();
        let (status, json) = post_json(app(), "/api/rfp/generate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["usedFallback"], true);
        assert_eq!(json["data"]["documentType"], "Municipal");
        assert_eq!(json["data"]["sections"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_rfp_endpoint_defaults_to_standard() {
        let req = requirement();
        let plan = synthesize_plan(&req, &PlanDefaults::default());
        let study = score_feasibility(&req, &plan);
        let body = json!({
            "projectRequirement": req,
            "projectPlan": plan,
            "feasibilityStudy": study
        })
        .to_string();
        let (_, json) = post_json(app(), "/api/rfp/generate", body).await;
        assert_eq!(json["data"]["documentType"], "standard");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, json) =
            post_json(app(), "/api/project-plan/generate", "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_422() {
        let (status, json) = post_json(
            app(),
            "/api/feasibility/generate",
            json!({"projectRequirement": {"name": "x"}}).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    /// Hangs for the full remote timeout, then fails the way a timed-out HTTP call does.
    struct HangingRemote(Duration);

    #[async_trait]
    impl RemoteGenerator for HangingRemote {
        async fn generate(
            &self,
            _prompt: &str,
            _schema: &Value,
            _operation: &str,
        ) -> Result<Value, RemoteGenerationError> {
            tokio::time::sleep(self.0 + Duration::from_millis(1)).await;
            Err(RemoteGenerationError::Api {
                status: 504,
                message: "operation timed out".to_string(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_remote_falls_back_before_request_timeout() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(config.remote_timeout < config.request_timeout);
        let remote = Arc::new(HangingRemote(config.remote_timeout));
        let app = build_router(AppState { remote, config });

        let body = serde_json::to_string(&requirement()).unwrap();
        let (status, json) = post_json(app, "/api/project-plan/generate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["usedFallback"], true);
    }
}
