pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::coaching::handlers as coaching;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Static form and catalogue data
        .route("/api/v1/features", get(coaching::handle_list_features))
        .route(
            "/api/v1/profile/options",
            get(coaching::handle_profile_options),
        )
        .route("/api/v1/schedule", get(coaching::handle_schedule))
        .route("/api/v1/info", get(coaching::handle_info))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            put(sessions::handle_update_profile),
        )
        .route(
            "/api/v1/sessions/:id/credential",
            put(sessions::handle_set_credential),
        )
        .route(
            "/api/v1/sessions/:id/features/:feature",
            post(sessions::handle_invoke_feature),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::coaching::dispatcher::Dispatcher;
    use crate::coaching::registry::TemplateRegistry;
    use crate::llm_client::testing::StubGenerator;
    use crate::session::SessionStore;

    fn state_with(stub: Arc<StubGenerator>) -> AppState {
        AppState {
            dispatcher: Dispatcher::new(Arc::new(TemplateRegistry::load().unwrap()), stub),
            sessions: SessionStore::default(),
        }
    }

    async fn send(
        state: &AppState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_session(state: &AppState, body: Value) -> String {
        let (status, json) = send(state, Method::POST, "/api/v1/sessions", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let state = state_with(Arc::new(StubGenerator::replying("")));
        let (status, json) = send(&state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_features_catalogue() {
        let state = state_with(Arc::new(StubGenerator::replying("")));
        let (status, json) = send(&state, Method::GET, "/api/v1/features", None).await;
        assert_eq!(status, StatusCode::OK);

        let features = json.as_array().unwrap();
        assert_eq!(features.len(), 6);
        assert_eq!(features[5]["feature"], "Serve Training");
        assert_eq!(features[5]["slug"], "serve-training");
        assert_eq!(
            features[5]["placeholders"],
            json!(["name", "serve_pct", "injuries"])
        );
    }

    #[tokio::test]
    async fn test_schedule_endpoint() {
        let state = state_with(Arc::new(StubGenerator::replying("")));

        let (status, json) = send(&state, Method::GET, "/api/v1/schedule", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["columns"].as_array().unwrap().len(), 5);

        let (status, json) =
            send(&state, Method::GET, "/api/v1/schedule?injuries=Shoulder,Knee", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["columns"].as_array().unwrap().len(), 6);
        assert_eq!(json["rows"].as_array().unwrap().len(), 7);

        let (status, json) =
            send(&state, Method::GET, "/api/v1/schedule?injuries=Toe", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_info_panels() {
        let state = state_with(Arc::new(StubGenerator::replying("")));
        let (status, json) = send(&state, Method::GET, "/api/v1/info", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["disclaimer"]["title"], "Disclaimer");
        assert!(json["disclaimer"]["text"]
            .as_str()
            .unwrap()
            .contains("does NOT replace professional medical or coaching advice"));
    }

    #[tokio::test]
    async fn test_create_session_with_defaults() {
        let state = state_with(Arc::new(StubGenerator::replying("")));
        let id = create_session(&state, json!({})).await;

        let (status, json) = send(&state, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["profile"]["age"], 16);
        assert_eq!(json["profile"]["injuries"], json!(["None - Healthy"]));
        assert_eq!(json["credential_status"], "Enter API Key");
        assert!(json.get("welcome").is_none());
        assert!(json["result"].is_null());
    }

    #[tokio::test]
    async fn test_invalid_profile_rejected() {
        let state = state_with(Arc::new(StubGenerator::replying("")));

        let (status, json) = send(
            &state,
            Method::POST,
            "/api/v1/sessions",
            Some(json!({"profile": {"age": 40}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

        let id = create_session(&state, json!({})).await;
        let (status, _) = send(
            &state,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/profile"),
            Some(json!({"injuries": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(
            &state,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/profile"),
            Some(json!({"surface": "Carpet"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(json["error"]["message"].as_str().unwrap().contains("Carpet"));
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let state = state_with(Arc::new(StubGenerator::replying("")));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/sessions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"profile\": "))
            .unwrap();

        let response = build_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let state = state_with(Arc::new(StubGenerator::replying("")));
        let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());
        let (status, json) = send(&state, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invoke_without_key_returns_instruction_and_skips_call() {
        let stub = Arc::new(StubGenerator::replying("should not be used"));
        let state = state_with(stub.clone());
        let id = create_session(&state, json!({})).await;

        let (status, json) = send(
            &state,
            Method::POST,
            &format!("/api/v1/sessions/{id}/features/workout"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["feature"], "Workout");
        assert_eq!(json["text"], "Enter API Key First");
        assert_eq!(json["kind"], "missing_credential");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let stub = Arc::new(StubGenerator::replying("## Recovery plan"));
        let state = state_with(stub.clone());
        let id = create_session(
            &state,
            json!({"profile": {"name": "Alex", "level": "Advanced", "goal": "Power"}}),
        )
        .await;

        let (status, json) = send(
            &state,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/credential"),
            Some(json!({"api_key": "key-abc"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["credential_status"], "API Connected");
        assert_eq!(json["welcome"], "Welcome Alex | Level: Advanced | Goal: Power");
        assert!(!json.to_string().contains("key-abc"));

        let (status, _) = send(
            &state,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/profile"),
            Some(json!({"name": "Alex", "injuries": ["Shoulder", "Knee"], "goal": "Recovery"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, panel) = send(
            &state,
            Method::POST,
            &format!("/api/v1/sessions/{id}/features/Injury%20Recovery"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(panel["feature"], "Injury Recovery");
        assert_eq!(panel["kind"], "generated");
        assert_eq!(panel["text"], "## Recovery plan");
        assert!(panel["caption"]
            .as_str()
            .unwrap()
            .starts_with("Generated on "));
        assert_eq!(panel["schedule"]["columns"].as_array().unwrap().len(), 6);

        let (api_key, request) = stub.last_call().unwrap();
        assert_eq!(api_key, "key-abc");
        assert!(request.prompt.contains("Injuries: Shoulder, Knee"));
        assert!(request.prompt.contains("Goal: Recovery"));

        let (_, view) = send(&state, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["result"]["text"], "## Recovery plan");

        let (status, _) =
            send(&state, Method::DELETE, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&state, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_service_failure_is_reported_in_panel() {
        let stub = Arc::new(StubGenerator::failing(500, "backend unavailable"));
        let state = state_with(stub);
        let id = create_session(&state, json!({"api_key": "k"})).await;

        let (status, panel) = send(
            &state,
            Method::POST,
            &format!("/api/v1/sessions/{id}/features/tactics"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(panel["kind"], "service_error");
        assert!(panel["text"].as_str().unwrap().starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_unknown_feature_is_404() {
        let state = state_with(Arc::new(StubGenerator::replying("")));
        let id = create_session(&state, json!({})).await;
        let (status, json) = send(
            &state,
            Method::POST,
            &format!("/api/v1/sessions/{id}/features/footwork"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["message"], "Unknown coaching feature: footwork");
    }
}
