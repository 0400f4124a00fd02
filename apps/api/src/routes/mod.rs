pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers as generation;
use crate::state::AppState;
use crate::users::handlers as users;
use crate::voice::handlers as voice;

async fn route_not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalogs
        .route("/api/v1/channels", get(generation::handle_channels))
        .route("/api/v1/voice/presets", get(voice::handle_presets))
        // Voice analysis
        .route("/api/v1/voice/analyze", post(voice::handle_analyze))
        // Copy generation
        .route("/api/v1/copy/generate", post(generation::handle_generate))
        .route(
            "/api/v1/copy/generate/batch",
            post(generation::handle_generate_batch),
        )
        // API keys
        .route(
            "/api/v1/user/api-key",
            get(users::handle_get_api_key)
                .post(users::handle_save_api_key)
                .delete(users::handle_delete_api_key),
        )
        .route("/api/v1/test-api-key", post(users::handle_test_api_key))
        .fallback(route_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::USER_ID_HEADER;
    use crate::config::Config;

    /// Router over a pool that never connects. Only routes that skip the
    /// database can be exercised here.
    fn app(allow_anonymous_demo: bool) -> Router {
        let config = Config {
            database_url: "postgres://localhost/voicecopy_test".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            allow_anonymous_demo,
            db_max_connections: 1,
        };
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        build_router(AppState::new(db, config).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn generate_body() -> Value {
        json!({
            "prompt": "Weekend restock",
            "channel": "twitter",
            "voiceMatrix": {"directness": 0.4, "authority": 0.2}
        })
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(false), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let request = Request::builder().uri("/api/v1/nope").body(Body::empty()).unwrap();
        let (status, body) = send(app(false), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_channels_catalog() {
        let request = Request::builder()
            .uri("/api/v1/channels")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(false), request).await;
        assert_eq!(status, StatusCode::OK);
        let channels = body["channels"].as_array().unwrap();
        assert_eq!(channels.len(), 9);
        assert_eq!(channels[3]["id"], "twitter");
        assert_eq!(channels[3]["characterLimit"], 280);
    }

    #[tokio::test]
    async fn test_presets() {
        let request = Request::builder()
            .uri("/api/v1/voice/presets")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(false), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["presets"][0]["name"], "editorial");
        assert!(body["presets"][0]["voiceMatrix"]["expressiveCandid"].is_number());
    }

    #[tokio::test]
    async fn test_generate_requires_user_when_demo_disabled() {
        let (status, body) = send(app(false), post_json("/api/v1/copy/generate", generate_body())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_anonymous_invalid_body_is_unauthorized_not_bad_request() {
        let (status, body) = send(
            app(false),
            post_json("/api/v1/copy/generate", json!({"voiceMatrix": {"tension": 2}})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = send(
            app(false),
            post_json("/api/v1/copy/generate/batch", json!({"channels": []})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_user_header_is_rejected() {
        let mut request = post_json("/api/v1/copy/generate", generate_body());
        request
            .headers_mut()
            .insert(USER_ID_HEADER, "nope".parse().unwrap());
        let (status, _) = send(app(true), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_generate_validation_errors_list_fields() {
        let (status, body) = send(
            app(true),
            post_json("/api/v1/copy/generate", json!({"voiceMatrix": {"tension": 2}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
        let fields: Vec<_> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["prompt", "channel", "voiceMatrix.tension"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/copy/generate")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(true), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert_eq!(body["details"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_anonymous_demo_generation() {
        let (status, body) = send(app(true), post_json("/api/v1/copy/generate", generate_body())).await;
        assert_eq!(status, StatusCode::OK);
        let content = body["content"].as_str().unwrap();
        assert!(content.contains("Weekend restock"));
        assert!(content.chars().count() <= 280);
        assert_eq!(body["characterCount"], content.chars().count());
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_anonymous_demo_batch() {
        let (status, body) = send(
            app(true),
            post_json(
                "/api/v1/copy/generate/batch",
                json!({
                    "prompt": "Weekend restock",
                    "channels": ["twitter", "carrier-pigeon"]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["variant"], "default");
        assert_eq!(results[1]["content"], "Error: Unknown channel: carrier-pigeon");
    }

    #[tokio::test]
    async fn test_anonymous_api_key_lookup_is_null() {
        let request = Request::builder()
            .uri("/api/v1/user/api-key")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(false), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"apiKey": null}));
    }

    #[tokio::test]
    async fn test_saving_a_key_requires_user() {
        let (status, _) = send(
            app(true),
            post_json("/api/v1/user/api-key", json!({"apiKey": "AIzaSomething"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_placeholder_key_tests_invalid_without_network() {
        let (status, body) = send(
            app(false),
            post_json("/api/v1/test-api-key", json!({"apiKey": "demo-key"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"valid": false}));
    }

    #[tokio::test]
    async fn test_voice_analyze() {
        let (status, body) = send(
            app(false),
            post_json(
                "/api/v1/voice/analyze",
                json!({
                    "content": "We definitely deliver. Our proven process works.",
                    "voiceMatrix": {"authority": 0.8}
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let score = body["consistencyScore"].as_u64().unwrap();
        assert!(score <= 100);
        assert_eq!(body["analysis"]["voiceMatrix"]["authority"], 0.8);
        assert!(body["analysis"]["timestamp"].is_string());
    }
}
