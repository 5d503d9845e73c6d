// routes/mod.rs — Router assembly.
//
// All endpoints sit under /api and answer with the same envelope:
// `{"message": ..., "data": ...}` on success, `{"error": ...}` on
// failure. Identity comes from the x-user-id header (see extract.rs).

pub mod crossword;
pub mod goals;
pub mod notes;
pub mod pairs;
pub mod quizzes;
pub mod sessions;
pub mod study;

use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/roadmap/goals", get(goals::list).post(goals::create))
        .route("/api/roadmap/goals/{order}", delete(goals::remove))
        .route(
            "/api/roadmap/goals/{order}/completion",
            patch(goals::set_completion),
        )
        .route("/api/notes/upload", post(notes::upload))
        .route("/api/notes", get(notes::list))
        .route("/api/notes/{note_id}", delete(notes::remove))
        .route(
            "/api/study/flashcards",
            get(study::list).post(study::create),
        )
        .route("/api/study/flashcards/batch", post(study::create_batch))
        .route("/api/study/flashcards/ai", post(study::create_from_topic))
        .route(
            "/api/study/flashcards/{id}",
            get(study::get_card).put(study::update).delete(study::remove),
        )
        .route("/api/quizzes", get(quizzes::list))
        .route("/api/puzzles/pairs", get(pairs::list))
        .route("/api/puzzles/crossword", post(crossword::generate))
        .route("/api/sessions", get(sessions::list).post(sessions::add))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// The success envelope.
pub(crate) fn envelope(message: &str, data: impl Serialize) -> Json<Value> {
    Json(json!({ "message": message, "data": data }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::tempdir;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use sp_genai::{GenError, GenerateRequest, ModelClient};

    use crate::config::{DaemonConfig, FileConfig};
    use crate::state::AppState;

    use super::router;

    struct CannedClient {
        output: String,
    }

    #[async_trait]
    impl ModelClient for CannedClient {
        async fn generate(&self, _request: GenerateRequest) -> Result<String, GenError> {
            Ok(self.output.clone())
        }
    }

    fn test_app(dir: &std::path::Path, model_output: &str) -> axum::Router {
        let config = DaemonConfig::resolve(
            dir,
            &FileConfig::default(),
            None,
            None,
            None,
            "test-key".into(),
        )
        .unwrap();
        let state = AppState::with_model(
            &config,
            Arc::new(CannedClient {
                output: model_output.to_string(),
            }),
        )
        .unwrap();
        router(state)
    }

    async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn authed(method: &str, uri: &str, user: Uuid, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-user-id", user.to_string());
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn health_is_open() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn missing_user_header_is_unauthorized() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let request = Request::builder()
            .uri("/api/roadmap/goals")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].as_str().unwrap().contains("x-user-id"));
    }

    #[tokio::test]
    async fn goal_create_list_delete_flow() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();

        let (status, _) = send(
            &app,
            authed(
                "POST",
                "/api/roadmap/goals",
                user,
                Some(json!({"order": 1, "title": "Learn Rust", "brief": "Ownership first"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            authed(
                "POST",
                "/api/roadmap/goals",
                user,
                Some(json!({"order": 1, "title": "Read book", "brief": "Chapter one"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, authed("GET", "/api/roadmap/goals", user, None)).await;
        assert_eq!(status, StatusCode::OK);
        let goals = body["data"].as_array().unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0]["title"], "Read book");
        assert_eq!(goals[0]["order"], 1);
        assert!(goals[0].get("user_id").is_none());

        let (status, _) = send(&app, authed("DELETE", "/api/roadmap/goals/1", user, None)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, authed("GET", "/api/roadmap/goals", user, None)).await;
        assert_eq!(status, StatusCode::OK);
        let goals = body["data"].as_array().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0]["order"], 1);
    }

    #[tokio::test]
    async fn goal_validation_and_contract_codes() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();

        // order 0 → 400
        let (status, _) = send(
            &app,
            authed(
                "POST",
                "/api/roadmap/goals",
                user,
                Some(json!({"order": 0, "title": "T", "brief": "B"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // delete a missing order → 404
        let (status, _) = send(&app, authed("DELETE", "/api/roadmap/goals/5", user, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // 21st goal → 409
        for i in 1..=20 {
            let (status, _) = send(
                &app,
                authed(
                    "POST",
                    "/api/roadmap/goals",
                    user,
                    Some(json!({"order": i, "title": format!("G{i}"), "brief": "b"})),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (status, body) = send(
            &app,
            authed(
                "POST",
                "/api/roadmap/goals",
                user,
                Some(json!({"order": 1, "title": "Too many", "brief": "b"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("limit"));
    }

    #[tokio::test]
    async fn completion_cascade_over_http() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();

        for i in 1..=3 {
            send(
                &app,
                authed(
                    "POST",
                    "/api/roadmap/goals",
                    user,
                    Some(json!({"order": i, "title": format!("G{i}"), "brief": "b"})),
                ),
            )
            .await;
        }
        for i in 1..=3 {
            let (status, _) = send(
                &app,
                authed(
                    "PATCH",
                    &format!("/api/roadmap/goals/{i}/completion"),
                    user,
                    Some(json!({"completed": true})),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        // Un-complete order 2: order 3 must cascade to incomplete.
        let (status, _) = send(
            &app,
            authed(
                "PATCH",
                "/api/roadmap/goals/2/completion",
                user,
                Some(json!({"completed": false})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, authed("GET", "/api/roadmap/goals", user, None)).await;
        let flags: Vec<bool> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["completed"].as_bool().unwrap())
            .collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[tokio::test]
    async fn flashcard_crud_flow() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();

        let (status, body) = send(
            &app,
            authed(
                "POST",
                "/api/study/flashcards",
                user,
                Some(json!({"front": "Q", "back": "A", "section": "bio"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            authed("GET", "/api/study/flashcards?section=bio", user, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            authed(
                "PUT",
                &format!("/api/study/flashcards/{id}"),
                user,
                Some(json!({"back": "A2"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["back"], "A2");

        let (status, _) = send(
            &app,
            authed("DELETE", &format!("/api/study/flashcards/{id}"), user, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            authed("GET", &format!("/api/study/flashcards/{id}"), user, None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ai_flashcards_require_topic() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), r#"[{"front": "Q", "back": "A"}]"#);
        let user = Uuid::new_v4();

        let (status, _) = send(
            &app,
            authed(
                "POST",
                "/api/study/flashcards/ai",
                user,
                Some(json!({"topic": "  "})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            authed(
                "POST",
                "/api/study/flashcards/ai",
                user,
                Some(json!({"topic": "osmosis", "count": 1, "section": "bio"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["section"], "bio");
    }

    #[tokio::test]
    async fn sessions_number_per_section() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();
        let today = chrono::Utc::now().date_naive().to_string();

        for _ in 0..2 {
            let (status, _) = send(
                &app,
                authed(
                    "POST",
                    "/api/sessions",
                    user,
                    Some(json!({"section": "bio", "total": 10, "correct": 7, "completed_at": today})),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, authed("GET", "/api/sessions", user, None)).await;
        assert_eq!(status, StatusCode::OK);
        let numbers: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["number"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn session_validation_is_bad_request() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();
        let today = chrono::Utc::now().date_naive().to_string();

        let (status, _) = send(
            &app,
            authed(
                "POST",
                "/api/sessions",
                user,
                Some(json!({"section": "bio", "total": 5, "correct": 9, "completed_at": today})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_registers_note_and_reports_status() {
        let dir = tempdir().unwrap();
        // An empty suggestion array satisfies every section; this test
        // pins the route contract, not the generation outcome.
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();

        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; filename=\"week1.pdf\"\r\ncontent-type: application/pdf\r\n\r\nlecture notes\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/notes/upload")
            .header("x-user-id", user.to_string())
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["data"]["filename"], "week1.pdf");
        assert_eq!(body["data"]["status"]["goals"], "generating");

        let (status, body) = send(&app, authed("GET", "/api/notes", user, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_upload_is_rejected() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "[]");
        let user = Uuid::new_v4();

        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; filename=\"a.pdf\"\r\n\r\nsame bytes\r\n--{boundary}--\r\n"
        );
        let make_request = || {
            Request::builder()
                .method("POST")
                .uri("/api/notes/upload")
                .header("x-user-id", user.to_string())
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body.clone()))
                .unwrap()
        };

        let (status, _) = send(&app, make_request()).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let (status, body) = send(&app, make_request()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("already"));
    }

    #[tokio::test]
    async fn crossword_bad_model_output_is_bad_gateway() {
        let dir = tempdir().unwrap();
        let app = test_app(dir.path(), "not json at all");
        let user = Uuid::new_v4();

        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; filename=\"terms.pdf\"\r\n\r\nglossary\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/puzzles/crossword")
            .header("x-user-id", user.to_string())
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
