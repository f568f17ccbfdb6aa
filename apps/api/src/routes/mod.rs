pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::cv_upload::handlers as cv_upload;
use crate::employees::handlers as employees;
use crate::metrics::handlers as metrics;
use crate::state::AppState;
use crate::suggestions;

/// CVs and CSV imports are small documents; anything bigger is a mistake.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard metrics
        .route("/api/v1/metrics/dashboard", get(metrics::handle_dashboard))
        // Employees
        .route(
            "/api/v1/employees",
            get(employees::handle_list_employees).post(employees::handle_create_employee),
        )
        .route("/api/v1/employees/skills", get(employees::handle_skill_options))
        .route("/api/v1/employees/import", post(employees::handle_import_csv))
        .route(
            "/api/v1/employees/import/template",
            get(employees::handle_import_template),
        )
        .route(
            "/api/v1/employees/:id",
            get(employees::handle_get_employee)
                .put(employees::handle_update_employee)
                .delete(employees::handle_delete_employee),
        )
        // CV storage
        .route("/api/v1/cv", post(cv_upload::handle_upload_cv))
        // Suggestion workflow
        .route("/api/v1/chat", post(chat::handle_chat))
        .route("/api/v1/suggestions", get(suggestions::handle_list_suggestions))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::chat::{CandidateSuggester, WebhookError};
    use crate::config::Config;

    /// Records the forwarded payload and answers with a canned reply.
    struct FakeSuggester {
        reply: Option<String>,
        fail: bool,
        seen: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl CandidateSuggester for FakeSuggester {
        async fn suggest(&self, payload: &Value) -> Result<Option<String>, WebhookError> {
            self.seen.lock().unwrap().push(payload.clone());
            if self.fail {
                return Err(WebhookError::Status {
                    status: 500,
                    body: "workflow crashed".into(),
                });
            }
            Ok(self.reply.clone())
        }
    }

    fn fake(reply: Option<&str>, fail: bool) -> Arc<FakeSuggester> {
        Arc::new(FakeSuggester {
            reply: reply.map(String::from),
            fail,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/talent_test".into(),
            s3_bucket: "cvs-test".into(),
            s3_endpoint: "http://localhost:9000".into(),
            s3_region: "us-east-1".into(),
            aws_access_key_id: "test".into(),
            aws_secret_access_key: "test".into(),
            chat_webhook_url: "http://localhost:5678/webhook".into(),
            port: 0,
            rust_log: "debug".into(),
        }
    }

    /// Router over a lazy pool: routes that never touch the database work offline.
    fn app(suggester: Arc<FakeSuggester>) -> Router {
        let config = test_config();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .build();

        build_router(AppState {
            db,
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            config,
            suggester,
        })
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_request(field: &str, file_name: Option<&str>, content: &str) -> Request<Body> {
        let disposition = match file_name {
            Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let body = format!(
            "--XBOUNDARY\r\nContent-Disposition: {disposition}\r\n\r\n{content}\r\n--XBOUNDARY--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/cv")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(fake(None, false))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "talent-api");
    }

    #[tokio::test]
    async fn test_chat_forwards_message_and_returns_reply() {
        let suggester = fake(Some("Ana García"), false);
        let response = app(suggester.clone())
            .oneshot(json_request(
                "POST",
                "/api/v1/chat",
                json!({ "message": "React senior en Madrid" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "reply": "Ana García" }));
        assert_eq!(
            suggester.seen.lock().unwrap().as_slice(),
            &[json!({ "message": "React senior en Madrid" })]
        );
    }

    #[tokio::test]
    async fn test_chat_without_reply_text_is_null() {
        let response = app(fake(None, false))
            .oneshot(json_request("POST", "/api/v1/chat", json!({ "message": "hola" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "reply": null }));
    }

    #[tokio::test]
    async fn test_chat_webhook_failure_is_bad_gateway() {
        let response = app(fake(None, true))
            .oneshot(json_request("POST", "/api/v1/chat", json!({ "message": "hola" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Error calling webhook");
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let suggester = fake(Some("unused"), false);
        let response = app(suggester.clone())
            .oneshot(json_request("POST", "/api/v1/chat", json!({ "message": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(suggester.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_missing_message_gets_error_envelope() {
        let suggester = fake(Some("unused"), false);
        let response = app(suggester.clone())
            .oneshot(json_request("POST", "/api/v1/chat", json!({ "text": "hola" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("message"));
        assert!(suggester.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_employee_rejects_non_json_body() {
        let request = Request::post("/api/v1/employees")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app(fake(None, false)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_employee_validates_before_storage() {
        let response = app(fake(None, false))
            .oneshot(json_request(
                "POST",
                "/api/v1/employees",
                json!({ "full_name": "Jane", "seniority": "Senior", "skills": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "All required fields must be filled");
    }

    #[tokio::test]
    async fn test_import_without_valid_rows_is_rejected() {
        let request = Request::post("/api/v1/employees/import")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from("fullName,skills\n,Go\n"))
            .unwrap();
        let response = app(fake(None, false)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "CSV contains no valid rows");
    }

    #[tokio::test]
    async fn test_import_template_download() {
        let response = app(fake(None, false))
            .oneshot(
                Request::get("/api/v1/employees/import/template")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"employees_template.csv\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_cv_upload_requires_file_field() {
        let response = app(fake(None, false))
            .oneshot(multipart_request("note", None, "hello"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_cv_upload_rejects_pdf() {
        let response = app(fake(None, false))
            .oneshot(multipart_request("file", Some("jane.pdf"), "%PDF-1.7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Only CSV or DOCX files allowed");
    }

    #[tokio::test]
    async fn test_suggestions_reject_negative_page() {
        let response = app(fake(None, false))
            .oneshot(
                Request::get("/api/v1/suggestions?page=-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
