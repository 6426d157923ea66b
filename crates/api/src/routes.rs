use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::future::join_all;
use serde::Serialize;
use tokio::time::timeout;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use extract::EntityExtractor;
use store::{DocumentGraph, DocumentSummary, GraphStore};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::pipeline::{self, UploadedDocument};

pub const MAX_UPLOAD_FILES: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GraphStore>,
    pub extractor: Arc<EntityExtractor>,
    pub config: Arc<AppConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_documents))
        .route("/documents", get(list_documents))
        .route("/graph/:doc_id", get(get_graph))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub documents: Vec<UploadedDocument>,
    pub errors: Vec<UploadFailure>,
}

#[derive(Serialize)]
pub struct UploadFailure {
    pub filename: String,
    pub error: &'static str,
    pub message: String,
}

/// Accepts up to three files, runs each through the ingestion pipeline
/// concurrently, and reports per-file outcomes. One file failing never
/// fails its siblings.
async fn upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files: Vec<(String, axum::body::Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(e.to_string()))?
    {
        // Non-file form fields are ignored.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if files.len() == MAX_UPLOAD_FILES {
            return Err(ApiError::UploadLimitExceeded {
                count: files.len() + 1,
                max: MAX_UPLOAD_FILES,
            });
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadUpload(e.to_string()))?;
        files.push((filename, data));
    }

    let tasks = files.iter().map(|(filename, data)| {
        let state = &state;
        async move {
            let outcome = timeout(
                state.config.file_timeout(),
                pipeline::process_file(
                    state.store.as_ref(),
                    &state.extractor,
                    &state.config,
                    filename,
                    data,
                ),
            )
            .await;
            match outcome {
                Ok(Ok(document)) => Ok(document),
                Ok(Err(err)) => Err((filename.clone(), err)),
                Err(_) => Err((filename.clone(), ApiError::Timeout)),
            }
        }
    });

    let mut documents = Vec::new();
    let mut errors = Vec::new();
    for outcome in join_all(tasks).await {
        match outcome {
            Ok(document) => documents.push(document),
            Err((filename, err)) => {
                warn!(filename, error = %err, "file ingestion failed");
                errors.push(UploadFailure {
                    filename,
                    error: err.kind(),
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(Json(UploadResponse { documents, errors }))
}

async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let documents = state.store.list_documents().await?;
    if documents.is_empty() {
        return Err(ApiError::NoDocuments);
    }
    Ok(Json(documents))
}

async fn get_graph(
    State(state): State<AppState>,
    Path(doc_id): Path<Uuid>,
) -> Result<Json<DocumentGraph>, ApiError> {
    let graph = state.store.document_graph(doc_id).await?;
    Ok(Json(graph))
}

#[derive(Serialize)]
struct HealthResponse {
    store: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = match state.store.health_check().await {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {e}"),
    };
    Json(HealthResponse { store })
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use extract::{EntityRecognizer, EntitySpan, RecognizerError};
    use store::MemoryStore;

    struct StubRecognizer {
        spans: Vec<EntitySpan>,
    }

    #[async_trait]
    impl EntityRecognizer for StubRecognizer {
        async fn recognize(&self, _chunk: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
            Ok(self.spans.clone())
        }
    }

    fn test_app(spans: Vec<EntitySpan>) -> Router {
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            extractor: Arc::new(EntityExtractor::new(Arc::new(StubRecognizer { spans }))),
            config: Arc::new(AppConfig::default()),
        };
        router(state)
    }

    fn multipart_request(files: &[(&str, &str)]) -> Request<Body> {
        let boundary = "graph-test-boundary";
        let mut body = String::new();
        for (filename, content) in files {
            body.push_str(&format!(
                "--{boundary}\r\n\
                 Content-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n\
                 Content-Type: text/plain\r\n\r\n\
                 {content}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn upload_then_list_sorted_by_filename() {
        let app = test_app(vec![EntitySpan::new("Paris", "GPE")]);

        let response = app
            .clone()
            .oneshot(multipart_request(&[("b.txt", "Paris"), ("a.txt", "Paris")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["documents"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"].as_array().unwrap().len(), 0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let titles: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn a_fourth_file_is_rejected_with_400() {
        let app = test_app(vec![]);
        let response = app
            .oneshot(multipart_request(&[
                ("a.txt", "x"),
                ("b.txt", "x"),
                ("c.txt", "x"),
                ("d.txt", "x"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "upload_limit_exceeded");
    }

    #[tokio::test]
    async fn duplicate_spans_become_one_entity_node() {
        let span = EntitySpan::new("Ada Lovelace", "PERSON");
        let app = test_app(vec![span.clone(), span]);

        let response = app
            .clone()
            .oneshot(multipart_request(&[("ada.txt", "Ada Lovelace twice")]))
            .await
            .unwrap();
        let body = json_body(response).await;
        let doc = &body["documents"][0];
        assert_eq!(doc["entities_preview"].as_array().unwrap().len(), 1);
        let doc_id = doc["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/graph/{doc_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let graph = json_body(response).await;
        // Document node plus exactly one entity node.
        assert_eq!(graph["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(graph["edges"].as_array().unwrap().len(), 1);
        assert_eq!(graph["edges"][0]["label"], "HAS_ENTITY");
    }

    #[tokio::test]
    async fn entities_preview_is_capped_at_ten() {
        let spans: Vec<_> = (0..15)
            .map(|i| EntitySpan::new(format!("entity-{i}"), "THING"))
            .collect();
        let app = test_app(spans);

        let response = app
            .oneshot(multipart_request(&[("many.txt", "lots of entities")]))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(
            body["documents"][0]["entities_preview"]
                .as_array()
                .unwrap()
                .len(),
            10
        );
    }

    #[tokio::test]
    async fn preview_is_capped_at_500_chars() {
        let app = test_app(vec![]);
        let content = "word ".repeat(300);

        let response = app
            .oneshot(multipart_request(&[("long.txt", &content)]))
            .await
            .unwrap();
        let body = json_body(response).await;
        let preview = body["documents"][0]["preview"].as_str().unwrap();
        assert_eq!(preview.chars().count(), 500);
    }

    #[tokio::test]
    async fn unsupported_file_fails_alone_without_failing_siblings() {
        let app = test_app(vec![EntitySpan::new("Paris", "GPE")]);

        let response = app
            .oneshot(multipart_request(&[
                ("good.txt", "Paris"),
                ("bad.pdf", "%PDF-1.4"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;

        assert_eq!(body["documents"].as_array().unwrap().len(), 1);
        assert_eq!(body["documents"][0]["filename"], "good.txt");
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["filename"], "bad.pdf");
        assert_eq!(body["errors"][0]["error"], "unsupported_file_type");
    }

    #[tokio::test]
    async fn unknown_graph_id_is_404() {
        let app = test_app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/graph/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "document_not_found");
    }

    #[tokio::test]
    async fn empty_catalog_is_404() {
        let app = test_app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_store_status() {
        let app = test_app(vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["store"], "ok");
    }
}
