//! Axum web server with a WebSocket for watching the address pipeline step by step

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use clap::Parser;
use geoparse_core::{
    corpus::demo_records,
    reorder::reorder_and_join,
    AddressRecord, PipelineConfig, PipelineEvent, Preprocessor, Ruleset, Transliterator,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "geoparse-web", about = "Inspection server for the Greek address pipeline")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: String,

    /// JSON pipeline configuration; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Shared application state
struct AppState {
    preprocessor: Preprocessor,
}

#[derive(Deserialize)]
struct TransliterateRequest {
    text: String,
    #[serde(default)]
    elot: bool,
    #[serde(default)]
    voice_equivalent: bool,
}

#[derive(Serialize)]
struct TransliterateResponse {
    text: String,
    ruleset: Ruleset,
    /// Output column the ruleset writes to
    column: &'static str,
}

#[derive(Deserialize)]
struct ReorderRequest {
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    numbers: Vec<String>,
    reference: String,
}

#[derive(Serialize)]
struct ReorderResponse {
    text: String,
}

/// Batch request, over HTTP or as a WebSocket message
#[derive(Deserialize)]
struct RecordsRequest {
    records: Vec<AddressRecord>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("failed to load pipeline config from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let state = Arc::new(AppState {
        preprocessor: Preprocessor::with_config(config),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("geoparse server listening on http://{}", args.bind);
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/demo-records", get(demo_records_handler))
        .route("/transliterate", post(transliterate_handler))
        .route("/reorder", post(reorder_handler))
        .route("/preprocess", post(preprocess_handler))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> axum::response::Response {
    (status, Json(serde_json::json!({ "error": message.to_string() }))).into_response()
}

/// Main HTML page
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

async fn demo_records_handler() -> impl IntoResponse {
    Json(demo_records())
}

async fn transliterate_handler(Json(req): Json<TransliterateRequest>) -> impl IntoResponse {
    match Transliterator::from_flags(req.elot, req.voice_equivalent) {
        Ok(transliterator) => Json(TransliterateResponse {
            text: transliterator.transliterate(&req.text),
            ruleset: transliterator.ruleset(),
            column: transliterator.ruleset().column_name(),
        })
        .into_response(),
        Err(err) => error_response(StatusCode::BAD_REQUEST, err),
    }
}

async fn reorder_handler(Json(req): Json<ReorderRequest>) -> impl IntoResponse {
    Json(ReorderResponse {
        text: reorder_and_join(&req.names, &req.numbers, &req.reference),
    })
}

/// Batch preprocessing over HTTP (no streaming)
async fn preprocess_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordsRequest>,
) -> impl IntoResponse {
    let records = req.records;
    info!(records = records.len(), "preprocessing batch");

    let result =
        tokio::task::spawn_blocking(move || state.preprocessor.process_batch(&records)).await;

    match result {
        Ok(report) => Json(report).into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

/// HTTP → WebSocket upgrade
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Turns a WebSocket message into records: `{records: [...]}` or a bare address.
fn records_from_message(text: &str, config: &PipelineConfig) -> Vec<AddressRecord> {
    if let Ok(req) = serde_json::from_str::<RecordsRequest>(text) {
        return req.records;
    }
    let address = text.trim();
    if address.is_empty() {
        return Vec::new();
    }
    let identifier = config
        .identifier_columns
        .first()
        .map(String::as_str)
        .unwrap_or("AA");
    vec![AddressRecord::new(0)
        .with_field(identifier, Some("1"))
        .with_field(&config.address_column, Some(address))]
}

/// Receives records, runs the pipeline and streams its events
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket connected");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let records = records_from_message(&text, state.preprocessor.config());
                if records.is_empty() {
                    continue;
                }
                info!(records = records.len(), "preprocessing via WebSocket");

                // The pipeline is synchronous: run it off the async runtime.
                let (tx, rx) = std::sync::mpsc::channel::<PipelineEvent>();
                let worker_state = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    worker_state.preprocessor.process_streaming(&records, tx);
                });

                if let Err(err) = handle.await {
                    warn!(%err, "pipeline task failed");
                    continue;
                }

                // Drain into a Vec: the std receiver is not Send.
                let events: Vec<PipelineEvent> = rx.try_iter().collect();

                for event in &events {
                    let Ok(json) = serde_json::to_string(event) else {
                        continue;
                    };
                    if socket.send(Message::Text(json)).await.is_err() {
                        return; // client disconnected
                    }
                    // Short pause so the page can animate each step.
                    tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                }
            }
            Message::Close(_) => {
                info!("WebSocket disconnected");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    fn test_app() -> Router {
        build_router(Arc::new(AppState {
            preprocessor: Preprocessor::new(),
        }))
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_demo_records() {
        let response = test_app()
            .oneshot(Request::builder().uri("/demo-records").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), demo_records().len());
        assert_eq!(json[0]["fields"][0][0], "AA");
    }

    #[tokio::test]
    async fn test_transliterate_elot() {
        let response = test_app()
            .oneshot(post_json("/transliterate", json!({ "text": "Αθήνα", "elot": true })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["text"], "Athina");
        assert_eq!(json["ruleset"], "elot");
        assert_eq!(json["column"], "ELOT");
    }

    #[tokio::test]
    async fn test_transliterate_voice_equivalent_column() {
        let body = json!({ "text": "Αθήνα", "voice_equivalent": true });
        let response = test_app().oneshot(post_json("/transliterate", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["ruleset"], "voice_equivalent");
        assert_eq!(json["column"], "Voice_equivalent");
    }

    #[tokio::test]
    async fn test_transliterate_without_ruleset_is_bad_request() {
        let response = test_app()
            .oneshot(post_json("/transliterate", json!({ "text": "Αθήνα" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Configuration error"));
    }

    #[tokio::test]
    async fn test_reorder() {
        let body = json!({
            "names": ["Μουργκάνας", "Μαρούσι"],
            "numbers": ["&", "18", "1"],
            "reference": "Μελισίων 18 & Μουργκάνας 1 Μαρούσι 15126"
        });
        let response = test_app().oneshot(post_json("/reorder", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["text"], "18 & Μουργκάνας 1 Μαρούσι");
    }

    #[tokio::test]
    async fn test_preprocess_batch() {
        let body = json!({
            "records": [
                {
                    "old_index": 0,
                    "fields": [
                        ["AA", "1"],
                        ["full_address", "Λ. Κηφισίας 100 Αθήνα"],
                        ["town", "Αθήνα"]
                    ]
                },
                { "old_index": 1, "fields": [["AA", "2"]] }
            ]
        });
        let response = test_app().oneshot(post_json("/preprocess", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        let rows = json["rows"].as_array().unwrap();
        assert!(rows.iter().any(|r| r["target"] == "streetNumber" && r["text"] == "100"));
        assert!(rows.iter().all(|r| r["AA"] == "1"));
        assert_eq!(json["failures"][0]["old_index"], 1);
    }

    #[test]
    fn test_records_from_plain_text_message() {
        let config = PipelineConfig::default();
        let records = records_from_message("Ερμού 5 Αθήνα", &config);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_canonical("full_address"), Some("Ερμού 5 Αθήνα"));
        assert!(records_from_message("   ", &config).is_empty());
    }
}
