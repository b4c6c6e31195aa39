use crate::cli::Args;
use crate::llm::{ BackendError, OllamaClient };
use crate::models::chat::{ ChatMessage, Role };
use std::error::Error;
use std::net::SocketAddr;
use axum::{
    routing::{ get, post },
    Router,
    extract::State,
    response::{ IntoResponse, Response },
    http::StatusCode,
    Json,
};
use serde::{ Deserialize, Serialize };
use serde_json::json;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };
use chrono::Local;

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

// prompt/messages stay Option so their absence maps to a 400 with an `error`
// body instead of an extractor rejection.
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ollama_available: bool,
    pub available_model: Option<String>,
    pub timestamp: String,
    pub version: &'static str,
}

#[derive(Clone)]
struct AppState {
    client: OllamaClient,
}

pub fn build_router(client: OllamaClient) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(AppState { client })
}

pub async fn start_http_server(
    args: &Args,
    client: OllamaClient,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = args.server_addr.parse::<SocketAddr>()?;
    info!("Starting relay on: http://{} (backend: {})", addr, args.ollama_url);

    let app = build_router(client);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health never errors: any internal failure folds into a `degraded` result.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let discovered = state.client.discover_model().await;
    let (available, model) = match state.client.probe().await {
        Ok(reachable) => (reachable, Some(discovered.into_name())),
        Err(e) => {
            error!("Health check error: {}", e);
            (false, None)
        }
    };

    Json(HealthResponse {
        status: if available { "healthy" } else { "degraded" },
        ollama_available: available,
        available_model: model,
        timestamp: Local::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    let Some(prompt) = req.prompt else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "prompt is required" })),
        )
            .into_response();
    };

    let messages = vec![ChatMessage {
        role: Role::User,
        content: prompt.clone(),
    }];

    match state
        .client
        .complete(&messages, req.temperature, req.max_tokens)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "prompt": prompt,
                "response": result.response_text,
                "processing_time": result.processing_time_seconds,
                "timestamp": result.timestamp,
                "model": result.model_name,
            })),
        )
            .into_response(),
        Err(err) => backend_error_response(err),
    }
}

/// Chat forwards the caller's full message sequence untouched; conversation
/// history is the caller's responsibility on every call.
async fn chat_handler(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    let Some(messages) = req.messages else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "messages is required" })),
        )
            .into_response();
    };

    match state
        .client
        .complete(&messages, req.temperature, req.max_tokens)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "response": result.response_text,
                "processing_time": result.processing_time_seconds,
                "timestamp": result.timestamp,
                "model": result.model_name,
            })),
        )
            .into_response(),
        Err(err) => backend_error_response(err),
    }
}

fn backend_error_response(err: BackendError) -> Response {
    let body = match err {
        BackendError::Status { status, body } => {
            error!("Ollama error: {} - {}", status, body);
            json!({
                "error": format!("Ollama error: {}", status),
                "details": body,
            })
        }
        BackendError::Transport(message) => {
            error!("Backend transport error: {}", message);
            json!({ "error": message })
        }
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_fills_sampling_defaults() {
        let req: GenerateRequest = serde_json::from_str(r#"{"prompt":"hi"}"#).expect("deserialize");
        assert_eq!(req.prompt.as_deref(), Some("hi"));
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 1000);
    }

    #[test]
    fn generate_request_accepts_missing_prompt() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"temperature":0.2}"#).expect("deserialize");
        assert!(req.prompt.is_none());
        assert_eq!(req.temperature, 0.2);
    }

    #[test]
    fn chat_request_parses_message_sequence() {
        let raw = r#"{"messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}],"max_tokens":64}"#;
        let req: ChatRequest = serde_json::from_str(raw).expect("deserialize");
        let messages = req.messages.expect("messages");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(req.max_tokens, 64);
    }

    #[test]
    fn health_response_serializes_null_model_when_unknown() {
        let health = HealthResponse {
            status: "degraded",
            ollama_available: false,
            available_model: None,
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            version: env!("CARGO_PKG_VERSION"),
        };
        let json = serde_json::to_value(&health).expect("serialize");
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["ollama_available"], false);
        assert!(json["available_model"].is_null());
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
