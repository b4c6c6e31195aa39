use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use std::time::{ Duration, Instant };
use chrono::Local;

use super::{ BackendError, GenerationResult, ModelDiscovery };
use crate::models::chat::ChatMessage;

/// Client for a local Ollama server. Holds no per-conversation state; every
/// call re-resolves the model so a hot-swapped backend is picked up
/// immediately.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
    fallback_model: String,
    discovery_timeout: Duration,
    completion_timeout: Duration,
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: SamplingOptions,
}

#[derive(Serialize)]
struct SamplingOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Deserialize)]
struct ChatReply {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    pub fn new(
        base_url: String,
        fallback_model: String,
        discovery_timeout: Duration,
        completion_timeout: Duration,
    ) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback_model,
            discovery_timeout,
            completion_timeout,
        }
    }

    /// Detect the first available model via `GET /api/tags`. Any failure mode
    /// (transport error, non-2xx status, empty listing) yields the fallback.
    pub async fn discover_model(&self) -> ModelDiscovery {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(self.discovery_timeout)
            .send()
            .await;

        match resp {
            Ok(resp) if resp.status().is_success() => match resp.json::<TagsResponse>().await {
                Ok(tags) => match tags.models.into_iter().next() {
                    Some(tag) => ModelDiscovery::Live(tag.name),
                    None => ModelDiscovery::Fallback(self.fallback_model.clone()),
                },
                Err(_) => ModelDiscovery::Fallback(self.fallback_model.clone()),
            },
            _ => ModelDiscovery::Fallback(self.fallback_model.clone()),
        }
    }

    /// Reachability check against the tag listing, used by the health
    /// endpoint. Unlike discovery this surfaces transport failures.
    pub async fn probe(&self) -> Result<bool, BackendError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(self.discovery_timeout)
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Run one non-streaming completion over the full message sequence.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u32,
    ) -> Result<GenerationResult, BackendError> {
        let model = self.discover_model().await.into_name();
        let url = format!("{}/api/chat", self.base_url);
        let payload = ChatPayload {
            model: &model,
            messages,
            stream: false,
            options: SamplingOptions {
                temperature,
                num_predict: max_tokens,
            },
        };

        let started = Instant::now();
        let resp = self
            .http
            .post(&url)
            .timeout(self.completion_timeout)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply = resp.json::<ChatReply>().await?;
        let elapsed = started.elapsed();

        Ok(GenerationResult {
            response_text: reply.message.content,
            model_name: model,
            processing_time_seconds: elapsed.as_secs_f64(),
            timestamp: Local::now().to_rfc3339(),
        })
    }
}
