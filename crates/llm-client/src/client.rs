//! Chat completions client

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL; `/chat/completions` is appended
    pub api_url: String,
    /// Bearer token, supplied through configuration or environment only
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Model name sent with each request
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Completion length cap
    pub max_tokens: u32,
    /// Request timeout (seconds)
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat endpoint
pub struct ChatClient {
    http: reqwest::Client,
    config: LlmConfig,
    endpoint: String,
}

impl ChatClient {
    /// Create a client; fails when no API key is configured
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(LlmError::NotConfigured("missing API key".to_string())),
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        let endpoint = format!("{}/chat/completions", config.api_url.trim_end_matches('/'));
        info!("Chat client ready: {} ({})", endpoint, config.model);

        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Send one user message and return the first choice's content
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("POST {} ({} prompt bytes)", self.endpoint, prompt.len());
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Chat endpoint returned {}", status);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        extract_content(body)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.is_empty())
        .ok_or(LlmError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn config(api_url: String) -> LlmConfig {
        LlmConfig {
            api_url,
            api_key: Some("test-key".to_string()),
            ..LlmConfig::default()
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let err = ChatClient::new(LlmConfig::default()).err().unwrap();
        assert!(matches!(err, LlmError::NotConfigured(_)));

        let blank = LlmConfig {
            api_key: Some("  ".to_string()),
            ..LlmConfig::default()
        };
        assert!(ChatClient::new(blank).is_err());
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let json = serde_json::to_value(config("http://x".to_string())).unwrap();
        assert!(json.get("api_key").is_none());
    }

    #[test]
    fn test_extract_content() {
        let ok: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "Sunny spells"}}]
        }))
        .unwrap();
        assert_eq!(extract_content(ok).unwrap(), "Sunny spells");

        let empty: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(extract_content(empty), Err(LlmError::EmptyResponse)));

        let no_content: ChatResponse =
            serde_json::from_value(json!({"choices": [{"message": {"role": "assistant"}}]}))
                .unwrap();
        assert!(matches!(
            extract_content(no_content),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_complete_against_local_endpoint() {
        async fn handler(Json(body): Json<Value>) -> Json<Value> {
            assert_eq!(body["messages"][0]["role"], "user");
            assert_eq!(body["max_tokens"], 2000);
            let prompt = body["messages"][0]["content"].as_str().unwrap_or("");
            Json(json!({
                "choices": [{"message": {"content": format!("echo: {}", prompt)}}]
            }))
        }

        let base = serve(Router::new().route("/chat/completions", post(handler))).await;
        let client = ChatClient::new(config(base)).unwrap();
        assert_eq!(client.complete("hello").await.unwrap(), "echo: hello");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        async fn handler() -> (StatusCode, &'static str) {
            (StatusCode::SERVICE_UNAVAILABLE, "overloaded")
        }

        let base = serve(Router::new().route("/chat/completions", post(handler))).await;
        let client = ChatClient::new(config(base)).unwrap();
        match client.complete("hello").await {
            Err(LlmError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
