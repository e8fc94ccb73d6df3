//! Remote Weather Analyst
//!
//! Client for an OpenAI-compatible chat completions endpoint, and the
//! prompts that turn observations into analyst requests.

mod analyst;
mod client;
mod prompts;

pub use analyst::{AnalysisKind, WeatherAnalyst};
pub use client::{ChatClient, LlmConfig};
pub use prompts::{analysis_prompt, extreme_weather_prompt, prediction_prompt, HISTORY_WINDOW};

use thiserror::Error;

/// Remote analyst errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM endpoint not configured: {0}")]
    NotConfigured(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Response contained no message content")]
    EmptyResponse,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
