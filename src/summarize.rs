use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SummarizationError;

pub type SummaryFuture<'a> = Pin<Box<dyn Future<Output = Result<String, SummarizationError>> + 'a>>;

/// Condenses a response body into a short description.
pub trait Summarizer {
    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a>;
}

impl<T: Summarizer + ?Sized> Summarizer for &T {
    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a> {
        (**self).summarize(text)
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

fn chat_url(base_url: &str) -> String {
    format!("{}/api/chat", base_url.trim_end_matches('/'))
}

/// Summarizes through an Ollama compatible `/api/chat` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaSummarizer {
    client: Client,
    api_url: String,
    model: String,
    prompt: String,
}

impl OllamaSummarizer {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.model_timeout_secs))
            .build()
            .context("Failed to initialize model client")?;
        Ok(Self {
            client,
            api_url: chat_url(&cfg.model_base_url),
            model: cfg.model.clone(),
            prompt: cfg.summary_prompt.clone(),
        })
    }

    fn request_body<'a>(&'a self, text: &'a str) -> OllamaChatRequest<'a> {
        OllamaChatRequest {
            model: &self.model,
            stream: false,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        }
    }

    async fn chat(&self, text: &str) -> Result<String, SummarizationError> {
        debug!(
            api_url = %self.api_url,
            model = %self.model,
            text_len = text.len(),
            "sending summarization request"
        );

        let response = self
            .client
            .post(&self.api_url)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|err| {
                warn!(api_url = %self.api_url, error = %err, "model request failed");
                SummarizationError::Request {
                    url: self.api_url.clone(),
                    message: err.to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            return Err(SummarizationError::Status { status, body });
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|err| SummarizationError::Decode(err.to_string()))?;
        let summary = parsed.message.content.trim().to_string();
        if summary.is_empty() {
            return Err(SummarizationError::Empty);
        }
        Ok(summary)
    }
}

impl Summarizer for OllamaSummarizer {
    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a> {
        Box::pin(self.chat(text))
    }
}
