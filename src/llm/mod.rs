//! Reqwest-based completion client for an OpenAI-compatible Chat Completions endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Substituted when the response carries no extractable message content.
pub const NO_RESPONSE_FALLBACK: &str = "No response found.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl LlmClient {
    pub fn from_config(cfg: &Config, model: &str, temperature: f32) -> Result<Self> {
        let api_base_url = cfg.get("API_BASE_URL").unwrap_or_else(|| "default".into());
        let mut base_url = if api_base_url == "default" {
            "https://api.groq.com/openai/v1".to_string()
        } else {
            api_base_url
        };
        let trimmed = base_url.trim_end_matches('/');
        if !trimmed.ends_with("/v1") && !trimmed.contains("/v1/") {
            base_url = format!("{}/v1", trimmed);
        } else {
            base_url = trimmed.to_string();
        }
        // Missing key is not validated here; the endpoint rejects the request instead
        let api_key = cfg.get("GROQ_API_KEY");

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs()))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
            model: model.to_string(),
            temperature,
        })
    }

    /// Send a single user prompt and return the first choice's message content,
    /// with markdown code fences stripped.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            let hv = HeaderValue::from_str(&format!("Bearer {}", key))?;
            headers.insert(AUTHORIZATION, hv);
        }

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: Role::User,
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, "sending completion request");

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .context("failed to send completion request")?;

        if !resp.status().is_success() {
            anyhow::bail!("completion error: {}", resp.status());
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .context("invalid completion response")?;

        Ok(extract_content(parsed))
    }
}

fn extract_content(resp: ChatResponse) -> String {
    let text = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string());
    strip_code_fences(&text)
}

/// Remove every ```` ```html ```` (any case) and bare ```` ``` ```` token.
pub fn strip_code_fences(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"```") {
            i += 3;
            if bytes.len() - i >= 4 && bytes[i..i + 4].eq_ignore_ascii_case(b"html") {
                i += 4;
            }
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    // Only whole ASCII tokens were removed, so the result stays valid UTF-8
    String::from_utf8(out).unwrap_or_else(|_| text.to_string())
}

// Minimal response structures for OpenAI-like completions
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
