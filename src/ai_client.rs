//! Completion backend chain for AI-powered extraction and feedback.
//!
//! Tries backends in priority order:
//! 1. Anthropic messages API (only when an API key is configured)
//! 2. Hugging Face inference API (free, anonymous)
//!
//! When every attempted backend fails the call reports `Error::Backend`;
//! raw text is never fabricated here. The caller recovers with the
//! deterministic analyzers in `fallback`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Error;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_MODEL: &str = "claude-haiku-4-5-20251001";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const HF_API_URL: &str = "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.1";

const MAX_COMPLETION_TOKENS: u32 = 1500;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Anthropic API message format
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Anthropic API request format
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

/// Anthropic API response format
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Hugging Face inference request format
#[derive(Debug, Serialize)]
struct HfRequest {
    inputs: String,
    parameters: HfParameters,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    temperature: f32,
}

/// Hugging Face inference response: a list with the generated text
/// (which echoes the prompt as a prefix)
#[derive(Debug, Deserialize)]
struct HfGeneration {
    #[serde(default)]
    generated_text: Option<String>,
}

/// Client for the completion backends.
///
/// The credential is an explicit constructor argument, never ambient state;
/// `None` (or an empty key) simply skips the premium backend.
pub struct AiClient {
    api_key: Option<String>,
    anthropic_url: String,
    hf_url: String,
}

impl AiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_urls(api_key, ANTHROPIC_API_URL, HF_API_URL)
    }

    /// Point the client at alternate endpoints. Tests use this to simulate
    /// unreachable backends without touching the network.
    pub fn with_base_urls(api_key: Option<String>, anthropic_url: &str, hf_url: &str) -> Self {
        AiClient {
            api_key: api_key.filter(|k| !k.is_empty()),
            anthropic_url: anthropic_url.to_string(),
            hf_url: hf_url.to_string(),
        }
    }

    /// Transport for one backend attempt. A TLS initialization failure is
    /// just another backend failure: it propagates into the fallback chain
    /// instead of panicking.
    fn http_client(&self) -> Result<reqwest::Client, String> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("medreader/0.3.0")
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Produce a raw text completion for the prompt, trying the premium
    /// backend first (when keyed), then the free backend.
    pub async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, Error> {
        if let Some(key) = &self.api_key {
            match self.call_anthropic(key, prompt, system_prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    eprintln!("[AI] premium backend failed: {}", e);
                }
            }
        }

        match self.call_huggingface(prompt, system_prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                eprintln!("[AI] free backend failed: {}", e);
                Err(Error::Backend(e))
            }
        }
    }

    async fn call_anthropic(
        &self,
        api_key: &str,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, String> {
        let request = AnthropicRequest {
            model: ANTHROPIC_MODEL.to_string(),
            max_tokens: MAX_COMPLETION_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            system: system_prompt.map(String::from),
        };

        let response = self
            .http_client()?
            .post(&self.anthropic_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("API error {}: {}", status, body));
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        // Content blocks concatenated in order; blocks without text
        // contribute nothing
        Ok(api_response
            .content
            .iter()
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join(""))
    }

    async fn call_huggingface(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, String> {
        let full_prompt = match system_prompt {
            Some(system) => format!("{}\n\n{}", system, prompt),
            None => prompt.to_string(),
        };

        let request = HfRequest {
            inputs: full_prompt.clone(),
            parameters: HfParameters {
                max_new_tokens: MAX_COMPLETION_TOKENS,
                temperature: 0.7,
            },
        };

        let response = self
            .http_client()?
            .post(&self.hf_url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API rate limited or failed ({})", response.status()));
        }

        let generations: Vec<HfGeneration> = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        let generated = generations
            .first()
            .and_then(|g| g.generated_text.as_deref())
            .ok_or_else(|| "empty generation list".to_string())?;

        // The free backend echoes the prompt as a prefix; strip it
        let completion = generated
            .strip_prefix(full_prompt.as_str())
            .unwrap_or(generated)
            .trim();

        Ok(completion.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) is closed on loopback, so requests fail fast with a
    // connection error instead of hitting the network.
    const DEAD_URL: &str = "http://127.0.0.1:9/";

    #[test]
    fn test_http_client_builds_without_panicking() {
        let client = AiClient::new(None);
        assert!(client.http_client().is_ok());
    }

    #[test]
    fn test_empty_key_is_treated_as_absent() {
        let client = AiClient::new(Some(String::new()));
        assert!(!client.has_api_key());
        let client = AiClient::new(Some("sk-test".to_string()));
        assert!(client.has_api_key());
    }

    #[tokio::test]
    async fn test_complete_fails_when_all_backends_unreachable() {
        let client = AiClient::with_base_urls(Some("sk-test".to_string()), DEAD_URL, DEAD_URL);
        let result = client.complete("prompt", None).await;
        match result {
            Err(Error::Backend(_)) => {}
            other => panic!("expected Backend error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_complete_without_key_skips_premium() {
        // Only the free backend is attempted; it is unreachable, so the
        // call must still end in a Backend error rather than a panic.
        let client = AiClient::with_base_urls(None, DEAD_URL, DEAD_URL);
        let result = client.complete("prompt", Some("system")).await;
        assert!(matches!(result, Err(Error::Backend(_))));
    }
}
