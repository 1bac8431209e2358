// ABOUTME: You.com agent provider implementation for dialogue generation
// ABOUTME: Calls the agent runs endpoint and maps degenerate response shapes to studio fallback lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! # You.com Provider
//!
//! Implementation of the `DialogueProvider` trait for the You.com agents API.
//!
//! ## Configuration
//!
//! Set the `YOU_API_KEY` environment variable with your API key. The agent
//! name and endpoint default to the express agent at the public API and can
//! be overridden with `YOU_AGENT` and `YOU_API_URL`.
//!
//! ## Response handling
//!
//! The generated text lives at `output[0].text` in the response body. Any
//! degenerate shape on a successful call (missing field, empty output list,
//! undecodable body) is substituted with a fixed placeholder line rather
//! than reported as an error, so the show always has something to say.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{DialogueProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::constants::{fallbacks, provider};
use crate::errors::AppError;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Agent run request structure
#[derive(Debug, Serialize)]
struct AgentRunRequest<'a> {
    agent: &'a str,
    stream: bool,
    input: Vec<AgentInput<'a>>,
}

/// One input message for an agent run
#[derive(Debug, Serialize)]
struct AgentInput<'a> {
    role: &'static str,
    content: &'a str,
}

/// Agent run response structure
#[derive(Debug, Deserialize)]
struct AgentRunResponse {
    #[serde(default)]
    output: Option<Vec<AgentOutput>>,
}

/// One output entry in an agent run response
#[derive(Debug, Deserialize)]
struct AgentOutput {
    #[serde(default)]
    text: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// You.com dialogue provider using the agents run API
pub struct YouComProvider {
    client: Client,
    api_key: String,
    agent: String,
    base_url: String,
}

impl YouComProvider {
    /// Create a new You.com provider from provider configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &ProviderConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(provider::TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            agent: config.agent.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Map a successful response body to the dialogue text
    ///
    /// Never fails: shape problems substitute placeholder lines. An empty
    /// but present text field passes through unchanged.
    fn extract_text(body: &str) -> String {
        let Ok(parsed) = serde_json::from_str::<AgentRunResponse>(body) else {
            warn!("You.com returned an undecodable success body");
            return fallbacks::TECHNICAL_GLITCH.to_owned();
        };

        parsed.output.unwrap_or_default().into_iter().next().map_or_else(
            || fallbacks::LOST_FOR_WORDS.to_owned(),
            |entry| {
                entry
                    .text
                    .unwrap_or_else(|| fallbacks::NO_RESPONSE_TEXT.to_owned())
            },
        )
    }
}

#[async_trait]
impl DialogueProvider for YouComProvider {
    fn name(&self) -> &'static str {
        provider::PROVIDER_NAME
    }

    #[instrument(skip(self, prompt), fields(agent = %self.agent))]
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!("Sending agent run request to You.com");

        let request = AgentRunRequest {
            agent: &self.agent,
            stream: false,
            input: vec![AgentInput {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to You.com API: {e}");
                ProviderError::Transport {
                    message: format!("Failed to connect: {e}"),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read You.com API response: {e}");
            ProviderError::Transport {
                message: format!("Failed to read response: {e}"),
            }
        })?;

        if !status.is_success() {
            error!(
                "You.com API error ({status}): {}",
                body.chars().take(200).collect::<String>()
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let text = Self::extract_text(&body);
        debug!("Received response from You.com: {} chars", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_returns_first_output_entry() {
        let body = r#"{"output":[{"text":"Host: welcome back."}]}"#;
        assert_eq!(YouComProvider::extract_text(body), "Host: welcome back.");
    }

    #[test]
    fn test_extract_text_passes_through_empty_text() {
        let body = r#"{"output":[{"text":""}]}"#;
        assert_eq!(YouComProvider::extract_text(body), "");
    }

    #[test]
    fn test_extract_text_ignores_extra_entries() {
        let body = r#"{"output":[{"text":"first"},{"text":"second"}]}"#;
        assert_eq!(YouComProvider::extract_text(body), "first");
    }

    #[test]
    fn test_extract_text_missing_text_field() {
        let body = r#"{"output":[{"id":"run-1"}]}"#;
        assert_eq!(
            YouComProvider::extract_text(body),
            fallbacks::NO_RESPONSE_TEXT
        );
    }

    #[test]
    fn test_extract_text_absent_or_empty_output() {
        assert_eq!(
            YouComProvider::extract_text(r#"{"output":[]}"#),
            fallbacks::LOST_FOR_WORDS
        );
        assert_eq!(
            YouComProvider::extract_text(r#"{"output":null}"#),
            fallbacks::LOST_FOR_WORDS
        );
        assert_eq!(
            YouComProvider::extract_text("{}"),
            fallbacks::LOST_FOR_WORDS
        );
    }

    #[test]
    fn test_extract_text_undecodable_body() {
        assert_eq!(
            YouComProvider::extract_text("<html>oops</html>"),
            fallbacks::TECHNICAL_GLITCH
        );
        assert_eq!(
            YouComProvider::extract_text(r#"{"output":42}"#),
            fallbacks::TECHNICAL_GLITCH
        );
    }
}
