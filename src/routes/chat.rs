// ABOUTME: Route handler for talk show dialogue generation
// ABOUTME: Validates the request, calls the provider, persists the exchange, always answers with output text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Chat routes
//!
//! This module handles the dialogue generation endpoint. Provider failures
//! never surface as HTTP errors: the handler substitutes a fixed on-air
//! fallback line and still answers 200, and the exchange is persisted
//! best-effort so a broken database never silences the show.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::{
    constants::{defaults, fallbacks},
    database::{DiscussionManager, NewDiscussionLog},
    llm::{build_dialogue_prompt, ProviderError},
    server::ServerResources,
};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for dialogue generation
#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    /// Dialogue topic
    pub question: Option<String>,
    /// First guest name
    pub guest_a: Option<String>,
    /// Second guest name
    pub guest_b: Option<String>,
    /// Emotional tone for the exchange
    pub tone: Option<String>,
}

/// Response for a generated dialogue
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated dialogue text, or a substituted fallback line
    pub output: String,
}

/// Error body for rejected chat requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatError {
    /// Reason the request was rejected
    pub error: String,
}

// ============================================================================
// Routes
// ============================================================================

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create the chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/chat", post(Self::handle_chat))
            .with_state(resources)
    }

    /// Handle POST /chat - Generate and persist one dialogue exchange
    ///
    /// The response always carries an `output` field for valid requests,
    /// even when the provider call fails.
    async fn handle_chat(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Response {
        let Ok(request) = serde_json::from_slice::<ChatRequestBody>(&body) else {
            return Self::bad_request("Invalid request body");
        };

        let (Some(question), Some(guest_a), Some(guest_b)) = (
            require(request.question.as_deref()),
            require(request.guest_a.as_deref()),
            require(request.guest_b.as_deref()),
        ) else {
            return Self::bad_request("Missing parameters");
        };

        let tone = request.tone.as_deref().unwrap_or_default();
        let prompt = build_dialogue_prompt(question, guest_a, guest_b, tone);

        let output = match resources.provider.generate(&prompt).await {
            Ok(text) => text,
            Err(ProviderError::Status { status }) => {
                warn!("Provider answered {status}, substituting backstage error line");
                fallbacks::backstage_error(status)
            }
            Err(ProviderError::Transport { message }) => {
                warn!("Provider call never completed ({message}), substituting cancellation line");
                fallbacks::SHOW_CANCELLED.to_owned()
            }
        };

        let log = NewDiscussionLog {
            topic: question.to_owned(),
            guest1: guest_a.to_owned(),
            guest2: guest_b.to_owned(),
            prompt,
            response: output.clone(),
            ai_name: resources.provider.name().to_owned(),
            tone: tone.to_owned(),
            conversation_type: defaults::CONVERSATION_TYPE.to_owned(),
        };

        let discussions = DiscussionManager::new(resources.database.pool().clone());
        if let Err(e) = discussions.insert(&log).await {
            error!("Failed to persist discussion log: {e}");
        }

        (StatusCode::OK, Json(ChatResponse { output })).into_response()
    }

    fn bad_request(message: &str) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ChatError {
                error: message.to_owned(),
            }),
        )
            .into_response()
    }
}

/// Accept a field only when present with non-blank content
fn require(field: Option<&str>) -> Option<&str> {
    field.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank_fields() {
        assert_eq!(require(None), None);
        assert_eq!(require(Some("")), None);
        assert_eq!(require(Some("   ")), None);
        assert_eq!(require(Some("Ada")), Some("Ada"));
    }

    #[test]
    fn test_request_body_accepts_partial_json() {
        let request: ChatRequestBody = serde_json::from_str(r#"{"question":"q"}"#)
            .expect("partial body should deserialize");

        assert_eq!(request.question.as_deref(), Some("q"));
        assert!(request.guest_a.is_none());
        assert!(request.tone.is_none());
    }
}
