// ABOUTME: Route handler for audience interactions on discussions
// ABOUTME: Dispatches like/comment/rate actions, every branch answers HTTP 200
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Interaction routes
//!
//! One endpoint dispatches on an `action` discriminator in the body. Every
//! branch answers HTTP 200 with `success` carried in the payload, including
//! undecodable bodies and database failures.

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
use tracing::error;

use crate::{
    constants::defaults, database::InteractionManager, errors::AppResult, server::ServerResources,
};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for an interaction
#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    /// One of `like`, `comment`, `rate`
    pub action: Option<String>,
    /// Target discussion
    pub discussion_id: Option<i64>,
    /// Acting user, defaults to the anonymous sentinel
    pub user_id: Option<String>,
    /// Comment text, used by the comment action
    pub content: Option<String>,
    /// Star rating, used by the rate action
    pub stars: Option<i32>,
}

/// Response body for an interaction
#[derive(Debug, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Whether the action was applied
    pub success: bool,
    /// Resulting like state, only for the like action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    /// Failure description, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InteractionResponse {
    const fn ok() -> Self {
        Self {
            success: true,
            liked: None,
            error: None,
        }
    }

    const fn toggled(liked: bool) -> Self {
        Self {
            success: true,
            liked: Some(liked),
            error: None,
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            liked: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Interaction routes handler
pub struct InteractionRoutes;

impl InteractionRoutes {
    /// Create the interaction routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/interactions", post(Self::handle_interaction))
            .with_state(resources)
    }

    /// Handle POST /interactions - Apply one like, comment, or rate action
    async fn handle_interaction(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Response {
        let request = match serde_json::from_slice::<InteractionRequest>(&body) {
            Ok(request) => request,
            Err(e) => return Self::respond(InteractionResponse::failure(e.to_string())),
        };

        let response = match Self::apply(&resources, request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Interaction failed: {e}");
                InteractionResponse::failure(e.to_string())
            }
        };

        Self::respond(response)
    }

    async fn apply(
        resources: &Arc<ServerResources>,
        request: InteractionRequest,
    ) -> AppResult<InteractionResponse> {
        let Some(discussion_id) = request.discussion_id else {
            return Ok(InteractionResponse::failure("discussion_id is required"));
        };

        let user_id = request
            .user_id
            .unwrap_or_else(|| defaults::ANONYMOUS_USER_ID.to_owned());

        let manager = InteractionManager::new(resources.database.pool().clone());

        match request.action.as_deref() {
            Some("like") => {
                let liked = manager.toggle_like(discussion_id, &user_id).await?;
                Ok(InteractionResponse::toggled(liked))
            }
            Some("comment") => {
                let content = request.content.unwrap_or_default();
                if content.trim().is_empty() {
                    return Ok(InteractionResponse::failure("Comment content is required"));
                }

                manager.add_comment(discussion_id, &user_id, &content).await?;
                Ok(InteractionResponse::ok())
            }
            Some("rate") => {
                let stars = request.stars.unwrap_or(0);
                if !(1..=5).contains(&stars) {
                    return Ok(InteractionResponse::failure(
                        "Stars must be between 1 and 5",
                    ));
                }

                manager.rate(discussion_id, &user_id, stars).await?;
                Ok(InteractionResponse::ok())
            }
            _ => Ok(InteractionResponse::failure("Invalid action")),
        }
    }

    fn respond(response: InteractionResponse) -> Response {
        (StatusCode::OK, Json(response)).into_response()
    }
}
