// ABOUTME: Route handler for listing comments on a discussion
// ABOUTME: Validates the discussion_id query parameter and serves comments newest-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Comment listing routes
//!
//! Unlike the listing feed, this endpoint uses real HTTP status codes:
//! 400 for a missing or non-numeric `discussion_id` and 500 when the
//! database fails, with the detail kept server-side.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    database::{CommentRecord, InteractionManager},
    server::ServerResources,
};

// ============================================================================
// Query Types
// ============================================================================

/// Query parameters for listing comments
#[derive(Debug, Deserialize, Default)]
pub struct ListCommentsQuery {
    /// Discussion to list comments for
    pub discussion_id: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// One comment in a listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentEntry {
    /// Comment id
    pub id: i64,
    /// Author, possibly the anonymous sentinel
    pub user_id: String,
    /// Comment text
    pub content: String,
    /// When the comment was posted
    pub created_at: String,
}

impl From<CommentRecord> for CommentEntry {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            content: record.content,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Comment collection with its size
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentData {
    /// Comments, newest first
    pub comments: Vec<CommentEntry>,
    /// Number of comments returned
    pub count: usize,
}

/// Response for listing comments
///
/// Both `data` and `error` are always present on the wire; the inactive
/// one is null.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCommentsResponse {
    /// Whether the listing succeeded
    pub success: bool,
    /// Comment data, null on failure
    pub data: Option<CommentData>,
    /// Failure description, null on success
    pub error: Option<String>,
}

// ============================================================================
// Routes
// ============================================================================

/// Comment listing routes handler
pub struct CommentRoutes;

impl CommentRoutes {
    /// Create the comment routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/comments", get(Self::handle_list))
            .with_state(resources)
    }

    /// Handle GET /comments - List comments for one discussion, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListCommentsQuery>,
    ) -> Response {
        let Some(raw_id) = query.discussion_id.as_deref().filter(|v| !v.is_empty()) else {
            return Self::error_response(StatusCode::BAD_REQUEST, "discussion_id is required");
        };

        let Ok(discussion_id) = raw_id.trim().parse::<i64>() else {
            return Self::error_response(StatusCode::BAD_REQUEST, "discussion_id must be a number");
        };

        let manager = InteractionManager::new(resources.database.pool().clone());
        match manager.list_comments(discussion_id).await {
            Ok(comments) => {
                let entries: Vec<CommentEntry> = comments.into_iter().map(Into::into).collect();
                let response = ListCommentsResponse {
                    success: true,
                    data: Some(CommentData {
                        count: entries.len(),
                        comments: entries,
                    }),
                    error: None,
                };

                (StatusCode::OK, Json(response)).into_response()
            }
            Err(e) => {
                error!("Failed to list comments: {e}");
                Self::error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }

    fn error_response(status: StatusCode, message: &str) -> Response {
        (
            status,
            Json(ListCommentsResponse {
                success: false,
                data: None,
                error: Some(message.to_owned()),
            }),
        )
            .into_response()
    }
}
