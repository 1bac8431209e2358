// ABOUTME: Route handler for paginated discussion listings
// ABOUTME: Serves stored dialogues with derived like/comment counts, failures stay HTTP 200
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Discussion listing routes
//!
//! This module serves the browse feed of stored dialogues. Failures keep the
//! HTTP status at 200 and surface the problem inside the payload, with the
//! pagination block reset to its defaults, so the front end always receives
//! the same shape.

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
    constants::defaults,
    database::{DiscussionListing, DiscussionManager, DiscussionSort},
    errors::{AppError, AppResult},
    server::ServerResources,
};

// ============================================================================
// Query Types
// ============================================================================

/// Query parameters for listing discussions
///
/// Numeric parameters arrive as raw strings so that malformed values can be
/// reported inside the payload instead of rejected before the handler runs.
#[derive(Debug, Deserialize, Default)]
pub struct ListDiscussionsQuery {
    /// Page number, 1-based
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
    /// Sort order: `popular`, anything else sorts by date
    pub sort_by: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// One discussion in a listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct DiscussionEntry {
    /// Discussion log id
    pub id: i64,
    /// Dialogue topic
    pub topic: String,
    /// First guest name
    pub guest1: String,
    /// Second guest name
    pub guest2: String,
    /// Requested emotional tone
    pub tone: String,
    /// Generated dialogue text
    pub response: String,
    /// Aggregate star rating
    pub stars: f64,
    /// Conversation type label
    #[serde(rename = "type")]
    pub conversation_type: String,
    /// When the dialogue was generated
    pub created_at: String,
    /// Number of likes
    pub likes: i64,
    /// Number of comments
    pub comments: i64,
}

impl From<DiscussionListing> for DiscussionEntry {
    fn from(listing: DiscussionListing) -> Self {
        Self {
            id: listing.id,
            topic: listing.topic,
            guest1: listing.guest1,
            guest2: listing.guest2,
            tone: listing.tone,
            response: listing.response,
            stars: listing.stars,
            conversation_type: listing.conversation_type,
            created_at: listing.created_at.to_rfc3339(),
            likes: listing.likes,
            comments: listing.comments,
        }
    }
}

/// Pagination block in a listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    /// Requested page, 1-based
    pub page: i64,
    /// Requested page size
    pub limit: i64,
    /// Total stored discussions, unfiltered
    pub total: i64,
    /// Whether pages remain past this one
    pub has_more: bool,
}

/// Response for listing discussions
#[derive(Debug, Serialize, Deserialize)]
pub struct ListDiscussionsResponse {
    /// Whether the listing succeeded
    pub success: bool,
    /// Failure description, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Discussions for the requested page
    pub discussions: Vec<DiscussionEntry>,
    /// Pagination details
    pub pagination: Pagination,
}

impl ListDiscussionsResponse {
    /// Failure shape: empty listing with pagination reset to defaults
    fn failure(error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
            discussions: Vec::new(),
            pagination: Pagination {
                page: 1,
                limit: defaults::PAGE_SIZE,
                total: 0,
                has_more: false,
            },
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Discussion listing routes handler
pub struct DiscussionRoutes;

impl DiscussionRoutes {
    /// Create the discussion routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/discussions", get(Self::handle_list))
            .with_state(resources)
    }

    /// Handle GET /discussions - List stored dialogues with interaction counts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListDiscussionsQuery>,
    ) -> Response {
        let response = match Self::list_page(&resources, &query).await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to list discussions: {e}");
                ListDiscussionsResponse::failure(e.to_string())
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }

    async fn list_page(
        resources: &Arc<ServerResources>,
        query: &ListDiscussionsQuery,
    ) -> AppResult<ListDiscussionsResponse> {
        let page = parse_param(query.page.as_deref(), "page")?
            .unwrap_or(1)
            .max(1);
        let limit = parse_param(query.limit.as_deref(), "limit")?
            .unwrap_or(defaults::PAGE_SIZE)
            .max(0);
        let offset = (page - 1).saturating_mul(limit);
        let sort = query
            .sort_by
            .as_deref()
            .map_or(DiscussionSort::Date, DiscussionSort::from_param);

        let manager = DiscussionManager::new(resources.database.pool().clone());
        let listings = manager.list(sort, limit, offset).await?;
        let total = manager.count().await?;

        Ok(ListDiscussionsResponse {
            success: true,
            error: None,
            discussions: listings.into_iter().map(Into::into).collect(),
            pagination: Pagination {
                page,
                limit,
                total,
                has_more: page.saturating_mul(limit) < total,
            },
        })
    }
}

/// Parse an optional numeric query parameter
fn parse_param(value: Option<&str>, name: &str) -> AppResult<Option<i64>> {
    value
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| AppError::invalid_input(format!("Invalid {name} parameter: {v}")))
        })
        .transpose()
}
