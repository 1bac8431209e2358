// ABOUTME: Discussion log database operations for generated dialogue exchanges
// ABOUTME: Insert on generation, paginated listing with derived like/comment counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};

/// Sort order for discussion listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscussionSort {
    /// Stars, then like count, then recency
    Popular,
    /// Most recent first
    Date,
}

impl DiscussionSort {
    /// Parse from the `sort_by` query parameter; anything but `popular`
    /// falls back to date order.
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        if s.eq_ignore_ascii_case("popular") {
            Self::Popular
        } else {
            Self::Date
        }
    }
}

/// Fields for a new discussion log row
#[derive(Debug, Clone)]
pub struct NewDiscussionLog {
    /// Dialogue topic as submitted
    pub topic: String,
    /// First guest name
    pub guest1: String,
    /// Second guest name
    pub guest2: String,
    /// Full prompt sent to the provider (kept for audit)
    pub prompt: String,
    /// Generated dialogue text, or a substituted fallback line
    pub response: String,
    /// Provider identifier that produced the response
    pub ai_name: String,
    /// Requested emotional tone
    pub tone: String,
    /// Conversation type label surfaced as `type` in listings
    pub conversation_type: String,
}

/// One stored discussion log row
#[derive(Debug, Clone)]
pub struct DiscussionLog {
    pub id: i64,
    pub topic: String,
    pub guest1: String,
    pub guest2: String,
    pub prompt: String,
    pub response: String,
    pub ai_name: String,
    pub stars: f64,
    pub tone: String,
    pub conversation_type: String,
    pub created_at: DateTime<Utc>,
}

/// One listing row: a discussion log joined with derived interaction counts
#[derive(Debug, Clone)]
pub struct DiscussionListing {
    pub id: i64,
    pub topic: String,
    pub guest1: String,
    pub guest2: String,
    pub tone: String,
    pub response: String,
    pub stars: f64,
    pub conversation_type: String,
    pub created_at: DateTime<Utc>,
    /// Like count derived at read time
    pub likes: i64,
    /// Comment count derived at read time
    pub comments: i64,
}

/// Discussion log database operations manager
///
/// Wraps a `SqlitePool` to provide discussion log storage and listing.
pub struct DiscussionManager {
    pool: SqlitePool,
}

/// New rows start at the top of the star scale until the first rating lands
const INITIAL_STARS: f64 = 5.0;

impl DiscussionManager {
    /// Create a new discussion manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Insert a discussion log row, returning its id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn insert(&self, log: &NewDiscussionLog) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO discussion_logs (
                topic, guest1, guest2, prompt, response, ai_name, stars, tone,
                conversation_type, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&log.topic)
        .bind(&log.guest1)
        .bind(&log.guest2)
        .bind(&log.prompt)
        .bind(&log.response)
        .bind(&log.ai_name)
        .bind(INITIAL_STARS)
        .bind(&log.tone)
        .bind(&log.conversation_type)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert discussion log: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a discussion log by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get(&self, id: i64) -> AppResult<Option<DiscussionLog>> {
        let row = sqlx::query(
            r"
            SELECT id, topic, guest1, guest2, prompt, response, ai_name, stars,
                   tone, conversation_type, created_at
            FROM discussion_logs
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get discussion log: {e}")))?;

        row.map(|r| Self::row_to_log(&r)).transpose()
    }

    /// List discussions with derived like/comment counts
    ///
    /// Counts come from aggregated subqueries; discussions without
    /// interactions report zero rather than NULL.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list(
        &self,
        sort: DiscussionSort,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<DiscussionListing>> {
        let query = match sort {
            DiscussionSort::Popular => {
                r"
                SELECT d.id, d.topic, d.guest1, d.guest2, d.tone, d.response,
                       d.stars, d.conversation_type, d.created_at,
                       COALESCE(l.like_count, 0) AS likes,
                       COALESCE(c.comment_count, 0) AS comments
                FROM discussion_logs d
                LEFT JOIN (
                    SELECT discussion_id, COUNT(*) AS like_count
                    FROM discussion_likes
                    GROUP BY discussion_id
                ) l ON l.discussion_id = d.id
                LEFT JOIN (
                    SELECT discussion_id, COUNT(*) AS comment_count
                    FROM discussion_comments
                    GROUP BY discussion_id
                ) c ON c.discussion_id = d.id
                ORDER BY d.stars DESC, likes DESC, d.created_at DESC
                LIMIT $1 OFFSET $2
                "
            }
            DiscussionSort::Date => {
                r"
                SELECT d.id, d.topic, d.guest1, d.guest2, d.tone, d.response,
                       d.stars, d.conversation_type, d.created_at,
                       COALESCE(l.like_count, 0) AS likes,
                       COALESCE(c.comment_count, 0) AS comments
                FROM discussion_logs d
                LEFT JOIN (
                    SELECT discussion_id, COUNT(*) AS like_count
                    FROM discussion_likes
                    GROUP BY discussion_id
                ) l ON l.discussion_id = d.id
                LEFT JOIN (
                    SELECT discussion_id, COUNT(*) AS comment_count
                    FROM discussion_comments
                    GROUP BY discussion_id
                ) c ON c.discussion_id = d.id
                ORDER BY d.created_at DESC
                LIMIT $1 OFFSET $2
                "
            }
        };

        let rows = sqlx::query(query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list discussions: {e}")))?;

        rows.iter().map(Self::row_to_listing).collect()
    }

    /// Count all discussion log rows
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM discussion_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count discussions: {e}")))?;

        Ok(row.get("total"))
    }

    // ========================================================================
    // Row Mapping
    // ========================================================================

    fn row_to_log(row: &SqliteRow) -> AppResult<DiscussionLog> {
        let created_at_str: String = row.get("created_at");

        Ok(DiscussionLog {
            id: row.get("id"),
            topic: row.get("topic"),
            guest1: row.get("guest1"),
            guest2: row.get("guest2"),
            prompt: row.get("prompt"),
            response: row.get("response"),
            ai_name: row.get("ai_name"),
            stars: row.get("stars"),
            tone: row.get("tone"),
            conversation_type: row.get("conversation_type"),
            created_at: parse_timestamp(&created_at_str)?,
        })
    }

    fn row_to_listing(row: &SqliteRow) -> AppResult<DiscussionListing> {
        let created_at_str: String = row.get("created_at");

        Ok(DiscussionListing {
            id: row.get("id"),
            topic: row.get("topic"),
            guest1: row.get("guest1"),
            guest2: row.get("guest2"),
            tone: row.get("tone"),
            response: row.get("response"),
            stars: row.get("stars"),
            conversation_type: row.get("conversation_type"),
            created_at: parse_timestamp(&created_at_str)?,
            likes: row.get("likes"),
            comments: row.get("comments"),
        })
    }
}

/// Parse a stored RFC 3339 timestamp
fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid date: {e}")))
}
