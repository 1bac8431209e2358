// ABOUTME: Audience interaction database operations for likes, comments, and ratings
// ABOUTME: Like toggling, comment storage, and rating upserts with average recomputation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};

/// One stored comment on a discussion
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub id: i64,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Audience interaction database operations manager
///
/// Wraps a `SqlitePool` to provide like, comment, and rating storage.
pub struct InteractionManager {
    pool: SqlitePool,
}

impl InteractionManager {
    /// Create a new interaction manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Likes
    // ========================================================================

    /// Toggle a user's like on a discussion
    ///
    /// Removes the like if one exists, otherwise records one. Returns the
    /// resulting state: `true` when the discussion is now liked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn toggle_like(&self, discussion_id: i64, user_id: &str) -> AppResult<bool> {
        if self.has_like(discussion_id, user_id).await? {
            sqlx::query(
                r"
                DELETE FROM discussion_likes
                WHERE discussion_id = $1 AND user_id = $2
                ",
            )
            .bind(discussion_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove like: {e}")))?;

            Ok(false)
        } else {
            sqlx::query(
                r"
                INSERT INTO discussion_likes (discussion_id, user_id, created_at)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(discussion_id)
            .bind(user_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to add like: {e}")))?;

            Ok(true)
        }
    }

    /// Check whether a user has liked a discussion
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn has_like(&self, discussion_id: i64, user_id: &str) -> AppResult<bool> {
        let row = sqlx::query(
            r"
            SELECT id FROM discussion_likes
            WHERE discussion_id = $1 AND user_id = $2
            ",
        )
        .bind(discussion_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check like: {e}")))?;

        Ok(row.is_some())
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Add a comment to a discussion, returning the comment id
    ///
    /// # Errors
    ///
    /// Returns an error if the content is blank or the database query fails
    pub async fn add_comment(
        &self,
        discussion_id: i64,
        user_id: &str,
        content: &str,
    ) -> AppResult<i64> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::invalid_input("Comment content is required"));
        }

        let result = sqlx::query(
            r"
            INSERT INTO discussion_comments (discussion_id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(discussion_id)
        .bind(user_id)
        .bind(content)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add comment: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// List comments on a discussion, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_comments(&self, discussion_id: i64) -> AppResult<Vec<CommentRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, content, created_at
            FROM discussion_comments
            WHERE discussion_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(discussion_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list comments: {e}")))?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    // ========================================================================
    // Ratings
    // ========================================================================

    /// Record a user's star rating and refresh the discussion's average
    ///
    /// Each user holds one rating per discussion; re-rating replaces it.
    /// The discussion's aggregate star score becomes the average of all
    /// ratings, rounded to two decimal places. Returns the new average.
    ///
    /// # Errors
    ///
    /// Returns an error if the stars are outside 1..=5 or a database query fails
    pub async fn rate(&self, discussion_id: i64, user_id: &str, stars: i32) -> AppResult<f64> {
        if !(1..=5).contains(&stars) {
            return Err(AppError::value_out_of_range(
                "Stars must be between 1 and 5",
            ));
        }

        sqlx::query(
            r"
            INSERT INTO discussion_ratings (discussion_id, user_id, stars, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (discussion_id, user_id) DO UPDATE SET
                stars = excluded.stars,
                created_at = excluded.created_at
            ",
        )
        .bind(discussion_id)
        .bind(user_id)
        .bind(stars)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record rating: {e}")))?;

        let row = sqlx::query(
            r"
            SELECT AVG(stars) AS avg_stars
            FROM discussion_ratings
            WHERE discussion_id = $1
            ",
        )
        .bind(discussion_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to average ratings: {e}")))?;

        let average: Option<f64> = row.get("avg_stars");
        let average = average.unwrap_or_else(|| f64::from(stars));
        let rounded = (average * 100.0).round() / 100.0;

        sqlx::query("UPDATE discussion_logs SET stars = $1 WHERE id = $2")
            .bind(rounded)
            .bind(discussion_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update discussion stars: {e}")))?;

        Ok(rounded)
    }

    // ========================================================================
    // Row Mapping
    // ========================================================================

    fn row_to_comment(row: &SqliteRow) -> AppResult<CommentRecord> {
        let created_at_str: String = row.get("created_at");
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AppError::database(format!("Invalid date: {e}")))?;

        Ok(CommentRecord {
            id: row.get("id"),
            user_id: row.get("user_id"),
            content: row.get("content"),
            created_at,
        })
    }
}
