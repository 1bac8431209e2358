// ABOUTME: Database bootstrap and schema migrations for the discussion store
// ABOUTME: Owns the SQLite pool; managers borrow it for per-domain operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! # Database Management
//!
//! Connection bootstrap and idempotent schema migrations for the four
//! discussion-store tables: logs, likes, comments, and ratings. Aggregate
//! counts (likes/comments per discussion) are never stored; they are derived
//! at read time by the managers in this module.

pub mod discussions;
pub mod interactions;

pub use discussions::{
    DiscussionListing, DiscussionLog, DiscussionManager, DiscussionSort, NewDiscussionLog,
};
pub use interactions::{CommentRecord, InteractionManager};

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

/// Database handle for the discussion store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };

        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for manager construction
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a migration statement fails.
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_discussion_logs().await?;
        self.migrate_interactions().await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Create the discussion log table
    async fn migrate_discussion_logs(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS discussion_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                topic TEXT NOT NULL,
                guest1 TEXT NOT NULL,
                guest2 TEXT NOT NULL,
                prompt TEXT NOT NULL,
                response TEXT NOT NULL,
                ai_name TEXT NOT NULL,
                stars REAL NOT NULL DEFAULT 5.0,
                tone TEXT NOT NULL DEFAULT '',
                conversation_type TEXT NOT NULL DEFAULT 'Parody',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_discussion_logs_created_at
             ON discussion_logs(created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create the like, comment, and rating tables
    async fn migrate_interactions(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS discussion_likes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                discussion_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (discussion_id, user_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS discussion_comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                discussion_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS discussion_ratings (
                discussion_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                stars INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (discussion_id, user_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_discussion_likes_discussion
             ON discussion_likes(discussion_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_discussion_comments_discussion
             ON discussion_comments(discussion_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_discussion_ratings_discussion
             ON discussion_ratings(discussion_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
