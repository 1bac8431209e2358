// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database setup, a scripted provider double, and a real HTTP server harness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
#![allow(missing_docs)]
//! Shared test utilities for `greenroom_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use async_trait::async_trait;
use greenroom_server::{
    config::{
        CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ProviderConfig,
        ServerConfig,
    },
    database::{Database, DiscussionManager, InteractionManager, NewDiscussionLog},
    llm::{DialogueProvider, ProviderError},
    server::{HttpServer, ServerResources},
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Scripted Provider Double
// ============================================================================

/// One scripted outcome for the provider double
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Provider call succeeds with this text
    Text(String),
    /// Provider answers a non-success HTTP status
    Status(u16),
    /// Provider call never completes
    Transport(String),
}

/// Dialogue provider double driven by a queue of scripted replies
///
/// Each `generate` call consumes the next queued reply; an empty queue
/// yields a fixed line so incidental calls do not fail the test.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
}

impl ScriptedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
        })
    }

    pub fn push_text(&self, text: &str) {
        self.push(ScriptedReply::Text(text.to_owned()));
    }

    pub fn push_status(&self, status: u16) {
        self.push(ScriptedReply::Status(status));
    }

    pub fn push_transport(&self, message: &str) {
        self.push(ScriptedReply::Transport(message.to_owned()));
    }

    fn push(&self, reply: ScriptedReply) {
        self.replies.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl DialogueProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted-test-provider"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Status(status)) => Err(ProviderError::Status { status }),
            Some(ScriptedReply::Transport(message)) => Err(ProviderError::Transport { message }),
            None => Ok("The guests nod politely.".to_owned()),
        }
    }
}

// ============================================================================
// Test Server Harness
// ============================================================================

/// Real HTTP server harness backed by a temp file database
pub struct TestServer {
    pub base_url: String,
    pub database: Database,
    pub provider: Arc<ScriptedProvider>,
    _temp_dir: TempDir,
}

impl TestServer {
    /// Spawn the full router on an OS-assigned localhost port
    pub async fn spawn() -> Result<Self> {
        init_test_logging();

        let temp_dir = tempfile::tempdir()?;
        let db_path = temp_dir.path().join("greenroom_test.db");
        let database = Database::new(&format!("sqlite:{}", db_path.display())).await?;
        let provider = ScriptedProvider::new();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let config = Arc::new(test_config(port, &db_path));
        let resources = Arc::new(ServerResources::new(
            database.clone(),
            provider.clone() as Arc<dyn DialogueProvider>,
            config,
        ));

        let router = HttpServer::new(resources).router();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{port}"),
            database,
            provider,
            _temp_dir: temp_dir,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn discussions(&self) -> DiscussionManager {
        DiscussionManager::new(self.database.pool().clone())
    }

    pub fn interactions(&self) -> InteractionManager {
        InteractionManager::new(self.database.pool().clone())
    }

    /// Insert a discussion log row directly, returning its id
    pub async fn seed_discussion(&self, topic: &str) -> Result<i64> {
        let id = self
            .discussions()
            .insert(&NewDiscussionLog {
                topic: topic.to_owned(),
                guest1: "Ada Lovelace".to_owned(),
                guest2: "Alan Turing".to_owned(),
                prompt: format!("TASK: Create a realistic dialogue about {topic}"),
                response: "A: Hello.\nB: Hello to you.".to_owned(),
                ai_name: "scripted-test-provider".to_owned(),
                tone: "witty".to_owned(),
                conversation_type: "Parody".to_owned(),
            })
            .await?;

        Ok(id)
    }
}

fn test_config(port: u16, db_path: &Path) -> ServerConfig {
    ServerConfig {
        http_port: port,
        log_level: LogLevel::Info,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::SQLite {
                path: db_path.to_path_buf(),
            },
        },
        provider: ProviderConfig {
            api_key: "test-api-key".to_owned(),
            agent: "express".to_owned(),
            base_url: "http://127.0.0.1:9/agents/runs".to_owned(),
        },
        cors: CorsConfig {
            allowed_origins: "*".to_owned(),
        },
    }
}

/// Standalone temp-file database for manager-level tests
pub async fn create_test_database() -> Result<(Database, TempDir)> {
    init_test_logging();
    let temp_dir = tempfile::tempdir()?;
    let db_path = temp_dir.path().join("greenroom_test.db");
    let database = Database::new(&format!("sqlite:{}", db_path.display())).await?;
    Ok((database, temp_dir))
}
