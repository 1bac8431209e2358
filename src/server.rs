// ABOUTME: Server resource wiring and the HTTP serve loop
// ABOUTME: Assembles the axum router from the route modules and binds the listening socket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Server assembly
//!
//! `ServerResources` owns the shared process state (database handle,
//! dialogue provider, configuration) behind `Arc` so route handlers can
//! clone cheaply. `HttpServer` turns those resources into a router and
//! serves it.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::ServerConfig,
    database::Database,
    llm::DialogueProvider,
    middleware::setup_cors,
    routes::{ChatRoutes, CommentRoutes, DiscussionRoutes, HealthRoutes, InteractionRoutes},
};

/// Shared resources for all route handlers
pub struct ServerResources {
    /// Shared database handle
    pub database: Arc<Database>,
    /// Dialogue generation backend
    pub provider: Arc<dyn DialogueProvider>,
    /// Process configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with shared ownership
    #[must_use]
    pub fn new(
        database: Database,
        provider: Arc<dyn DialogueProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            provider,
            config,
        }
    }
}

/// HTTP server for the dialogue service
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a new server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(ChatRoutes::routes(self.resources.clone()))
            .merge(DiscussionRoutes::routes(self.resources.clone()))
            .merge(CommentRoutes::routes(self.resources.clone()))
            .merge(InteractionRoutes::routes(self.resources.clone()))
            .merge(HealthRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(&self.resources.config))
    }

    /// Bind the configured port and serve until the process exits
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails
    pub async fn run(&self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.resources.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("HTTP server listening on {addr}");
        info!("  POST /chat         - dialogue generation");
        info!("  GET  /discussions  - paginated listings");
        info!("  GET  /comments     - comments for one discussion");
        info!("  POST /interactions - likes, comments, ratings");
        info!("  GET  /health       - liveness");
        info!("  GET  /ready        - readiness");

        axum::serve(listener, self.router())
            .await
            .context("HTTP server terminated")
    }
}
