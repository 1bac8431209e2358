// ABOUTME: Main library entry point for the Greenroom dialogue service
// ABOUTME: Provides dialogue generation, discussion storage, and audience interaction APIs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

#![deny(unsafe_code)]

//! # Greenroom Server
//!
//! A talk show dialogue generator: given two guest names, a topic, and a
//! tone, the server builds a prompt, forwards it to an external text
//! generation provider, persists the exchange, and returns the generated
//! dialogue to a browser front end. Stored dialogues can be browsed with
//! like/comment/rating interactions.
//!
//! ## Architecture
//!
//! - **Routes**: Thin axum handlers, one module per endpoint
//! - **Database**: `SQLite` managers for discussion logs and interactions
//! - **Llm**: Dialogue provider abstraction and the You.com implementation
//! - **Config**: Environment-sourced configuration built once at startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use greenroom_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Requires YOU_API_KEY and DATABASE_URL in the environment
//!     let config = ServerConfig::from_env()?;
//!     println!("Greenroom configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-sourced configuration built once at process start
pub mod config;

/// Application constants, defaults, and on-air fallback lines
pub mod constants;

/// `SQLite` storage managers for discussions and interactions
pub mod database;

/// Unified error handling with standard error codes
pub mod errors;

/// Dialogue provider abstraction and implementations
pub mod llm;

/// Structured logging initialization
pub mod logging;

/// HTTP middleware (CORS)
pub mod middleware;

/// HTTP route handlers, one module per endpoint
pub mod routes;

/// Server resources and the HTTP serve loop
pub mod server;
