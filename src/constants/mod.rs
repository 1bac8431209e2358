// ABOUTME: Application constants grouped by domain with environment-configurable values
// ABOUTME: Covers server defaults, provider protocol values, and on-air fallback lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Constants module
//!
//! Application constants organized by domain. Values that deployments
//! commonly override are exposed as environment-reading functions; protocol
//! values fixed by the external provider contract are plain constants.

use std::env;

/// Service name used in logs and startup banners
pub const SERVICE_NAME: &str = "greenroom-server";

/// Server version from Cargo.toml
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server identification defaults
pub mod defaults {
    /// Default HTTP listen port
    pub const HTTP_PORT: u16 = 8081;

    /// Default page size for discussion listings
    pub const PAGE_SIZE: i64 = 10;

    /// `user_id` recorded when a client supplies none
    pub const ANONYMOUS_USER_ID: &str = "anonymous";

    /// Conversation type recorded on every generated discussion
    pub const CONVERSATION_TYPE: &str = "Parody";
}

/// You.com agents API protocol constants
pub mod provider {
    /// Environment variable holding the You.com API key
    pub const YOU_API_KEY_ENV: &str = "YOU_API_KEY";

    /// Environment variable overriding the agents endpoint URL
    pub const YOU_API_URL_ENV: &str = "YOU_API_URL";

    /// Base URL for the agents API
    pub const API_BASE_URL: &str = "https://api.you.com/v1/agents/runs";

    /// Agent preset to run
    pub const DEFAULT_AGENT: &str = "express";

    /// Provider name recorded on every discussion log row
    pub const PROVIDER_NAME: &str = "you.com-express";

    /// Fixed outbound request timeout in seconds. The upstream handlers used
    /// values between 8 and 25; this deployment standardizes on 20.
    pub const TIMEOUT_SECS: u64 = 20;
}

/// User-facing substitution lines for provider failures
///
/// The chat endpoint never surfaces provider failures as HTTP errors; it
/// answers 200 with one of these lines in place of generated dialogue.
pub mod fallbacks {
    /// Provider answered 200 with an output item but no text field
    pub const NO_RESPONSE_TEXT: &str = "No response text.";

    /// Provider answered 200 with an absent or empty output list
    pub const LOST_FOR_WORDS: &str = "The guests are lost for words.";

    /// Provider answered 200 with a body that did not decode
    pub const TECHNICAL_GLITCH: &str = "Technical glitch in the studio.";

    /// Provider answered a non-success status; the code is embedded in the line
    #[must_use]
    pub fn backstage_error(status: u16) -> String {
        format!("Backstage Error ({status}).")
    }

    /// Transport-level failure reaching the provider (timeout, connect error)
    pub const SHOW_CANCELLED: &str = "The show was cancelled due to a server error.";
}

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env};

    /// Get HTTP server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::HTTP_PORT)
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    }

    /// Get deployment environment name from environment or default
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
    }

    /// Get the database connection string, if set
    #[must_use]
    pub fn database_url() -> Option<String> {
        env::var("DATABASE_URL").ok()
    }

    /// Get CORS allowed origins from environment or wildcard default
    #[must_use]
    pub fn cors_allowed_origins() -> String {
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into())
    }
}
