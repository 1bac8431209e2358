// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-sourced configuration built once at startup and injected everywhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Configuration module for the Greenroom server
//!
//! Configuration is read from the process environment exactly once at
//! startup, validated, and passed into the handlers as part of the shared
//! server resources. Handlers never read environment variables ad hoc.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ProviderConfig, ServerConfig,
};
