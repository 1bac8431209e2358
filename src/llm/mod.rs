// ABOUTME: Dialogue provider abstraction for pluggable text generation backends
// ABOUTME: Defines the provider contract and the error split between status and transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! # Dialogue Provider Interface
//!
//! The contract a text generation backend must implement to power the show.
//! Providers receive a fully rendered prompt and answer with a single block
//! of dialogue text.
//!
//! Soft failures inside a successful provider response (missing fields, empty
//! output) are substituted with placeholder lines by the provider itself.
//! `ProviderError` is reserved for calls that failed outright, so the caller
//! can choose the right on-air fallback for each failure class.

pub mod prompts;
mod youcom;

pub use prompts::build_dialogue_prompt;
pub use youcom::YouComProvider;

use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Failure of a provider call that never yielded usable text
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider answered with a non-success HTTP status
    #[error("provider returned HTTP {status}")]
    Status {
        /// Status code from the provider response
        status: u16,
    },

    /// Request never completed (connect failure, timeout, or broken body read)
    #[error("provider request failed: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Dialogue generation provider trait
///
/// Implement this trait to back the show with a different text generation
/// service. The design follows the async trait pattern for compatibility
/// with the tokio runtime.
#[async_trait]
pub trait DialogueProvider: Send + Sync {
    /// Provider identifier recorded with each generated dialogue
    fn name(&self) -> &'static str;

    /// Generate dialogue text for a rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
