// ABOUTME: Route module organization for the dialogue service HTTP endpoints
// ABOUTME: Provides route definitions organized by domain with thin handlers over managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! Route modules for the dialogue server
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the database managers and the dialogue provider. Handlers
//! build their response bodies directly because each endpoint carries its own
//! error shape on the wire.

/// Dialogue generation routes
pub mod chat;
/// Comment listing routes
pub mod comments;
/// Discussion listing routes
pub mod discussions;
/// Health check and readiness routes
pub mod health;
/// Like, comment, and rating action routes
pub mod interactions;

/// Dialogue generation route handlers
pub use chat::ChatRoutes;
/// Comment listing route handlers
pub use comments::CommentRoutes;
/// Discussion listing route handlers
pub use discussions::DiscussionRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Interaction route handlers
pub use interactions::InteractionRoutes;
