// ABOUTME: HTTP middleware for the dialogue service
// ABOUTME: Provides CORS configuration for browser clients

pub mod cors;

// CORS configuration
pub use cors::setup_cors;
