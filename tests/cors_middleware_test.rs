// ABOUTME: End-to-end tests for CORS behavior on the public API surface
// ABOUTME: Verifies preflight handling and response headers under the wildcard default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::TestServer;

#[tokio::test]
async fn test_preflight_allows_any_origin_by_default() -> Result<()> {
    let server = TestServer::spawn().await?;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.url("/chat"))
        .header("origin", "http://studio.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let allow_methods = response
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(allow_methods.contains("POST"));

    Ok(())
}

#[tokio::test]
async fn test_simple_request_carries_cors_header() -> Result<()> {
    let server = TestServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(server.url("/health"))
        .header("origin", "http://studio.example.com")
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    Ok(())
}
