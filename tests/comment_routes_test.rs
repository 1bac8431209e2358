// ABOUTME: End-to-end tests for the comment listing endpoint over real HTTP
// ABOUTME: Covers discussion_id validation and the fixed success/error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::TestServer;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn test_comments_require_discussion_id() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    for path in ["/comments", "/comments?discussion_id="] {
        let response = client.get(server.url(path)).send().await?;

        assert_eq!(response.status().as_u16(), 400, "path: {path}");
        let body: Value = response.json().await?;
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert_eq!(body["error"], "discussion_id is required");
    }

    Ok(())
}

#[tokio::test]
async fn test_comments_reject_non_numeric_discussion_id() -> Result<()> {
    let server = TestServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(server.url("/comments?discussion_id=abc"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert_eq!(body["error"], "discussion_id must be a number");

    Ok(())
}

#[tokio::test]
async fn test_comments_list_newest_first_with_count() -> Result<()> {
    let server = TestServer::spawn().await?;
    let id = server.seed_discussion("Commented show").await?;

    let interactions = server.interactions();
    interactions.add_comment(id, "early-bird", "First!").await?;
    sleep(Duration::from_millis(10)).await;
    interactions.add_comment(id, "night-owl", "Better late").await?;

    let response = reqwest::Client::new()
        .get(server.url(&format!("/comments?discussion_id={id}")))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);

    // The error key is present but null on success
    assert!(body.as_object().unwrap().contains_key("error"));
    assert!(body["error"].is_null());

    assert_eq!(body["data"]["count"], 2);
    let comments = body["data"]["comments"].as_array().unwrap();
    assert_eq!(comments[0]["content"], "Better late");
    assert_eq!(comments[0]["user_id"], "night-owl");
    assert_eq!(comments[1]["content"], "First!");
    assert!(!comments[0]["created_at"].as_str().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_comments_unknown_discussion_is_an_empty_success() -> Result<()> {
    let server = TestServer::spawn().await?;

    let response = reqwest::Client::new()
        .get(server.url("/comments?discussion_id=999"))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["count"], 0);
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_comments_discussion_id_tolerates_whitespace() -> Result<()> {
    let server = TestServer::spawn().await?;
    let id = server.seed_discussion("Padded id").await?;
    server
        .interactions()
        .add_comment(id, "fan", "Nice one")
        .await?;

    let response = reqwest::Client::new()
        .get(server.url(&format!("/comments?discussion_id=%20{id}%20")))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["count"], 1);

    Ok(())
}
