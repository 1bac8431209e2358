// ABOUTME: Server binary for the talk show dialogue service
// ABOUTME: Loads configuration, connects storage and the provider, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Greenroom Project

//! # Greenroom Server Binary
//!
//! Starts the dialogue generation HTTP server. Configuration comes from the
//! environment (`YOU_API_KEY` and `DATABASE_URL` are required); the port can
//! be overridden on the command line.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use greenroom_server::{
    config::ServerConfig,
    database::Database,
    llm::YouComProvider,
    logging,
    server::{HttpServer, ServerResources},
};
use tracing::info;

#[derive(Parser)]
#[command(name = "greenroom-server")]
#[command(about = "Greenroom - talk show dialogue generation service")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Greenroom dialogue server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized: {}", config.database.url);

    let config = Arc::new(config);
    let provider = Arc::new(YouComProvider::new(&config.provider)?);
    let resources = Arc::new(ServerResources::new(database, provider, config));

    HttpServer::new(resources).run().await
}
