//! # Courtside CLI
//!
//! Terminal front end for the booking client. Every command is bound to one of
//! the client's pages and is only run when the current session may open that
//! page.

use std::sync::Arc;

use chrono::Local;
use courtside_client::config::ClientConfig;
use eyre::Result;
use tracing::debug;

pub mod commands;
pub mod handlers;
pub mod render;

use crate::{commands::Cli, handlers::HandlerContext};

/// Restores the session, runs one command and prints what it produced.
pub async fn run(cli: Cli, config: ClientConfig) -> Result<()> {
    let (api, session) = courtside_client::connect(&config)?;
    debug!(api_url = %config.api_url, "Client ready");

    let ctx = HandlerContext {
        api: Arc::clone(&api),
        session,
        today: Local::now().date_naive(),
        lookahead_days: config.lookahead_days,
    };

    let output = handlers::dispatch(&ctx, cli.command).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
