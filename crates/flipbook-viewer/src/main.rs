//! # Flipbook
//!
//! Interactive previewer for sprite sheet animations.
//!
//! Load a sheet, describe its clips (frame size, frame count, row, optional
//! key) and watch them play; held keys switch clips, the idle clip plays
//! otherwise.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod input;
mod renderer;
mod session;
mod timing;
mod ui;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("flipbook=info".parse()?))
        .init();

    info!("Flipbook starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    app::run()?;

    info!("Flipbook shutdown complete");
    Ok(())
}
