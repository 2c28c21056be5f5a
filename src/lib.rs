//! Bookshelf application library
//!
//! Wires the project modules into the kernel registry and runs the HTTP server.

pub mod modules;
pub mod utils;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Build a registry holding every project module
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Run the full module lifecycle around the HTTP server
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, &settings)
        .await
        .context("HTTP server terminated with an error");

    // Stop modules even when the server failed, then report the first error.
    let stopped = registry.stop_modules().await;
    served?;
    stopped?;

    tracing::info!("bookshelf shut down cleanly");
    Ok(())
}
