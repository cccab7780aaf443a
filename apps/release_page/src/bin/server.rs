//! Release page server
//!
//! Serves the server-rendered page, the release version document, the
//! greeting endpoint and the static and wasm assets.

#![allow(missing_docs)]
#![cfg(not(target_arch = "wasm32"))]

use std::sync::Arc;

use clap::Parser;
use release_page::cli::ServerArgs;
use release_page::logging;
use release_page::server::build_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = ServerArgs::parse();
    logging::init_logger(args.verbose);

    let config = args.server_config()?;
    tracing::info!(version = config.release.version(), "release version loaded");

    let router = Arc::new(build_router(config));

    println!("🚀 Starting release page server:");
    println!("   • Page: http://{}/", args.addr);
    println!("   • Static assets served from: {}", args.static_dir.display());
    println!("   • WASM client served from: {}", args.pkg_dir.display());

    herald_router::serve(args.addr, router).await?;
    Ok(())
}
