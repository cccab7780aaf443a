use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::release::{ConfigError, ReleaseVersion};
use crate::server::ServerConfig;

/// Serve the release page with server-side rendering.
#[derive(Debug, Parser)]
#[command(name = "release-page")]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// Release version document; the bundled one is used when omitted
    #[arg(long, value_name = "PATH")]
    pub version_file: Option<PathBuf>,

    /// Directory served at /static
    #[arg(long, default_value = "apps/release_page/assets")]
    pub static_dir: PathBuf,

    /// wasm-bindgen output served at /pkg
    #[arg(long, default_value = "pkg")]
    pub pkg_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerArgs {
    /// Load the release version once and freeze the server configuration.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let release = match &self.version_file {
            Some(path) => ReleaseVersion::load(path)?,
            None => ReleaseVersion::bundled()?,
        };

        Ok(ServerConfig {
            release,
            static_dir: self.static_dir.clone(),
            pkg_dir: self.pkg_dir.clone(),
        })
    }
}
