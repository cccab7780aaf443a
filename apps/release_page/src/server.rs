//! Routes of the release page server.

use std::path::PathBuf;
use std::sync::Arc;

use herald::{PageShell, View};
use herald_router::bytes::Bytes;
use herald_router::http::{Response, StatusCode};
use herald_router::{HeraldRequest, HeraldRouter, response};
use serde_json::json;

use crate::app::{App, ROOT_ID};
use crate::greet::{self, GreetResponse};
use crate::release::ReleaseVersion;

pub const PAGE_TITLE: &str = "Release Page";
pub const STYLESHEET: &str = "/static/app.css";
/// ES module emitted by `wasm-pack build --target web`.
pub const CLIENT_MODULE: &str = "/pkg/release_page.js";

/// Everything the request handlers need; immutable once the server starts.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub release: ReleaseVersion,
    pub static_dir: PathBuf,
    pub pkg_dir: PathBuf,
}

/// Server-render the page for `release`.
pub fn render_page(release: &ReleaseVersion) -> Result<String, serde_json::Error> {
    let app = App::new(release.clone());
    let shell = PageShell::new(PAGE_TITLE)
        .root_id(ROOT_ID)
        .stylesheet(STYLESHEET)
        .init_data(release)?
        .module(CLIENT_MODULE);

    Ok(shell.render(&app.render()))
}

pub fn build_router(config: ServerConfig) -> HeraldRouter {
    let static_dir = config.static_dir.clone();
    let pkg_dir = config.pkg_dir.clone();
    let config = Arc::new(config);

    HeraldRouter::new()
        .get("/", {
            let config = Arc::clone(&config);
            move |_request| {
                let config = Arc::clone(&config);
                async move { index(&config) }
            }
        })
        .get("/version.json", {
            let config = Arc::clone(&config);
            move |_request| {
                let config = Arc::clone(&config);
                async move { response::json(StatusCode::OK, &config.release) }
            }
        })
        .post("/api/greet", {
            let config = Arc::clone(&config);
            move |request| {
                let config = Arc::clone(&config);
                async move { greet_handler(&config, &request) }
            }
        })
        .static_dir("/static", static_dir)
        .static_dir("/pkg", pkg_dir)
}

fn index(config: &ServerConfig) -> Response<Bytes> {
    match render_page(&config.release) {
        Ok(page) => response::html(page),
        Err(err) => {
            tracing::error!("failed to render page: {err}");
            response::internal_error()
        }
    }
}

fn greet_handler(config: &ServerConfig, request: &HeraldRequest) -> Response<Bytes> {
    let result = greet::parse_event(request.body())
        .and_then(|event| greet::greet(event.as_ref(), &config.release));

    match result {
        Ok(message) => response::json(StatusCode::OK, &GreetResponse { message }),
        Err(err) => {
            tracing::debug!("rejected greet request: {err}");
            response::json(StatusCode::BAD_REQUEST, &json!({ "error": err.to_string() }))
        }
    }
}
