use matchit::{Match, Router};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::{Method, Response};

use crate::request::HeraldRequest;
use crate::response;
use crate::static_files::serve_file;

/// Public handler type used by routes
pub type HeraldHandler = Arc<
    dyn Fn(HeraldRequest) -> Pin<Box<dyn Future<Output = Response<Bytes>> + Send>> + Send + Sync,
>;

/// Request bodies larger than this are answered with `413` unless the router
/// is built with [`HeraldRouter::body_limit`].
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

struct RouteEntry {
    path: String,
    handlers: Vec<(Method, HeraldHandler)>,
}

/// Method and path router for the page server.
///
/// Paths use matchit syntax: `/users/{id}` captures a segment and
/// `/static/{*path}` captures the rest of the path.
pub struct HeraldRouter {
    router: Router<usize>,
    routes: Vec<RouteEntry>,
    body_limit: usize,
}

impl std::fmt::Debug for HeraldRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeraldRouter")
            .field("paths", &self.paths().collect::<Vec<_>>())
            .field("body_limit", &self.body_limit)
            .finish()
    }
}

impl HeraldRouter {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes: Vec::new(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Largest request body, in bytes, the server buffers for this router.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn max_body_bytes(&self) -> usize {
        self.body_limit
    }

    /// Register `handler` for `method` on `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern or conflicts with another
    /// route, or if the method is already registered for it.
    pub fn route<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(HeraldRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response<Bytes>> + Send + 'static,
    {
        let boxed_handler: HeraldHandler = Arc::new(move |request| Box::pin(handler(request)));

        let index = match self.routes.iter().position(|entry| entry.path == path) {
            Some(index) => index,
            None => {
                let index = self.routes.len();
                if let Err(e) = self.router.insert(path, index) {
                    panic!("Failed to insert route '{path}': {e}");
                }
                self.routes.push(RouteEntry {
                    path: path.to_owned(),
                    handlers: Vec::new(),
                });
                index
            }
        };

        let entry = &mut self.routes[index];
        if entry.handlers.iter().any(|(existing, _)| *existing == method) {
            panic!("Route '{path}' already has a {method} handler");
        }
        entry.handlers.push((method, boxed_handler));

        self
    }

    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(HeraldRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response<Bytes>> + Send + 'static,
    {
        self.route(Method::GET, path, handler)
    }

    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(HeraldRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response<Bytes>> + Send + 'static,
    {
        self.route(Method::POST, path, handler)
    }

    /// Serve files under `dir` at `{prefix}/{*path}`.
    pub fn static_dir(self, prefix: &str, dir: impl Into<PathBuf>) -> Self {
        let dir = Arc::new(dir.into());
        let pattern = format!("{}/{{*path}}", prefix.trim_end_matches('/'));

        self.get(&pattern, move |request| {
            let dir = Arc::clone(&dir);
            async move {
                let relative = request.param("path").unwrap_or_default();
                serve_file(&dir, relative).await
            }
        })
    }

    /// Registered path patterns, in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|entry| entry.path.as_str())
    }

    /// Dispatch a request to its handler.
    ///
    /// Unknown paths get `404`, known paths with an unregistered method `405`.
    pub async fn handle(&self, request: HeraldRequest) -> Response<Bytes> {
        let (index, params) = match self.router.at(request.path()) {
            Ok(Match { value, params }) => {
                let params_map: HashMap<String, String> = params
                    .iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                (*value, params_map)
            }
            Err(_) => return response::not_found(),
        };

        let Some(entry) = self.routes.get(index) else {
            return response::not_found();
        };

        let handler = entry
            .handlers
            .iter()
            .find(|(method, _)| method == request.method())
            .map(|(_, handler)| Arc::clone(handler));

        match handler {
            Some(handler) => handler(request.with_params(params)).await,
            None => {
                let allowed: Vec<Method> = entry
                    .handlers
                    .iter()
                    .map(|(method, _)| method.clone())
                    .collect();
                response::method_not_allowed(&allowed)
            }
        }
    }
}

impl Default for HeraldRouter {
    fn default() -> Self {
        Self::new()
    }
}
