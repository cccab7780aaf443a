use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, body::Incoming as IncomingBody};
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::{HeraldRequest, HeraldRouter, response};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[from] std::io::Error),
}

/// Bind `addr` and serve `router` until the accept loop fails.
pub async fn serve(addr: SocketAddr, router: Arc<HeraldRouter>) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve_listener(listener, router).await
}

/// Serve `router` on an already bound listener.
pub async fn serve_listener(
    listener: TcpListener,
    router: Arc<HeraldRouter>,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }

    loop {
        let (stream, peer) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);

        let service = service_fn(move |req| {
            let router = Arc::clone(&router);
            async move { dispatch(req, &router).await }
        });
        let conn: std::pin::Pin<Box<dyn Future<Output = hyper::Result<()>> + Send>> =
            Box::pin(http1::Builder::new().serve_connection(io, service));

        tokio::task::spawn(async move {
            if let Err(err) = conn.await {
                tracing::warn!(%peer, "error serving connection: {err:?}");
            }
        });
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

async fn dispatch(
    req: Request<IncomingBody>,
    router: &HeraldRouter,
) -> Result<Response<Full<Bytes>>, BoxError> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let body = match Limited::new(body, router.max_body_bytes()).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) if err.is::<LengthLimitError>() => {
            tracing::debug!(
                method = %parts.method,
                path = parts.uri.path(),
                limit = router.max_body_bytes(),
                "rejected oversized request body"
            );
            return Ok(response::payload_too_large().map(Full::new));
        }
        Err(err) => return Err(err),
    };

    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();
    let request = HeraldRequest::new(parts.method, path.as_str())
        .with_query(parts.uri.query())
        .with_body(body);

    let response = router.handle(request).await;

    tracing::debug!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );

    Ok(response.map(Full::new))
}
