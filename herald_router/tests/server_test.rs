#![allow(missing_docs)]

use std::sync::Arc;

use herald_router::{HeraldRouter, response, serve_listener};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start(router: HeraldRouter) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = serve_listener(listener, Arc::new(router)).await;
    });

    addr
}

async fn send(addr: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

#[tokio::test]
async fn test_serves_routes_over_http() {
    let router = HeraldRouter::new()
        .get("/", |_| async { response::html("<h1>Home</h1>") })
        .post("/echo", |request| async move {
            response::text(http::StatusCode::OK, request.body().clone())
        });
    let addr = start(router).await;

    let home = send(
        addr,
        "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(home.starts_with("HTTP/1.1 200 OK"));
    assert!(home.contains("content-type: text/html; charset=utf-8"));
    assert!(home.ends_with("<h1>Home</h1>"));

    let echo = send(
        addr,
        "POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
    )
    .await;
    assert!(echo.starts_with("HTTP/1.1 200 OK"));
    assert!(echo.ends_with("hello"));
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let addr = start(HeraldRouter::new().get("/", |_| async { response::html("") })).await;

    let missing = send(
        addr,
        "GET /nope HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(missing.starts_with("HTTP/1.1 404 Not Found"));
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let router = HeraldRouter::new()
        .body_limit(16)
        .post("/echo", |request| async move {
            response::text(http::StatusCode::OK, request.body().clone())
        });
    let addr = start(router).await;

    let body = "x".repeat(32);
    let rejected = send(
        addr,
        &format!(
            "POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    )
    .await;
    assert!(rejected.starts_with("HTTP/1.1 413 Payload Too Large"));
    assert!(!rejected.contains(&body));

    let accepted = send(
        addr,
        "POST /echo HTTP/1.1\r\nHost: localhost\r\nContent-Length: 16\r\nConnection: close\r\n\r\nxxxxxxxxxxxxxxxx",
    )
    .await;
    assert!(accepted.starts_with("HTTP/1.1 200 OK"));
    assert!(accepted.ends_with("xxxxxxxxxxxxxxxx"));
}

#[test]
fn test_default_body_limit() {
    assert_eq!(HeraldRouter::new().max_body_bytes(), herald_router::DEFAULT_BODY_LIMIT);
    assert_eq!(herald_router::DEFAULT_BODY_LIMIT, 64 * 1024);
}
