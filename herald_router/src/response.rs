//! Small constructors for the responses handlers return.

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE, HeaderValue};
use http::{Method, Response, StatusCode};
use serde::Serialize;

pub fn with_content_type(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<Bytes> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Response<Bytes> {
    with_content_type(status, "text/plain; charset=utf-8", body)
}

pub fn html(body: impl Into<Bytes>) -> Response<Bytes> {
    with_content_type(StatusCode::OK, "text/html; charset=utf-8", body)
}

pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response<Bytes> {
    match serde_json::to_vec(value) {
        Ok(body) => with_content_type(status, "application/json", body),
        Err(err) => {
            tracing::error!("failed to serialize response body: {err}");
            internal_error()
        }
    }
}

pub fn not_found() -> Response<Bytes> {
    text(StatusCode::NOT_FOUND, "Not Found")
}

pub fn internal_error() -> Response<Bytes> {
    text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

pub fn payload_too_large() -> Response<Bytes> {
    text(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
}

pub fn method_not_allowed(allowed: &[Method]) -> Response<Bytes> {
    let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if let Ok(value) = HeaderValue::from_str(&allow) {
        response.headers_mut().insert(ALLOW, value);
    }
    response
}
