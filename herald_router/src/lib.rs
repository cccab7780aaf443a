#![allow(missing_docs)]

mod request;
pub mod response;
mod router;
mod server;
mod static_files;

pub use request::HeraldRequest;
pub use router::{DEFAULT_BODY_LIMIT, HeraldHandler, HeraldRouter};
pub use server::{ServerError, serve, serve_listener};
pub use static_files::serve_file;

pub use bytes;
pub use http;
