use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use http::{Response, StatusCode};

use crate::response;
use herald_utils::content_type_for;

/// Read `relative` below `root` and answer with the matching content type.
///
/// Paths that try to leave `root` are answered like missing files.
pub async fn serve_file(root: &Path, relative: &str) -> Response<Bytes> {
    let Some(file_path) = resolve(root, relative) else {
        return response::text(StatusCode::NOT_FOUND, "File not found");
    };

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let extension = file_path.extension().and_then(|s| s.to_str());
            response::with_content_type(StatusCode::OK, content_type_for(extension), content)
        }
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
            response::text(StatusCode::NOT_FOUND, "File not found")
        }
        Err(err) => {
            tracing::error!(path = %file_path.display(), "error reading file: {err}");
            response::text(StatusCode::INTERNAL_SERVER_ERROR, "Error reading file")
        }
    }
}

fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut file_path = root.to_path_buf();
    let mut depth = 0;

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains('\\') || s.contains(':') => return None,
            s => {
                file_path.push(s);
                depth += 1;
            }
        }
    }

    (depth > 0).then_some(file_path)
}
