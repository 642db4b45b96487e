use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use std::path::Path;
use tokio_util::io::ReaderStream;

use super::lookup::display_name;
use super::HashQuery;
use crate::error::ApiError;
use crate::server::AppState;

const NO_MATCH: &str = "No file matches this hash";

/// `GET /download` streams the indexed file as an attachment.
pub(crate) async fn download(
    State(state): State<AppState>,
    query: Option<Query<HashQuery>>,
) -> Result<Response, ApiError> {
    let hash = query
        .and_then(|Query(query)| query.normalized())
        .ok_or_else(|| ApiError::bad_request("Missing required query parameter: hash"))?;

    let path = state
        .index
        .get(&hash)
        .ok_or_else(|| ApiError::not_found(NO_MATCH))?;

    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::not_found("Indexed file no longer exists"));
        }
        Err(err) => {
            log::error!("Failed to open {} for download: {err}", path.display());
            return Err(ApiError::internal("Failed to open file"));
        }
    };
    let metadata = file.metadata().await.map_err(|err| {
        log::error!("Failed to stat {}: {err}", path.display());
        ApiError::internal("Failed to read file metadata")
    })?;
    if !metadata.is_file() {
        return Err(ApiError::not_found("Indexed file no longer exists"));
    }

    // Dropping the stream (finished or client gone) closes the file.
    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(path))
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(
            header::CONTENT_DISPOSITION,
            attachment_disposition(&display_name(path)),
        )
        .body(body)
        .map_err(|e| ApiError::internal(e.to_string()))
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "log" | "md" => "text/plain; charset=utf-8",
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "tgz" => "application/gzip",
        "tar" => "application/x-tar",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "woff2" => "font/woff2",
        "woff" => "font/woff",
        _ => "application/octet-stream",
    }
}

/// `Content-Disposition` value for `name`.
///
/// The quoted `filename` is restricted to printable ASCII; names outside it also get an
/// RFC 5987 `filename*` parameter carrying the exact UTF-8 name.
fn attachment_disposition(name: &str) -> String {
    let mut fallback = String::with_capacity(name.len());
    let mut ascii_only = true;
    for ch in name.chars() {
        match ch {
            '"' | '\\' => {
                fallback.push('\\');
                fallback.push(ch);
            }
            ' '..='~' => fallback.push(ch),
            _ => {
                ascii_only = false;
                fallback.push('_');
            }
        }
    }

    if ascii_only {
        format!("attachment; filename=\"{fallback}\"")
    } else {
        format!(
            "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
            urlencoding::encode(name)
        )
    }
}
