//! Direct streaming with HTTP range requests.
//!
//! Serves media files directly with support for HTTP range requests.

use axum::{
    body::Body,
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use mediacycle_common::{paths::content_type_for, Error};
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::server::error::AppError;

/// Serve a file under the media root, honouring a `Range` header.
///
/// `file_path` must already be resolved and contained. A file that vanished
/// since it was resolved answers 404.
pub async fn stream_file(file_path: &Path, headers: &HeaderMap) -> Result<Response, AppError> {
    let metadata = tokio::fs::metadata(file_path)
        .await
        .map_err(|_| Error::not_found("file"))?;

    let file_size = metadata.len();

    // Parse range header if present
    let range = headers
        .get(header::RANGE)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| parse_range_header(s, file_size));

    let content_type = content_type_for(file_path);

    let mut file = File::open(file_path)
        .await
        .map_err(|_| Error::not_found("file"))?;

    let builder = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::ACCEPT_RANGES, "bytes");

    let response = match range {
        Some((start, end)) => {
            // Partial content response
            let length = end - start + 1;

            file.seek(SeekFrom::Start(start))
                .await
                .map_err(Error::from)?;

            let body = Body::from_stream(ReaderStream::new(file.take(length)));

            builder
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_LENGTH, length.to_string())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                )
                .body(body)
        }
        None => {
            let body = Body::from_stream(ReaderStream::new(file));

            builder
                .status(StatusCode::OK)
                .header(header::CONTENT_LENGTH, file_size.to_string())
                .body(body)
        }
    };

    response.map_err(|e| Error::internal(format!("failed to build response: {}", e)).into())
}

/// Parse HTTP Range header.
///
/// Supports formats:
/// - bytes=0-499
/// - bytes=500-999
/// - bytes=500-
/// - bytes=-500 (last 500 bytes)
///
/// Anything else, including an unsatisfiable range, falls back to the full
/// file.
fn parse_range_header(header: &str, file_size: u64) -> Option<(u64, u64)> {
    let header = header.strip_prefix("bytes=")?;
    if file_size == 0 {
        return None;
    }

    let (start, end) = header.split_once('-')?;
    let (start, end) = (start.trim(), end.trim());

    match (start.is_empty(), end.is_empty()) {
        // bytes=-500 (last 500 bytes)
        (true, false) => {
            let suffix_len: u64 = end.parse().ok()?;
            if suffix_len == 0 {
                return None;
            }
            Some((file_size.saturating_sub(suffix_len), file_size - 1))
        }
        // bytes=500- (from 500 to end)
        (false, true) => {
            let start: u64 = start.parse().ok()?;
            (start < file_size).then_some((start, file_size - 1))
        }
        // bytes=0-499
        (false, false) => {
            let start: u64 = start.parse().ok()?;
            let end: u64 = end.parse().ok()?;
            let end = end.min(file_size - 1);
            (start <= end).then_some((start, end))
        }
        // bytes=- (invalid)
        (true, true) => None,
    }
}
