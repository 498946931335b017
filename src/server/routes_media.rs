//! Media browsing routes.
//!
//! - `GET /` - redirect to the media root
//! - `GET /data/{path}` - file bytes, a viewer page, or an empty-directory page
//! - `GET /media_context?path={path}` - navigation context as JSON

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use mediacycle_common::Error;
use serde::Deserialize;

use super::error::AppError;
use super::pages;
use super::AppContext;
use crate::media::{parent_relative, NavigationContext};
use crate::streaming;

pub fn media_routes() -> Router<AppContext> {
    Router::new()
        .route("/data", get(serve_root))
        .route("/data/", get(serve_root))
        .route("/data/*path", get(serve_media))
        .route("/media_context", get(media_context))
}

#[derive(Debug, Deserialize)]
pub struct ContextQuery {
    #[serde(default)]
    pub path: String,
}

/// Run filesystem work off the async executor.
async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::new(Error::internal(format!("blocking task failed: {}", e))))
}

pub async fn index() -> Redirect {
    Redirect::to("/data/")
}

pub async fn serve_root(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    serve(ctx, String::new(), headers).await
}

pub async fn serve_media(
    State(ctx): State<AppContext>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    serve(ctx, path, headers).await
}

async fn serve(ctx: AppContext, raw: String, headers: HeaderMap) -> Result<Response, AppError> {
    let relative = ctx.sanitizer.sanitize(&raw);

    let sanitizer = ctx.sanitizer.clone();
    let requested = relative.clone();
    let target = blocking(move || sanitizer.resolve_and_contain(&requested)).await??;

    let is_file = tokio::fs::metadata(&target)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false);
    if is_file {
        return streaming::stream_file(&target, &headers).await;
    }

    let resolver = ctx.resolver.clone();
    let requested = relative.clone();
    let context = blocking(move || resolver.resolve(&requested)).await?;

    let page = match context {
        Some(context) => pages::viewer_page(&context),
        None => {
            let directory = relative.trim_matches('/');
            pages::empty_page(directory, parent_relative(directory).as_deref())
        }
    };
    Ok(page.into_response())
}

pub async fn media_context(
    State(ctx): State<AppContext>,
    Query(query): Query<ContextQuery>,
) -> Result<Json<NavigationContext>, AppError> {
    let relative = ctx.sanitizer.sanitize(&query.path);

    let result = blocking(move || {
        ctx.sanitizer.resolve_and_contain(&relative)?;
        ctx.resolver
            .resolve(&relative)
            .ok_or_else(|| Error::not_found("media context"))
    })
    .await
    .map_err(AppError::without_body)?;

    result
        .map(Json)
        .map_err(|e| AppError::new(e).without_body())
}
