use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    foundation::error::{MaskError, MaskResult},
    mask::{codec::encode_mask, store::MaskStore},
    source::loader::ImageDescriptor,
};

/// Constant body of the `/join` placeholder.
pub const JOIN_BODY: &str = "Join";

/// Shared per-request state: the immutable source image and its mask store.
#[derive(Clone, Debug)]
pub struct AppState {
    pub descriptor: Arc<ImageDescriptor>,
    pub store: Arc<MaskStore>,
}

impl AppState {
    pub fn new(descriptor: ImageDescriptor, store: MaskStore) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            store: Arc::new(store),
        }
    }
}

/// Router options that are not part of the per-request state.
#[derive(Clone, Debug)]
pub struct RouterOpts {
    /// Directory served for every path not matched by an API route.
    pub static_dir: PathBuf,
    /// Largest accepted `PUT /mask` body in bytes.
    pub max_mask_bytes: usize,
}

impl Default for RouterOpts {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("client"),
            max_mask_bytes: 64 * 1024 * 1024,
        }
    }
}

pub fn build_routes(state: AppState, opts: &RouterOpts) -> Router {
    Router::new()
        .route("/image", get(get_image))
        .route(
            "/mask",
            get(get_mask)
                .put(put_mask)
                .layer(DefaultBodyLimit::max(opts.max_mask_bytes)),
        )
        .route("/join", get(join))
        .fallback_service(ServeDir::new(&opts.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn join() -> &'static str {
    JOIN_BODY
}

async fn get_image(State(state): State<AppState>) -> Response {
    let d = &state.descriptor;
    (
        [(header::CONTENT_TYPE, d.format.mime_type())],
        d.raw_bytes.clone(),
    )
        .into_response()
}

async fn get_mask(State(state): State<AppState>) -> Response {
    let result = run_blocking(state, |store, descriptor| {
        let mask = store.read(descriptor)?;
        encode_mask(&mask)
    })
    .await;

    match result {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(MaskError::NotFound(msg)) => {
            tracing::debug!(%msg, "mask requested before first write");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "can't serve mask");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn put_mask(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "could not read mask body");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match run_blocking(state, move |store, descriptor| store.write(descriptor, &body)).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(MaskError::Decode(msg)) => {
            tracing::warn!(%msg, "rejected mask upload");
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "can't persist mask");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Run a store operation on the blocking pool; disk I/O and PNG coding never run on the
/// async workers.
async fn run_blocking<T, F>(state: AppState, f: F) -> MaskResult<T>
where
    T: Send + 'static,
    F: FnOnce(&MaskStore, &ImageDescriptor) -> MaskResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state.store, &state.descriptor))
        .await
        .map_err(|e| anyhow::anyhow!("mask task failed: {e}"))?
}

#[cfg(test)]
#[path = "../../tests/unit/http/routes.rs"]
mod tests;
