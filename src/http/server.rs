use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use tokio::net::TcpListener;

use crate::{
    http::routes::{AppState, RouterOpts, build_routes},
    mask::store::MaskStore,
    source::loader::load_image,
};

/// Startup options for [`serve`].
#[derive(Clone, Debug)]
pub struct ServerOpts {
    /// Source image to serve and mask.
    pub image_path: PathBuf,
    /// Listen address.
    pub addr: SocketAddr,
    /// Directory mask files are written to.
    pub mask_dir: PathBuf,
    /// Write the fully opaque mask at startup when none exists yet.
    pub init_mask: bool,
    /// Static directory and body limits.
    pub router: RouterOpts,
}

impl ServerOpts {
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            mask_dir: PathBuf::from("."),
            init_mask: false,
            router: RouterOpts::default(),
        }
    }
}

/// Load the source image, then serve until Ctrl-C.
///
/// Any failure before the listener is bound is fatal and returned to the caller.
pub async fn serve(opts: ServerOpts) -> anyhow::Result<()> {
    let descriptor = load_image(&opts.image_path)
        .with_context(|| format!("unable to load image '{}'", opts.image_path.display()))?;

    let store = MaskStore::new(&opts.mask_dir);
    if opts.init_mask && store.ensure_default(&descriptor)? {
        tracing::info!(path = %store.mask_path(&descriptor).display(), "initialized default mask");
    }

    let app = build_routes(AppState::new(descriptor, store), &opts.router);

    let listener = TcpListener::bind(opts.addr)
        .await
        .with_context(|| format!("bind {}", opts.addr))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
