use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "maskserve", version)]
struct Cli {
    /// The path to the image to display.
    #[arg(long = "imagePath", alias = "image-path")]
    image_path: PathBuf,

    /// The port to run the app on.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Directory of static client files served for unmatched paths.
    #[arg(long, default_value = "./client")]
    static_dir: PathBuf,

    /// Directory mask files are written to.
    #[arg(long, default_value = ".")]
    mask_dir: PathBuf,

    /// Largest accepted mask upload, in bytes.
    #[arg(long, default_value_t = 64 * 1024 * 1024)]
    max_mask_bytes: usize,

    /// Write a fully opaque mask at startup if none exists yet.
    #[arg(long, default_value_t = false)]
    init_mask: bool,
}

impl Cli {
    fn into_opts(self) -> maskserve::ServerOpts {
        let mut opts = maskserve::ServerOpts::new(self.image_path);
        opts.addr = SocketAddr::new(self.host, self.port);
        opts.mask_dir = self.mask_dir;
        opts.init_mask = self.init_mask;
        opts.router = maskserve::RouterOpts {
            static_dir: self.static_dir,
            max_mask_bytes: self.max_mask_bytes,
        };
        opts
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    maskserve::serve(cli.into_opts()).await
}
