//! Scrumdeck server binary.
//!
//! Configuration comes from the environment:
//! - `SCRUMDECK_ADDR` — listen address, defaults to `127.0.0.1:8080`
//! - `RUST_LOG` — tracing filter, defaults to `info`

use scrumdeck::{ScrumdeckError, ScrumdeckServer};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<(), ScrumdeckError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("SCRUMDECK_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let server = ScrumdeckServer::builder().bind(&addr).build().await?;
    tracing::info!(%addr, "Scrumdeck listening");
    server.run().await
}
