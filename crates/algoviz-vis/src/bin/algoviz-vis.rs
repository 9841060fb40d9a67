//! Algorithm walkthrough server
//!
//! Generate the configured run and serve playback controls for it.

use algoviz_vis::{Session, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoviz_vis=info,algoviz_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;
    tracing::info!(
        algorithm = config.algorithm.id(),
        speed_ms = config.playback.default_speed.as_millis(),
        "Starting algorithm walkthrough server"
    );

    let session = Session::new(&config)?;
    let server = VisServer::new(session);
    server.serve(config.addr).await?;

    Ok(())
}
