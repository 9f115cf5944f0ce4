pub mod client;
pub mod config;
pub mod error;
pub mod routes;

pub use client::ParseClient;
pub use config::{CorsPolicy, ServerConfig};
pub use error::{ApiError, ClientError, ServerError};
pub use routes::router;

use tokio::net::TcpListener;
use tracing::info;

/// Binds the configured address and serves until the process is stopped
pub async fn serve(config: ServerConfig) -> error::Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    serve_on(listener, config).await
}

/// Serves on an already bound listener
pub async fn serve_on(listener: TcpListener, config: ServerConfig) -> error::Result<()> {
    let app = router(&config)?;
    let local = listener.local_addr()?;
    info!("Pipeline parser listening on http://{}", local);
    info!("CORS: {}", config.cors);

    axum::serve(listener, app).await?;
    Ok(())
}
