//! Axum HTTP surface and request pipeline for voxdoc.

pub mod error;
pub mod pipeline;
pub mod routes;
pub mod scratch;
pub mod state;

use tracing::info;

pub use routes::router;
pub use state::AppState;

/// Bind and serve until ctrl-c.
pub async fn start_server(state: AppState, bind: &str, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("voxdoc listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
