use anyhow::Context;
use tokio::net::TcpListener;

use lorebook::bootstrap::build_state;
use lorebook::infrastructure::observability::{TracingConfig, init_tracing};
use lorebook::presentation::config::environment_from_env;
use lorebook::presentation::{Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = environment_from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let addr = settings.bind_address();
    let state = build_state(settings)
        .await
        .context("Failed to initialise services")?;

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
