use anyhow::Context;

use kennywood_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kennywood_observability::init();

    let config = ApiConfig::from_env()?;
    if config.jwt_secret_is_default() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let app = kennywood_api::app::build_app(&config)
        .await
        .context("failed to initialize record store")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
