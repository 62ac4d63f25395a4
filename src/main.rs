use enrollment_fees::config::Config;
use enrollment_fees::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("enrollment_fees=info,tower_http=info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr;

    tracing::info!(
        "Starting enrollment-fees v{} on {} (calendar offset {})",
        env!("CARGO_PKG_VERSION"),
        bind_addr,
        config.utc_offset
    );
    if config.submission_token.is_none() {
        tracing::warn!("ENROLLMENT_SUBMISSION_TOKEN not set; submission payloads carry no token");
    }

    let router = app(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
