use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{Ruleset, RulesetLoader, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("payroll_engine=debug,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().context("failed to read server settings")?;

    let ruleset = match &config.ruleset_dir {
        Some(dir) => RulesetLoader::load(dir)
            .with_context(|| format!("failed to load ruleset from {}", dir.display()))?
            .into_ruleset(),
        None => Ruleset::default(),
    };
    info!(
        ruleset = %ruleset.metadata().code,
        pay_grades = ruleset.pay_grades().len(),
        "Ruleset loaded"
    );

    let app = create_router(AppState::new(ruleset)).layer(TraceLayer::new_for_http());

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!("Payroll engine listening on http://{}", addr);

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
