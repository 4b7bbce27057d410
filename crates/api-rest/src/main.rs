//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging of the HTTP surface. The workspace's main `cds-run`
//! binary additionally loads a `.env` file before serving the same router.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the CDS REST API server
///
/// # Environment Variables
/// - `CDS_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CDS_BASE_URL`, `CDS_INTERACTION_CODES`, `CDS_STRICT_REFERENCES`, `CDS_EMIT_FULL_URLS`,
///   `CDS_CARE_PLAN_TITLE`: translator configuration
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the translator configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("cds_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr =
        std::env::var("CDS_REST_ADDR").unwrap_or_else(|_| api_rest::DEFAULT_REST_ADDR.into());
    let config = api_rest::translator_config_from_env()?;

    tracing::info!("-- Starting CDS REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, api_rest::router(config)).await?;

    Ok(())
}
