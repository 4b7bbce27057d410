use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the CDS application
///
/// Loads `.env`, resolves the translator configuration once and serves the REST API.
///
/// # Environment Variables
/// - `CDS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CDS_BASE_URL`: namespace for resource full URLs (default: "http://anonymous.org/")
/// - `CDS_INTERACTION_CODES`: YAML file replacing the built-in interaction code table
/// - `CDS_STRICT_REFERENCES`: fail on interaction norms naming unknown recommendations
///   (default: true)
/// - `CDS_EMIT_FULL_URLS`: add `fullUrl` to card bundle entries (default: false)
/// - `CDS_CARE_PLAN_TITLE`: care plan title (default: "personalised care plan")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cds_run=info".parse()?)
                .add_directive("cds_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("CDS_REST_ADDR")
        .unwrap_or_else(|_| api_rest::DEFAULT_REST_ADDR.into())
        .parse()?;
    let config = api_rest::translator_config_from_env()?;

    tracing::info!("++ Starting CDS REST on {}", rest_addr);
    tracing::info!(
        "++ Base URL {}, strict references {}",
        config.base_url(),
        config.strict_references()
    );

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, api_rest::router(config)).await?;

    Ok(())
}
