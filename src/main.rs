use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use status_api::routes;
use status_api::server::Server;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,status_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting status-api...");

    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve configuration (fail-fast)
    let resolved = Server::resolve_config()?;

    // Compose the API implementation; a declared endpoint without a handler
    // fails here, before any socket is opened
    let app = routes::build_router()?;

    // Bind the transport and run until a termination signal
    let listening = resolved.compose(app).bind().await?;
    listening.serve().await?;

    Ok(())
}
