use clap::Parser;

use nowshowing::{cli, config, http, jellyfin};

/// Wait for the first Ctrl+C (graceful shutdown).
/// A second Ctrl+C while in-flight requests drain force-exits immediately.
async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nnowshowing: forced exit");
            std::process::exit(1);
        }
    });
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref())
        .and_then(|path| {
            match config::load_config(&path) {
                Ok(cfg) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}", e);
                    None
                }
            }
        });

    let config = config::Config::resolve(file_config, &args);

    if config.api_key.is_none() {
        tracing::warn!("No API key configured -- Jellyfin will likely reject requests");
    }

    let client = jellyfin::Jellyfin::new(&config.jellyfin_url, config.api_key.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("error: failed to build HTTP client: {}", e);
            std::process::exit(1);
        });

    let host = if config.localhost { "127.0.0.1" } else { "0.0.0.0" };
    let addr = format!("{}:{}", host, config.port);

    // Startup banner: flavor, bind address, upstream.
    tracing::info!(
        "nowshowing ({}) on http://{} -> {}",
        config.flavor.as_str(),
        addr,
        config.jellyfin_url
    );
    tracing::info!("Settings file: {}", config.settings_path.display());

    let state = http::state::AppState::new(client, config);
    let app = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("error: failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });

    // HTTP server drains in-flight requests via with_graceful_shutdown.
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        tracing::error!("HTTP server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Goodbye.");
}
