use std::net::SocketAddr;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::Client;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use invodash::config::Config;
use invodash::db::{mongo, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config
    let config = Config::from_env().expect("Failed to load configuration");

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting invodash");

    // Connect once at startup; an unreachable database is fatal here,
    // there is no lazy retry later.
    let mut options = ClientOptions::parse(&config.mongo_uri)
        .await
        .expect("Invalid MONGO_URI");
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    let client = Client::with_options(options).expect("Failed to configure MongoDB client");
    let db = client.database(&config.db_name);
    db.run_command(doc! { "ping": 1 })
        .await
        .expect("Failed to connect to database");

    tracing::info!(database = %config.db_name, "Database connected");

    mongo::ensure_indexes(&db)
        .await
        .expect("Failed to create indexes");

    let addr = SocketAddr::new(config.host, config.port);
    let (app, _state) = invodash::build_app(Store::mongo(db), config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
