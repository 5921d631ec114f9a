use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voyago_api::bootstrap::ensure_bootstrap_admin;
use voyago_api::config::ServerConfig;
use voyago_api::router::build_app_router;
use voyago_api::state::AppState;
use voyago_db::Repositories;
use voyago_media::{CloudinaryHost, MediaHost, MediaRelay, StagingArea, UnconfiguredHost};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyago_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let (repos, pool) = match &config.database_url {
        Some(database_url) => {
            let pool = voyago_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            voyago_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            voyago_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            (Repositories::postgres(pool.clone()), Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store (data is lost on exit)");
            (Repositories::in_memory(), None)
        }
    };

    // --- Bootstrap admin ---
    if let Some(admin) = &config.bootstrap_admin {
        if let Err(e) = ensure_bootstrap_admin(&repos, admin).await {
            tracing::error!(error = %e, "Failed to create bootstrap admin");
        }
    }

    // --- Media host ---
    let host: Arc<dyn MediaHost> = match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!(cloud = %cloudinary.cloud_name, "Media uploads go to Cloudinary");
            Arc::new(CloudinaryHost::new(cloudinary.clone()))
        }
        None => {
            tracing::warn!("Cloudinary credentials not set, image uploads will fail");
            Arc::new(UnconfiguredHost)
        }
    };
    let media = MediaRelay::new(host, StagingArea::new(config.upload_dir.clone()));

    // --- App state ---
    let state = AppState {
        repos,
        pool,
        media,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
