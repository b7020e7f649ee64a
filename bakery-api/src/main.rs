//! # Bakery API Server
//!
//! Serves the bakery storefront: menu, session cart, order submission,
//! photo gallery and the admin area.
//!
//! ## Startup
//!
//! 1. Load configuration from the environment
//! 2. Connect to PostgreSQL and apply migrations
//! 3. Seed the admin account and store settings
//! 4. Load the menu and start serving
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/bakery cargo run -p bakery-api
//! ```

use bakery_api::{
    app::{build_router, seed_admin, seed_settings, AppState},
    config::Config,
};
use bakery_shared::{
    catalog::Catalog,
    db::{migrations, pool},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bakery_api=debug,bakery_shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Bakery API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    if config.uses_default_admin_password() {
        tracing::warn!("ADMIN_PASSWORD is not set; using the built-in default password");
    }

    migrations::ensure_database_exists(&config.database.url).await?;
    let db = pool::create_pool(pool::PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    migrations::run_migrations(&db).await?;

    seed_admin(&db, &config.admin).await?;
    seed_settings(&db, &config.store).await?;

    let catalog = Catalog::load(config.storage.menu_path.as_deref())?;
    let bind_address = config.bind_address();

    let state = AppState::new(db.clone(), config, catalog);
    state.images.ensure_dir().await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
