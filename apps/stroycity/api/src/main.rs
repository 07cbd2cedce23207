use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_accounts::{AccountService, PgAccountRepository};
use domain_catalog::{LocalImageStore, PgItemRepository, storage::UPLOADS_URL_PREFIX};
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    let auth = axum_helpers::JwtAuth::new(&config.jwt);

    if let Some(admin) = &config.admin {
        let accounts = AccountService::new(
            PgAccountRepository::new(db.clone()),
            PgItemRepository::new(db.clone()),
            auth.clone(),
        );
        if accounts.ensure_admin(&admin.login, &admin.password).await? {
            info!(login = %admin.login, "Created bootstrap admin");
        }
    }

    let images = LocalImageStore::new(&config.uploads.dir)
        .await
        .map_err(|e| eyre::eyre!("Upload directory unavailable: {}", e))?;
    let upload_dir = images.dir().to_path_buf();

    let state = AppState {
        config,
        db,
        auth,
        images,
    };

    let api_routes = api::routes(&state);

    // create_router adds /api prefix, docs UIs and middleware
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.cors);

    // - /health: liveness with app name/version
    // - /ready: database check
    // - /uploads: stored item images
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()))
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(upload_dir));

    info!("Starting stroycity API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connection");
            match state.db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Stroycity API shutdown complete");
    Ok(())
}
