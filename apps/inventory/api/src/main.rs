use axum_helpers::server::{create_production_app, health_router};
use axum_helpers::{MongoSessionStore, spawn_expired_session_cleanup};
use core_config::tracing::{init_tracing, install_color_eyre};
use email::{EmailProvider, SmtpProvider, TemplateEngine};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use inventory_api::{api, config::Config, openapi, state::AppState};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    api::init_indexes(&db).await?;
    spawn_expired_session_cleanup(
        MongoSessionStore::new(&db),
        Duration::from_secs(config.session.cleanup_interval_secs),
    );

    let mailer: Arc<dyn EmailProvider> = Arc::new(SmtpProvider::new(config.smtp.clone())?);
    match mailer.health_check().await {
        Ok(()) => info!(host = %config.smtp.host, port = config.smtp.port, "SMTP server reachable"),
        Err(e) => warn!(
            host = %config.smtp.host,
            error = %e,
            "SMTP server unreachable; verification emails will fail until it is up"
        ),
    }
    let templates = TemplateEngine::new()?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state, mailer, templates);
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server).await?;
    let app = router.merge(health_router(state.config.app.clone()));

    info!("Starting Inventory API with graceful shutdown (30s timeout)");

    let server = state.config.server.clone();
    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        drop(state.mongo_client);
        info!("MongoDB connection closed successfully");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}
