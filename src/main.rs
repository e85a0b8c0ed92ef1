//! Sitecrew account server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

mod api;
mod auth;
mod config;
mod db;
mod entity;
mod error;
mod middleware;
mod migration;
mod models;
mod services;
mod store;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::ApiDoc;
use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppError;
use crate::migration::Migrator;
use crate::services::identity::{AuthAdminClient, IdentityAdmin};
use crate::services::stripe::{PaymentGateway, StripeClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL, SITECREW_JWT_SECRET and");
            error!("    SITECREW_SERVICE_KEY must be set to non-default values");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Sitecrew Account Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    // Connect to the database
    let pool = DbPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    info!("Database connection established");

    // Run migrations
    Migrator::up(pool.connection(), None)
        .await
        .expect("Failed to run migrations");
    info!("Database migrations complete");

    // Bearer-token verifier for the identity provider's access tokens
    let verifier = TokenVerifier::new(&config.auth);

    // Identity provider admin client (authoritative account deletion)
    let identity: Arc<dyn IdentityAdmin> =
        Arc::new(AuthAdminClient::new(&config.auth).expect("Failed to build identity client"));

    // Payment provider (optional; billing endpoints report CONFIG_ERROR
    // when unset)
    let gateway = match StripeClient::new(&config.stripe) {
        Ok(client) => PaymentGateway::new(Some(Arc::new(client))),
        Err(AppError::Configuration(_)) => {
            warn!("STRIPE_SECRET_KEY not set; billing endpoints are disabled");
            PaymentGateway::new(None)
        }
        Err(e) => {
            error!("Failed to build payment provider client: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address();
    let is_development = config.is_development();

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        // The API is consumed from arbitrary dashboard origins; preflight
        // allows any origin with the contract's header set.
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "x-client-info",
                "apikey",
                "content-type",
            ])
            .max_age(3600);

        App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(middleware::RequestLogger)
            // Add shared state
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(verifier.clone()))
            .app_data(web::Data::from(identity.clone()))
            .app_data(web::Data::new(gateway.clone()))
            // Configure API routes
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_account_routes)
                    .configure(api::configure_billing_routes),
            )
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
