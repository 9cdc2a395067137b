//! Facade contest server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use facade_contest_lib::api::{self, ApiDoc};
use facade_contest_lib::config::{Config, StorageBackend};
use facade_contest_lib::db::DbPool;
use facade_contest_lib::error::set_verbose_errors;
use facade_contest_lib::middleware::RequestLogger;
use facade_contest_lib::services::storage::AssetKind;
use facade_contest_lib::services::{ContestSite, DesignClient, Orchestrator, build_asset_store};

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    Config::from_env().is_ok()
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Facade Contest Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }
    set_verbose_errors(config.is_development());

    let pool = DbPool::new(&config)
        .await
        .map_err(|e| startup_error("Failed to initialize database", e))?;
    pool.run_migrations()
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;
    info!("Database migrations complete");

    let store = build_asset_store(&config.storage)
        .await
        .map_err(|e| startup_error("Failed to initialize asset storage", e))?;
    let client = DesignClient::from_settings(&config.generation)
        .map_err(|e| startup_error("Failed to initialize generation client", e))?;
    if config.generation.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; all designs will use local image processing");
    }

    let orchestrator = Orchestrator::new(
        pool.clone(),
        store,
        client,
        config.upload.clone(),
        config.generation.brand_name.clone(),
    );
    let site = ContestSite {
        public_url: config.public_url.clone(),
        brand_name: config.generation.brand_name.clone(),
    };

    let bind_address = config.bind_address();
    let cors_origin = config.cors_origin.clone();
    let is_development = config.is_development();
    let local_assets = match config.storage.backend {
        StorageBackend::Local => Some(config.storage.data_dir.clone()),
        StorageBackend::S3 => None,
    };

    info!(
        "Upload limits: {}MB max size, types: {}",
        config.upload.max_upload_size / 1024 / 1024,
        config.upload.allowed_mime_types.join(", ")
    );

    let worker_count = if is_development { 4 } else { num_cpus::get() };
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );

    let server_pool = pool.clone();
    let server = HttpServer::new(move || {
        let mut cors = if cors_origin == "*" {
            Cors::default().allow_any_origin()
        } else {
            Cors::default().allowed_origin(&cors_origin)
        };
        cors = cors
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);
        if is_development && cors_origin != "*" {
            cors = cors.allowed_origin("http://127.0.0.1:3000");
        }

        let mut app = App::new()
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(web::Data::new(orchestrator.clone()))
            .app_data(web::Data::new(site.clone()))
            .service(web::scope("/api").configure(api::configure_api))
            .service(
                SwaggerUi::new("/api-docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );

        if let Some(ref root) = local_assets {
            for kind in [AssetKind::Upload, AssetKind::Generated] {
                app = app.service(Files::new(
                    &format!("/{}", kind.dir()),
                    root.join(kind.dir()),
                ));
            }
        }

        app
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run();

    let result = server.await;

    info!("Server stopped, closing database pool");
    if let Err(e) = pool.close().await {
        warn!("Failed to close database pool: {}", e);
    }

    result
}
