use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use buddy_match::config::{LoggingSettings, Settings, StorageBackend};
use buddy_match::core::{ConnectionManager, Matcher};
use buddy_match::routes::{self, AppState};
use buddy_match::services::{CacheManager, ConnectionStore, InMemoryStore, PostgresClient, ProfileStore};
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// RUST_LOG wins over the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // Logging comes up even when the config is broken, so the failure is reported
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .with_overrides(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok());
    init_logging(&logging);

    info!("Starting Buddy Match service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io_error("Configuration error", e)
    })?;

    info!("Configuration loaded successfully");

    let (profiles, connection_store): (Arc<dyn ProfileStore>, Arc<dyn ConnectionStore>) =
        match settings.storage.backend {
            StorageBackend::Postgres => {
                let postgres = Arc::new(
                    PostgresClient::from_settings(
                        &settings.database.url,
                        settings.database.max_connections,
                        settings.database.min_connections,
                        settings.database.acquire_timeout_secs,
                        settings.database.idle_timeout_secs,
                    )
                    .await
                    .map_err(|e| {
                        error!("Failed to connect to PostgreSQL: {}", e);
                        io_error("PostgreSQL connection error", e)
                    })?,
                );
                info!(
                    "PostgreSQL store initialized (max: {} connections)",
                    settings.database.max_connections.unwrap_or(10)
                );
                (
                    postgres.clone() as Arc<dyn ProfileStore>,
                    postgres as Arc<dyn ConnectionStore>,
                )
            }
            StorageBackend::Memory => {
                let store = match &settings.storage.seed_file {
                    Some(path) => InMemoryStore::from_seed_file(path).map_err(|e| {
                        error!("Failed to seed in-memory store: {}", e);
                        io_error("Seed error", e)
                    })?,
                    None => InMemoryStore::new(),
                };
                warn!("Using in-memory store; data is lost on restart");
                let store = Arc::new(store);
                (
                    store.clone() as Arc<dyn ProfileStore>,
                    store as Arc<dyn ConnectionStore>,
                )
            }
        };

    // Redis is optional, the L1 cache works on its own
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match &settings.cache.redis_url {
        Some(redis_url) => match CacheManager::new(redis_url, l1_cache_size, cache_ttl).await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to connect to Redis ({}), running with L1 cache only", e);
                CacheManager::local_only(l1_cache_size, cache_ttl)
            }
        },
        None => CacheManager::local_only(l1_cache_size, cache_ttl),
    };

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, redis: {})",
        l1_cache_size,
        cache_ttl,
        cache.has_shared_tier()
    );

    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights)
        .with_limits(settings.matching.min_score, settings.matching.limit);

    info!("Matcher initialized with weights: {:?}", weights);

    let app_state = AppState {
        profiles: profiles.clone(),
        connections: ConnectionManager::new(profiles, connection_store),
        cache: Arc::new(cache),
        matcher,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
