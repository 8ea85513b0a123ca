use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use healthtrack_api::config::{Config, ServiceRole};
use healthtrack_api::gateway::{self, GatewayState};
use healthtrack_api::{auth, db, handlers, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthtrack_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let app = match config.service_role {
        ServiceRole::Gateway => gateway_app(&config),
        ServiceRole::HealthData => health_data_app(config.clone()).await,
    };

    let app = app.layer(cors_layer(&config)).layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!(role = ?config.service_role, "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn gateway_app(config: &Config) -> Router {
    gateway::router(GatewayState::from_config(config))
}

async fn health_data_app(config: Arc<Config>) -> Router {
    let database_url = config
        .database_url
        .as_deref()
        .expect("DATABASE_URL must be set for the health-data role");
    let db = db::create_pool(database_url).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState { db, config };

    let public_routes = Router::new()
        .route("/healthz", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        // Typed entry endpoints
        .route("/health/exercise", post(handlers::entries::create_exercise))
        .route("/health/exercise", get(handlers::entries::list_exercise))
        .route("/health/diet", post(handlers::entries::create_diet))
        .route("/health/diet", get(handlers::entries::list_diet))
        .route("/health/sleep", post(handlers::entries::create_sleep))
        .route("/health/sleep", get(handlers::entries::list_sleep))
        // Unified endpoints
        .route("/health/data", post(handlers::unified::create_health_data))
        .route("/health/data", get(handlers::unified::list_health_data))
        // Statistics
        .route("/health/statistics", get(handlers::unified::get_statistics))
        // Health plans
        .route("/health/plan", post(handlers::plans::create_plan))
        .route("/health/plan", get(handlers::plans::list_plans))
        .route("/health/plan/:id", get(handlers::plans::get_plan))
        .route("/health/plan/:id", put(handlers::plans::update_plan))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = vec![config
            .frontend_url
            .parse::<axum::http::HeaderValue>()
            .unwrap()];
        // In dev, also allow LAN access (e.g. testing from another device)
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}
