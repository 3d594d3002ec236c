use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use medshare_api::database::DatabaseManager;
use medshare_api::handlers;
use medshare_api::middleware as mw;
use medshare_api::{config, is_production};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting medshare API in {:?} mode", config.environment);

    // Bootstrap tables; a missing database degrades /health instead of
    // aborting startup.
    if let Err(e) = DatabaseManager::ensure_schema().await {
        tracing::warn!("Schema bootstrap skipped: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("MEDSHARE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    if !is_production!() {
        println!("medshare API listening on http://{}", bind_addr);
    }

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_auth_routes())
        // Session-gated
        .merge(profile_routes())
        .merge(donor_routes())
        .merge(receiver_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(DefaultBodyLimit::max(config::config().api.max_request_size_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_auth_routes() -> Router {
    use handlers::public::auth;

    Router::new()
        .route("/registration", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
}

fn profile_routes() -> Router {
    // Profile image management is open to any authenticated role
    Router::new()
        .route("/upload_profile", post(handlers::profile::upload_profile))
        .route("/delete_profile_image", post(handlers::profile::delete_profile_image))
        .route_layer(from_fn(mw::require_session))
}

fn donor_routes() -> Router {
    use handlers::donor;

    Router::new()
        .route("/donor/dashboard", get(handlers::dashboard::dashboard))
        .route("/submit_donation", post(donor::donations::submit_donation))
        .route("/my_donations", get(donor::donations::my_donations))
        .route("/get_donor_stats", get(donor::stats::get_donor_stats))
        .route_layer(from_fn(mw::require_donor))
}

fn receiver_routes() -> Router {
    use handlers::receiver;

    Router::new()
        .route("/receiver/dashboard", get(handlers::dashboard::dashboard))
        .route("/request_medicine", post(receiver::requests::request_medicine))
        .route("/available_medicines", get(receiver::requests::available_medicines))
        .route("/my_requests", get(receiver::requests::my_requests))
        .route("/cancel_request", post(receiver::requests::cancel_request))
        .route("/get_receiver_stats", get(receiver::stats::get_receiver_stats))
        .route_layer(from_fn(mw::require_receiver))
}

fn admin_routes() -> Router {
    use handlers::admin;

    Router::new()
        .route("/admin/dashboard", get(handlers::dashboard::dashboard))
        .route("/admin/users", get(admin::users::list_users))
        .route("/update_request_status", post(admin::moderation::update_request_status))
        .route("/update_donation_status", post(admin::moderation::update_donation_status))
        .route("/update_user_status", post(admin::users::update_user_status))
        .route("/verify_user", post(admin::users::verify_user))
        .route("/verify_prescription", post(admin::moderation::verify_prescription))
        .route("/get_admin_stats", get(admin::stats::get_admin_stats))
        .route_layer(from_fn(mw::require_admin))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "message": "medshare API",
        "data": {
            "name": "medshare API",
            "version": version,
            "description": "Medicine donation marketplace backend",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/registration, /login, /logout (public)",
                "donor": "/donor/dashboard, /submit_donation, /my_donations, /get_donor_stats",
                "receiver": "/receiver/dashboard, /request_medicine, /available_medicines, /my_requests, /cancel_request, /get_receiver_stats",
                "admin": "/admin/dashboard, /admin/users, /update_request_status, /update_donation_status, /update_user_status, /verify_user, /verify_prescription, /get_admin_stats",
                "profile": "/upload_profile, /delete_profile_image (any authenticated role)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "message": "ok",
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
