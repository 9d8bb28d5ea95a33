//! The medrec HTTP server.
//!
//! Role-based clinical records API: token auth with a revocation set,
//! role-conditional field projection, patient CRUD and partial updates,
//! and per-role aggregate reports.

pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod projection;
pub mod reports;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    http::{Method, header},
    routing::{delete, get, patch, post, put},
};
use medrec_auth::{AuthService, AuthState, TokenService, storage::UserStorage};
use medrec_db_memory::{InMemoryPatientStorage, InMemoryRevokedTokenStorage, InMemoryUserStorage};
use medrec_storage::PatientStorage;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;

pub use crate::config::{AuthSettings, LoggingConfig, ServerConfig};
pub use crate::observability::init_tracing;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub users: Arc<dyn UserStorage>,
    pub patients: Arc<dyn PatientStorage>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// Builds the application router with in-memory storage backends.
pub fn build_app(config: &AppConfig) -> Router {
    let service = AuthService::new(
        TokenService::new(config.token_config()),
        Arc::new(InMemoryRevokedTokenStorage::new()),
    );
    let state = AppState {
        auth: AuthState::new(Arc::new(service)),
        users: Arc::new(InMemoryUserStorage::new()),
        patients: Arc::new(InMemoryPatientStorage::new()),
    };
    router(state)
}

/// Assembles the route tree over an existing state.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/profile", get(handlers::auth::profile))
        .route("/users", get(handlers::auth::list_users));

    // Static segments must be registered alongside the {patient_id}
    // capture; axum prefers the static match.
    let patient_routes = Router::new()
        .route("/", post(handlers::patients::create_patient))
        .route("/search", get(handlers::patients::search_patients))
        .route("/dashboard-stats", get(handlers::patients::doctor_dashboard))
        .route("/nurse/stats", get(handlers::patients::nurse_stats))
        .route("/pending/vitals", get(handlers::patients::pending_vitals))
        .route(
            "/receptionist/stats",
            get(handlers::patients::receptionist_stats),
        )
        .route(
            "/appointments/today",
            get(handlers::patients::todays_appointments),
        )
        .route("/analytics", get(handlers::patients::analytics))
        .route("/{patient_id}", get(handlers::patients::get_patient))
        .route("/{patient_id}", put(handlers::patients::update_patient))
        .route("/{patient_id}", delete(handlers::patients::delete_patient))
        .route(
            "/{patient_id}/vitals",
            patch(handlers::patients::update_vitals),
        )
        .route(
            "/{patient_id}/appointments",
            patch(handlers::patients::update_appointment),
        )
        .route(
            "/{patient_id}/appointments",
            get(handlers::patients::get_patient_appointments),
        );

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/auth", auth_routes)
        .nest("/api/patients", patient_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
