use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, patch},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{HistoryService, ReferenceService, TicketService, UserService};
use crate::state::SharedState;
use metrics_exporter_prometheus::PrometheusHandle;

mod error;
mod history;
mod lookups;
mod observability;
mod references;
mod system;
mod tickets;
pub mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

use references::{Categories, Priorities};

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn ticket_service(&self) -> &Arc<dyn TicketService> {
        &self.shared.ticket_service
    }

    #[must_use]
    pub fn history_service(&self) -> &Arc<dyn HistoryService> {
        &self.shared.history_service
    }

    #[must_use]
    pub fn reference_service(&self) -> &Arc<dyn ReferenceService> {
        &self.shared.reference_service
    }

    #[must_use]
    pub fn user_service(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let api_router = create_api_router().with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route(
            "/tickets/{id}",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route("/tickets/{id}/status", patch(tickets::update_status))
        .route("/tickets/{id}/history", get(tickets::ticket_history))
        .route(
            "/ticket-history",
            get(history::list_history).post(history::create_history),
        )
        .route(
            "/ticket-history/{id}",
            get(history::get_history).put(history::update_history),
        )
        .route("/lookups/priorities", get(lookups::priorities))
        .route("/lookups/categories", get(lookups::categories))
        .route("/lookups/statuses", get(lookups::statuses))
        .route(
            "/priorities",
            get(references::list::<Priorities>).post(references::create::<Priorities>),
        )
        .route(
            "/priorities/{id}",
            get(references::get::<Priorities>)
                .put(references::update::<Priorities>)
                .delete(references::delete::<Priorities>),
        )
        .route(
            "/categories",
            get(references::list::<Categories>).post(references::create::<Categories>),
        )
        .route(
            "/categories/{id}",
            get(references::get::<Categories>)
                .put(references::update::<Categories>)
                .delete(references::delete::<Categories>),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/system/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
}
