//! WorkOn RBGA mock backend and client library.
//!
//! Implements the WorkOn RBGA approval-request REST contract: field
//! validation, an in-memory request store and canned/templated responses
//! for local testing, plus a [`client::WorkOnClient`] speaking the same
//! contract.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;
pub mod validate;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use store::RequestStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RequestStore>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the key for the auth layer
    let key_id = state.config.key_id.clone();

    // Authenticated API routes
    let api_routes = Router::new()
        .route("/createrequest/create", put(api::create_request))
        .route("/createdraftrequest/draft", put(api::create_draft_request))
        .route("/status/{key}", get(api::get_status))
        .route("/workitemdetails/{key}", post(api::workitem_details))
        .route("/workitemattachments/{key}", post(api::workitem_attachments))
        .route("/rbga/template", get(api::rbga_template))
        .route("/requests", get(api::list_requests))
        .layer(middleware::from_fn(move |req, next| {
            auth::key_id_auth_layer(key_id.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint describing the service and its operations.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Mock WorkOn RBGA API",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "rbga_operations": {
            "1": "PUT /createrequest/create - Create Request",
            "2": "PUT /createdraftrequest/draft - Create Draft Request",
            "3": "GET /status/<request_key> - Get Status",
            "4": "POST /workitemdetails/<request_key> - Get Request Details",
            "5": "POST /workitemattachments/<request_key> - Get Workitem Attachments"
        },
        "additional_endpoints": [
            "GET /rbga/template",
            "GET /requests",
            "GET /health"
        ]
    }))
}
