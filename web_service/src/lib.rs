use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use capture_service::{IntakePipeline, RetrievalService, Validator};
use db_service::{LibsqlStore, MemoryStore, SharedStore};
use shared_lib::env_utils::{self, StoreBackend};

pub mod route_handlers;

pub struct AppState {
    pub intake: IntakePipeline,
    pub retrieval: RetrievalService,
    pub host_uri: String,
}
pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub fn new(store: SharedStore, validator: Validator, host_uri: String) -> Self {
        AppState {
            intake: IntakePipeline::new(store.clone(), validator),
            retrieval: RetrievalService::new(store),
            host_uri,
        }
    }

    pub fn webhook_url(&self) -> String {
        format!("{}/api/webhooks", self.host_uri.trim_end_matches('/'))
    }
}

/**
 * opens the store selected by STORE_BACKEND, creating the tables if needed
 **/
pub async fn open_store() -> anyhow::Result<SharedStore> {
    match env_utils::get_store_backend() {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, captured webhooks are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Libsql => {
            let path = env_utils::get_local_db_path();
            let store = match env_utils::get_libsql_remote() {
                Some((url, token)) => LibsqlStore::open_replica(&path, url, token)
                    .await
                    .context("Failed to open libsql replica")?,
                None => LibsqlStore::open_local(&path)
                    .await
                    .context("Failed to open local libsql database")?,
            };
            tracing::info!("Storing webhooks in {}", path);
            Ok(Arc::new(store))
        }
    }
}

/**
 * main router for the app, html views plus the healthcheck
 * the capture and retrieval api is nested under /api
 **/
pub fn get_main_router(state: SharedAppState, max_body_bytes: usize) -> Router {
    tracing::debug!("initializing router(s) ...");

    Router::new()
        .route("/", get(route_handlers::home::handler))
        .route(
            "/webhooks/:webhook_id",
            get(route_handlers::webhook_detail::handler),
        )
        .route("/healthcheck", get(|| async { "Ok" }))
        .nest("/api", get_api_router())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/**
 * router for the json api
 **/
fn get_api_router() -> Router<SharedAppState> {
    Router::new()
        .route(
            "/webhooks",
            post(route_handlers::capture::handler).get(route_handlers::webhooks::list_handler),
        )
        .route(
            "/webhooks/:webhook_id",
            get(route_handlers::webhooks::get_handler),
        )
}
