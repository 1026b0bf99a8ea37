pub mod handler;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::content::Catalog;
use crate::site::Site;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no page at `{0}`")]
    NotFound(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::NotFound(path) = &self {
            return (StatusCode::NOT_FOUND, format!("Not found: {}", path)).into_response();
        }

        log::error!("{}", self);

        #[cfg(debug_assertions)]
        let message = format!("Error: {:?}", self);

        #[cfg(not(debug_assertions))]
        let message = "Internal Server Error".to_string();

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

pub struct AppState {
    pub config: SiteConfig,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(config: SiteConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn site(&self) -> Site<'_> {
        Site::new(&self.config, &self.catalog)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/schema.jsonld", get(handler::index_schema))
        .route("/{*path}", get(handler::page))
        .with_state(Arc::new(state))
}

pub async fn run(state: AppState, port: Option<&str>) -> Result<()> {
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port.unwrap_or("8080"));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not listen on {}", addr))?;

    log::info!("Serving at http://{}/", addr);
    axum::serve(listener, app)
        .await
        .context("could not start server")?;

    Ok(())
}
