use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::render::PageTemplate;
use crate::serve::{AppError, AppState};

const LD_JSON: &str = "application/ld+json";

pub async fn index(State(state): State<Arc<AppState>>) -> Result<PageTemplate, AppError> {
    page_template(&state, "/")
}

pub async fn index_schema(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    schema_response(&state, "/")
}

/// Serves `/<path>` as HTML and `/<path>/schema.jsonld` as the raw graph.
pub async fn page(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    match path.strip_suffix("/schema.jsonld") {
        Some(page_path) => schema_response(&state, page_path),
        None => Ok(page_template(&state, &path)?.into_response()),
    }
}

fn page_template(state: &AppState, path: &str) -> Result<PageTemplate, AppError> {
    let site = state.site();
    let page = site
        .page(path)
        .ok_or_else(|| AppError::NotFound(path.to_string()))?;

    Ok(PageTemplate::new(&site, page)?)
}

fn schema_response(state: &AppState, path: &str) -> Result<Response, AppError> {
    let page = state
        .site()
        .page(path)
        .ok_or_else(|| AppError::NotFound(path.to_string()))?;

    Ok(([(header::CONTENT_TYPE, LD_JSON)], page.json_ld()?).into_response())
}
