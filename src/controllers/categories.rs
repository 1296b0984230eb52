use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::error::EventResult;
use crate::models::Category;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/categories", get(list_categories))
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

// GET /categories
async fn list_categories(State(state): State<Arc<AppState>>) -> EventResult<Json<CategoriesResponse>> {
    let categories = state.store.list_categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}
