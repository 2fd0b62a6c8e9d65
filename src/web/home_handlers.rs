// src/web/home_handlers.rs
use crate::{
    error::{AppError, AppResult},
    templates::{self, IndexPage},
    web::flash,
};
use axum::response::Html;
use tower_sessions::Session;

// GET /
pub async fn index_handler(session: Session) -> AppResult<Html<String>> {
    tracing::debug!("GET /");
    let flashes = flash::take(&session).await;
    templates::render(&IndexPage { flashes })
}

// Qualquer rota desconhecida
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}
