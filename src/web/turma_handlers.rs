// src/web/turma_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::turma::TurmaForm,
    rules,
    services::turma_service,
    state::AppState,
    templates::{self, TurmasPage},
    web::{flash, recusar},
};
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use tower_sessions::Session;

/// GET /turmas - turmas com o número de alunos
pub async fn show_turmas_page(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Html<String>> {
    tracing::debug!("GET /turmas");
    let turmas = turma_service::list_turmas_com_contagem(&state.db_pool).await?;
    let flashes = flash::take(&session).await;
    templates::render(&TurmasPage { flashes, turmas })
}

/// POST /turma/add
pub async fn handle_add_turma(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<TurmaForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /turma/add: '{}'", form.nome);
    let dados = match rules::validar_turma(&form) {
        Ok(d) => d,
        Err(e) => return Ok(recusar(&session, e, "/turmas").await),
    };

    turma_service::create_turma(&state.db_pool, &dados).await?;
    flash::success(&session, "Turma adicionada com sucesso!").await;
    Ok(Redirect::to("/turmas"))
}

/// POST /turma/edit/{id}
pub async fn handle_edit_turma(
    State(state): State<AppState>,
    session: Session,
    Path(turma_id): Path<i64>,
    Form(form): Form<TurmaForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /turma/edit/{}", turma_id);

    turma_service::find_turma_by_id(&state.db_pool, turma_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let dados = match rules::validar_turma(&form) {
        Ok(d) => d,
        Err(e) => return Ok(recusar(&session, e, "/turmas").await),
    };

    turma_service::update_turma(&state.db_pool, turma_id, &dados).await?;
    flash::success(&session, "Turma atualizada com sucesso!").await;
    Ok(Redirect::to("/turmas"))
}

/// GET /turma/delete/{id} - os alunos ficam sem turma
pub async fn handle_delete_turma(
    State(state): State<AppState>,
    session: Session,
    Path(turma_id): Path<i64>,
) -> AppResult<Redirect> {
    tracing::info!("GET /turma/delete/{}", turma_id);
    turma_service::delete_turma(&state.db_pool, turma_id).await?;
    flash::success(
        &session,
        "Turma removida com sucesso! Os alunos foram desassociados.",
    )
    .await;
    Ok(Redirect::to("/turmas"))
}
