// src/web/projeto_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::projeto::{LancamentoNotaForm, ProjetoForm},
    rules,
    services::{aluno_service, projeto_service},
    state::AppState,
    templates::{self, GradesAddPage},
    web::{flash, recusar, recusar_se_validacao},
};
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use tower_sessions::Session;

fn detalhe_url(aluno_id: i64) -> String {
    format!("/student_detail/{}", aluno_id)
}

/// GET /grades/add - formulário com a lista de alunos
pub async fn show_grades_form(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Html<String>> {
    let students = aluno_service::list_opcoes_alunos(&state.db_pool).await?;
    let flashes = flash::take(&session).await;
    templates::render(&GradesAddPage { flashes, students })
}

/// POST /grades/add
pub async fn handle_grades_add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LancamentoNotaForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /grades/add: aluno '{}', projeto '{}'", form.student_id, form.subject);

    let (aluno_id, dados) = match rules::validar_lancamento(&form) {
        Ok(v) => v,
        Err(e) => return Ok(recusar(&session, e, "/grades/add").await),
    };

    match projeto_service::create_projeto(&state.db_pool, aluno_id, &dados).await {
        Ok(_) => {
            flash::success(&session, "Projeto adicionado com sucesso!").await;
            Ok(Redirect::to(&detalhe_url(aluno_id)))
        }
        Err(e) => recusar_se_validacao(&session, e, "/grades/add").await,
    }
}

/// POST /student_detail/{aluno_id}/add_projeto
pub async fn handle_add_projeto(
    State(state): State<AppState>,
    session: Session,
    Path(aluno_id): Path<i64>,
    Form(form): Form<ProjetoForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /student_detail/{}/add_projeto", aluno_id);

    // O aluno vem do caminho: se não existe é 404
    aluno_service::find_aluno_by_id(&state.db_pool, aluno_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let destino = detalhe_url(aluno_id);
    let dados = match rules::validar_projeto(&form) {
        Ok(d) => d,
        Err(e) => return Ok(recusar(&session, e, &destino).await),
    };

    match projeto_service::create_projeto(&state.db_pool, aluno_id, &dados).await {
        Ok(_) => {
            flash::success(&session, "Projeto adicionado com sucesso!").await;
            Ok(Redirect::to(&destino))
        }
        Err(e) => recusar_se_validacao(&session, e, &destino).await,
    }
}

/// POST /student_detail/{aluno_id}/edit_projeto/{id}
pub async fn handle_edit_projeto(
    State(state): State<AppState>,
    session: Session,
    Path((aluno_id, projeto_id)): Path<(i64, i64)>,
    Form(form): Form<ProjetoForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /student_detail/{}/edit_projeto/{}", aluno_id, projeto_id);

    projeto_service::find_projeto(&state.db_pool, aluno_id, projeto_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let destino = detalhe_url(aluno_id);
    let dados = match rules::validar_projeto(&form) {
        Ok(d) => d,
        Err(e) => return Ok(recusar(&session, e, &destino).await),
    };

    projeto_service::update_projeto(&state.db_pool, aluno_id, projeto_id, &dados).await?;
    flash::success(&session, "Projeto atualizado com sucesso!").await;
    Ok(Redirect::to(&destino))
}

/// GET /student_detail/{aluno_id}/delete_projeto/{id}
pub async fn handle_delete_projeto(
    State(state): State<AppState>,
    session: Session,
    Path((aluno_id, projeto_id)): Path<(i64, i64)>,
) -> AppResult<Redirect> {
    tracing::info!("GET /student_detail/{}/delete_projeto/{}", aluno_id, projeto_id);
    projeto_service::delete_projeto(&state.db_pool, aluno_id, projeto_id).await?;
    flash::success(&session, "Projeto removido com sucesso!").await;
    Ok(Redirect::to(&detalhe_url(aluno_id)))
}
