// src/web/aluno_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::aluno::AlunoForm,
    rules,
    services::{aluno_service, turma_service},
    state::AppState,
    templates::{self, AddStudentPage, StudentDetailPage, StudentsPage},
    web::{flash, recusar, recusar_se_validacao},
};
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use tower_sessions::Session;

/// GET /students - lista de alunos com turma e média
pub async fn show_students_page(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Html<String>> {
    tracing::debug!("GET /students: Carregando lista de alunos...");
    let alunos = aluno_service::list_alunos_com_medias(&state.db_pool).await?;
    let turmas = turma_service::find_all_turmas(&state.db_pool).await?;
    let flashes = flash::take(&session).await;
    templates::render(&StudentsPage::new(flashes, alunos, &turmas))
}

/// GET /students/add - formulário de criação
pub async fn show_add_student_form(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Html<String>> {
    let turmas = turma_service::find_all_turmas(&state.db_pool).await?;
    let flashes = flash::take(&session).await;
    templates::render(&AddStudentPage { flashes, turmas })
}

/// POST /students/add
pub async fn handle_create_student(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AlunoForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /students/add: Tentando criar aluno '{}'", form.email);

    let dados = match rules::validar_aluno(&form) {
        Ok(d) => d,
        Err(e) => return Ok(recusar(&session, e, "/students/add").await),
    };

    match aluno_service::create_aluno(&state.db_pool, &dados).await {
        Ok(_) => {
            flash::success(&session, "Aluno adicionado com sucesso!").await;
            Ok(Redirect::to("/students"))
        }
        Err(e) => recusar_se_validacao(&session, e, "/students/add").await,
    }
}

/// POST /students/edit/{id} - substitui todos os campos do aluno
pub async fn handle_edit_student(
    State(state): State<AppState>,
    session: Session,
    Path(aluno_id): Path<i64>,
    Form(form): Form<AlunoForm>,
) -> AppResult<Redirect> {
    tracing::info!("POST /students/edit/{}: Processando edição...", aluno_id);

    // Aluno inexistente é 404, antes de olhar para o formulário
    aluno_service::find_aluno_by_id(&state.db_pool, aluno_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let dados = match rules::validar_aluno(&form) {
        Ok(d) => d,
        Err(e) => return Ok(recusar(&session, e, "/students").await),
    };

    match aluno_service::update_aluno(&state.db_pool, aluno_id, &dados).await {
        Ok(()) => {
            flash::success(&session, "Aluno atualizado com sucesso!").await;
            Ok(Redirect::to("/students"))
        }
        Err(e) => recusar_se_validacao(&session, e, "/students").await,
    }
}

/// GET /students/delete/{id} - remove o aluno e os seus projetos
pub async fn handle_delete_student(
    State(state): State<AppState>,
    session: Session,
    Path(aluno_id): Path<i64>,
) -> AppResult<Redirect> {
    tracing::info!("GET /students/delete/{}", aluno_id);
    aluno_service::delete_aluno(&state.db_pool, aluno_id).await?;
    flash::success(&session, "Aluno e seus projetos removidos com sucesso!").await;
    Ok(Redirect::to("/students"))
}

/// GET /student_detail/{id}
pub async fn show_student_detail(
    State(state): State<AppState>,
    session: Session,
    Path(aluno_id): Path<i64>,
) -> AppResult<Html<String>> {
    tracing::debug!("GET /student_detail/{}", aluno_id);
    let detalhe = aluno_service::detalhe_aluno(&state.db_pool, aluno_id).await?;
    let turmas = turma_service::find_all_turmas(&state.db_pool).await?;
    let flashes = flash::take(&session).await;

    let template = StudentDetailPage {
        flashes,
        opcoes_turma: templates::opcoes_turma(&turmas, detalhe.aluno.turma_id),
        aluno: detalhe.aluno,
        turma_nome: detalhe.turma_nome,
        projetos: detalhe.projetos,
        // Aqui, sem projetos, a média mostrada é 0
        media: detalhe.media.unwrap_or(0.0),
    };
    templates::render(&template)
}
