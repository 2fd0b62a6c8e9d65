// src/web/routes.rs
use crate::{
    state::AppState,
    web::{aluno_handlers, home_handlers, projeto_handlers, turma_handlers},
};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;

pub fn create_router(app_state: AppState) -> Router {
    // --- Alunos ---
    // O segmento do aluno chama-se {aluno_id} em todas as rotas /student_detail
    let aluno_routes = Router::new()
        .route("/students", get(aluno_handlers::show_students_page))
        .route(
            "/students/add",
            get(aluno_handlers::show_add_student_form).post(aluno_handlers::handle_create_student),
        )
        .route("/students/edit/{id}", post(aluno_handlers::handle_edit_student))
        .route("/students/delete/{id}", get(aluno_handlers::handle_delete_student))
        .route("/student_detail/{aluno_id}", get(aluno_handlers::show_student_detail));

    // --- Projetos / notas ---
    let projeto_routes = Router::new()
        .route(
            "/grades/add",
            get(projeto_handlers::show_grades_form).post(projeto_handlers::handle_grades_add),
        )
        .route(
            "/student_detail/{aluno_id}/add_projeto",
            post(projeto_handlers::handle_add_projeto),
        )
        .route(
            "/student_detail/{aluno_id}/edit_projeto/{id}",
            post(projeto_handlers::handle_edit_projeto),
        )
        .route(
            "/student_detail/{aluno_id}/delete_projeto/{id}",
            get(projeto_handlers::handle_delete_projeto),
        );

    // --- Turmas ---
    let turma_routes = Router::new()
        .route("/turmas", get(turma_handlers::show_turmas_page))
        .route("/turma/add", post(turma_handlers::handle_add_turma))
        .route("/turma/edit/{id}", post(turma_handlers::handle_edit_turma))
        .route("/turma/delete/{id}", get(turma_handlers::handle_delete_turma));

    // --- Router Final ---
    Router::new()
        .route("/", get(home_handlers::index_handler))
        .merge(aluno_routes)
        .merge(projeto_routes)
        .merge(turma_routes)
        .fallback(home_handlers::not_found_handler)
        .with_state(app_state)
}

/// Router com as camadas de trace e de sessão, pronto a servir.
pub fn create_app(app_state: AppState, session_layer: SessionManagerLayer<SqliteStore>) -> Router {
    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
