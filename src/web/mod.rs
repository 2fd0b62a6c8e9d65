// src/web/mod.rs
pub mod aluno_handlers;
pub mod flash;
pub mod home_handlers;
pub mod projeto_handlers;
pub mod routes;
pub mod turma_handlers;

use crate::{error::AppResult, rules::ValidationError};
use axum::response::Redirect;
use tower_sessions::Session;

/// Recusa a submissão: mensagem de erro na sessão e volta ao formulário (padrão PRG).
pub(crate) async fn recusar(session: &Session, erro: ValidationError, destino: &str) -> Redirect {
    tracing::warn!("Submissão recusada ({}): {}", destino, erro);
    flash::error(session, erro.to_string()).await;
    Redirect::to(destino)
}

/// Como `recusar`, mas para erros vindos dos serviços: só os de validação são
/// recuperados; os restantes (NotFound, base de dados) propagam.
pub(crate) async fn recusar_se_validacao(
    session: &Session,
    erro: crate::error::AppError,
    destino: &str,
) -> AppResult<Redirect> {
    let validacao = erro.into_validation()?;
    Ok(recusar(session, validacao, destino).await)
}
