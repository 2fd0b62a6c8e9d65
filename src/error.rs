// src/error.rs
use crate::rules::ValidationError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    // Falha de validação que não foi tratada localmente pelo handler
    #[error("Dados inválidos: {0}")]
    Validation(#[from] ValidationError),

    #[error("Registo não encontrado")]
    NotFound,

    #[error("Erro de configuração: {0}")]
    ConfigError(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    /// Devolve o erro de validação, se for o caso, para o handler o tratar com flash + redirect.
    pub fn into_validation(self) -> Result<ValidationError, AppError> {
        match self {
            AppError::Validation(e) => Ok(e),
            other => Err(other),
        }
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, user_message) = match &self {
            AppError::NotFound => {
                tracing::warn!("Recurso não encontrado");
                (StatusCode::NOT_FOUND, "A página ou registo pedido não existe.".to_string())
            }
            AppError::Validation(e) => {
                tracing::warn!("Validação não tratada: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::SqlxError(_) => {
                tracing::error!("Erro processado: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".to_string())
            }
            AppError::ConfigError(_) => {
                tracing::error!("Erro processado: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.".to_string())
            }
            AppError::SessionError(_) => {
                tracing::error!("Erro processado: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.".to_string())
            }
            AppError::InternalServerError => {
                tracing::error!("Erro processado: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Página HTML mínima, sem depender dos templates
        (
            status,
            Html(format!(
                r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
<body><h1>Erro {status_code}</h1><p>{message}</p><a href="/">Voltar ao início</a></body></html>"#,
                status_code = status.as_u16(),
                message = escape_html(&user_message)
            )),
        )
            .into_response()
    }
}

// As mensagens de validação podem conter texto vindo do utilizador
fn escape_html(texto: &str) -> String {
    texto
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Campo;

    #[test]
    fn not_found_vira_404() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn erro_de_base_de_dados_vira_500() {
        let response = AppError::SqlxError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn into_validation_separa_erros_de_validacao() {
        let erro: AppError = ValidationError::MissingField(Campo::Nome).into();
        assert_eq!(
            erro.into_validation().ok(),
            Some(ValidationError::MissingField(Campo::Nome))
        );
        assert!(AppError::NotFound.into_validation().is_err());
    }

    #[test]
    fn escape_html_neutraliza_marcacao() {
        assert_eq!(escape_html("<b>\"x\" & y</b>"), "&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;");
    }
}
