// src/services/mod.rs
pub mod aluno_service;
pub mod projeto_service;
pub mod turma_service;

use crate::{
    error::AppError,
    rules::{Campo, ValidationError},
};

/// Traduz violações de restrições do SQLite em erros de validação.
/// A única restrição UNIQUE do esquema (além das PKs) é aluno.email.
pub(crate) fn traduzir_violacao(erro: sqlx::Error, campo_fk: Campo) -> AppError {
    if let sqlx::Error::Database(db_err) = &erro {
        if db_err.is_unique_violation() {
            tracing::warn!("Violação de UNIQUE: {}", db_err.message());
            return ValidationError::DuplicateEmail.into();
        }
        if db_err.is_foreign_key_violation() {
            tracing::warn!("Violação de FK ({}): {}", campo_fk, db_err.message());
            return ValidationError::UnknownReference(campo_fk).into();
        }
    }
    erro.into()
}
