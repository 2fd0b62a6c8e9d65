// src/web/flash.rs
// Mensagens de feedback de uma só leitura ("flash"), guardadas na sessão entre
// o POST/GET que as cria e a página seguinte que as mostra.
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::Duration;
use tower_sessions::{ExpiredDeletion, Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

const CHAVE_FLASHES: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Categoria {
    Success,
    Error,
}

impl Categoria {
    // Classe CSS usada em base.html
    pub fn css(&self) -> &'static str {
        match self {
            Categoria::Success => "flash-success",
            Categoria::Error => "flash-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub categoria: Categoria,
    pub mensagem: String,
}

/// Acrescenta uma mensagem às pendentes. Uma falha na sessão não desfaz a
/// operação que já foi gravada; só fica no log.
pub async fn push(session: &Session, categoria: Categoria, mensagem: impl Into<String>) {
    let mut pendentes: Vec<Flash> = match session.get(CHAVE_FLASHES).await {
        Ok(v) => v.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Erro ao ler flashes da sessão: {:?}", e);
            Vec::new()
        }
    };
    pendentes.push(Flash {
        categoria,
        mensagem: mensagem.into(),
    });
    if let Err(e) = session.insert(CHAVE_FLASHES, pendentes).await {
        tracing::warn!("Erro ao guardar flash na sessão: {:?}", e);
    }
}

pub async fn success(session: &Session, mensagem: impl Into<String>) {
    push(session, Categoria::Success, mensagem).await
}

pub async fn error(session: &Session, mensagem: impl Into<String>) {
    push(session, Categoria::Error, mensagem).await
}

/// Retira todas as mensagens pendentes (cada uma é mostrada uma única vez).
pub async fn take(session: &Session) -> Vec<Flash> {
    match session.remove::<Vec<Flash>>(CHAVE_FLASHES).await {
        Ok(v) => v.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Erro ao consumir flashes da sessão: {:?}", e);
            Vec::new()
        }
    }
}

/// Camada de sessões guardadas na mesma base de dados SQLite (tabela `sessions`).
pub async fn session_layer(db_pool: SqlitePool) -> AppResult<SessionManagerLayer<SqliteStore>> {
    let session_store = SqliteStore::new(db_pool)
        .with_table_name("sessions")
        .map_err(|e| AppError::SessionError(format!("Falha ao criar session store: {}", e)))?;

    // A tabela de sessões não faz parte do esquema da aplicação
    session_store.migrate().await?;

    // Limpeza única no arranque, sem tarefa em segundo plano
    if let Err(e) = session_store.delete_expired().await {
        tracing::warn!("Erro ao apagar sessões expiradas: {:?}", e);
    }

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn sessao_nova() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn flashes_saem_pela_ordem_e_uma_so_vez() {
        let session = sessao_nova();
        success(&session, "Turma adicionada com sucesso!").await;
        error(&session, "Email já cadastrado.").await;

        let flashes = take(&session).await;
        assert_eq!(
            flashes,
            vec![
                Flash {
                    categoria: Categoria::Success,
                    mensagem: "Turma adicionada com sucesso!".into(),
                },
                Flash {
                    categoria: Categoria::Error,
                    mensagem: "Email já cadastrado.".into(),
                },
            ]
        );
        assert!(take(&session).await.is_empty());
    }

    #[test]
    fn classes_css() {
        assert_eq!(Categoria::Success.css(), "flash-success");
        assert_eq!(Categoria::Error.css(), "flash-error");
    }
}
