// src/state.rs
use sqlx::SqlitePool;

// Estado partilhado pelos handlers: apenas o pool da base de dados.
// Cada handler pede as conexões/transações de que precisa e liberta-as ao sair.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}
