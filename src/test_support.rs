// src/test_support.rs
// Utilitários partilhados pelos testes.
use crate::db;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Base de dados SQLite num diretório temporário, já com o esquema.
/// O `TempDir` tem de viver tanto quanto o pool.
pub async fn pool_temporaria() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("falha ao criar diretório temporário");
    let url = format!("sqlite://{}", dir.path().join("teste.db").display());
    let pool = db::create_db_pool(&url)
        .await
        .expect("falha ao criar base de dados de teste");
    (pool, dir)
}
