// src/db.rs
use crate::error::AppResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Script fixo com as três tabelas; não há migrações depois disto.
const SCHEMA: &str = include_str!("../sql/init_db.sql");

pub async fn create_db_pool(database_url: &str) -> AppResult<SqlitePool> {
    tracing::info!("Ligando à base de dados: {}", database_url);

    // Criar o ficheiro se não existir; as FKs do SQLite têm de ser ligadas por conexão
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Cria o esquema se ainda não existir. Devolve `true` se o script foi executado.
///
/// A existência é decidida pela tabela `turma`: se já lá está, a base de dados
/// é usada tal como está e nada é recriado.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<bool> {
    let existe: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'turma')",
    )
    .fetch_one(pool)
    .await?;

    if existe {
        tracing::info!("Esquema já existe, nada a inicializar.");
        return Ok(false);
    }

    tracing::info!("Base de dados vazia, executando init_db.sql...");
    let mut tx = pool.begin().await?;
    sqlx::raw_sql(SCHEMA).execute(&mut *tx).await?;
    tx.commit().await?;
    tracing::info!("✅ Esquema criado.");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn cria_as_tres_tabelas() {
        let (pool, _dir) = test_support::pool_temporaria().await;

        let tabelas: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('turma', 'aluno', 'projeto') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tabelas, vec!["aluno", "projeto", "turma"]);
    }

    #[tokio::test]
    async fn init_schema_nao_recria_base_existente() {
        let (pool, _dir) = test_support::pool_temporaria().await;

        sqlx::query("INSERT INTO turma (nome) VALUES ('Math')")
            .execute(&pool)
            .await
            .unwrap();

        // Segunda chamada: o esquema já existe
        assert!(!init_schema(&pool).await.unwrap());

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM turma")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn reabrir_o_ficheiro_mantem_os_dados() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("escola.db").display());

        let pool = create_db_pool(&url).await.unwrap();
        sqlx::query("INSERT INTO turma (nome) VALUES ('Math')")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let pool = create_db_pool(&url).await.unwrap();
        let nome: String = sqlx::query_scalar("SELECT nome FROM turma")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(nome, "Math");
    }
}
