// src/services/turma_service.rs
use crate::{
    error::{AppError, AppResult},
    models::turma::{DadosTurma, Turma, TurmaResumo},
};
use sqlx::SqlitePool;

/// Todas as turmas (para os <select> dos formulários de aluno).
pub async fn find_all_turmas(db_pool: &SqlitePool) -> AppResult<Vec<Turma>> {
    tracing::debug!("Buscando todas as turmas...");
    let turmas = sqlx::query_as::<_, Turma>("SELECT id, nome, descricao FROM turma ORDER BY id ASC")
        .fetch_all(db_pool)
        .await?;
    Ok(turmas)
}

/// Turmas com o número de alunos de cada uma (página /turmas).
pub async fn list_turmas_com_contagem(db_pool: &SqlitePool) -> AppResult<Vec<TurmaResumo>> {
    let turmas = sqlx::query_as::<_, TurmaResumo>(
        r#"
        SELECT t.id, t.nome, t.descricao, COUNT(a.id) AS num_alunos
        FROM turma t
        LEFT JOIN aluno a ON a.turma_id = t.id
        GROUP BY t.id, t.nome, t.descricao
        ORDER BY t.id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontradas {} turmas.", turmas.len());
    Ok(turmas)
}

pub async fn find_turma_by_id(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Option<Turma>> {
    let turma = sqlx::query_as::<_, Turma>("SELECT id, nome, descricao FROM turma WHERE id = ?1")
        .bind(turma_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(turma)
}

pub async fn create_turma(db_pool: &SqlitePool, dados: &DadosTurma) -> AppResult<i64> {
    tracing::info!("Criando turma '{}'", dados.nome);
    let id = sqlx::query("INSERT INTO turma (nome, descricao) VALUES (?1, ?2)")
        .bind(&dados.nome)
        .bind(&dados.descricao)
        .execute(db_pool)
        .await?
        .last_insert_rowid();
    tracing::info!("✅ Turma {} criada.", id);
    Ok(id)
}

/// Substitui todos os campos da turma.
pub async fn update_turma(db_pool: &SqlitePool, turma_id: i64, dados: &DadosTurma) -> AppResult<()> {
    tracing::info!("Atualizando turma {}", turma_id);
    let rows_affected = sqlx::query("UPDATE turma SET nome = ?1, descricao = ?2 WHERE id = ?3")
        .bind(&dados.nome)
        .bind(&dados.descricao)
        .bind(turma_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao atualizar: turma {} não encontrada.", turma_id);
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Remove a turma e desassocia os alunos (turma_id = NULL). Os alunos ficam.
/// Devolve quantos alunos foram desassociados.
pub async fn delete_turma(db_pool: &SqlitePool, turma_id: i64) -> AppResult<u64> {
    tracing::info!("Removendo turma {}", turma_id);
    let mut tx = db_pool.begin().await?;

    let desassociados = sqlx::query("UPDATE aluno SET turma_id = NULL WHERE turma_id = ?1")
        .bind(turma_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removidas = sqlx::query("DELETE FROM turma WHERE id = ?1")
        .bind(turma_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removidas == 0 {
        // A transação é desfeita ao sair (drop)
        tracing::warn!("Falha ao remover: turma {} não encontrada.", turma_id);
        return Err(AppError::NotFound);
    }

    tx.commit().await?;
    tracing::info!("✅ Turma {} removida, {} alunos desassociados.", turma_id, desassociados);
    Ok(desassociados)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn dados(nome: &str) -> DadosTurma {
        DadosTurma {
            nome: nome.to_string(),
            descricao: None,
        }
    }

    async fn inserir_aluno(pool: &SqlitePool, email: &str, turma_id: Option<i64>) -> i64 {
        sqlx::query("INSERT INTO aluno (nome, email, idade, turma_id) VALUES ('Aluno', ?1, 15, ?2)")
            .bind(email)
            .bind(turma_id)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    #[tokio::test]
    async fn contagem_de_alunos_por_turma() {
        let (pool, _dir) = test_support::pool_temporaria().await;
        let math = create_turma(&pool, &dados("Math")).await.unwrap();
        let fisica = create_turma(&pool, &dados("Física")).await.unwrap();
        inserir_aluno(&pool, "a@x.pt", Some(math)).await;
        inserir_aluno(&pool, "b@x.pt", Some(math)).await;
        inserir_aluno(&pool, "c@x.pt", None).await;

        let resumo = list_turmas_com_contagem(&pool).await.unwrap();
        let contagens: Vec<(i64, i64)> = resumo.iter().map(|t| (t.id, t.num_alunos)).collect();
        assert_eq!(contagens, vec![(math, 2), (fisica, 0)]);
    }

    #[tokio::test]
    async fn update_substitui_todos_os_campos() {
        let (pool, _dir) = test_support::pool_temporaria().await;
        let id = create_turma(
            &pool,
            &DadosTurma {
                nome: "Math".into(),
                descricao: Some("Manhã".into()),
            },
        )
        .await
        .unwrap();

        update_turma(&pool, id, &dados("Matemática")).await.unwrap();

        let turma = find_turma_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(turma.nome, "Matemática");
        assert_eq!(turma.descricao, None);
    }

    #[tokio::test]
    async fn update_de_turma_inexistente() {
        let (pool, _dir) = test_support::pool_temporaria().await;
        let erro = update_turma(&pool, 99, &dados("X")).await.unwrap_err();
        assert!(matches!(erro, AppError::NotFound));
    }

    #[tokio::test]
    async fn delete_desassocia_alunos_sem_os_apagar() {
        let (pool, _dir) = test_support::pool_temporaria().await;
        let math = create_turma(&pool, &dados("Math")).await.unwrap();
        let outra = create_turma(&pool, &dados("Outra")).await.unwrap();
        let a = inserir_aluno(&pool, "a@x.pt", Some(math)).await;
        let b = inserir_aluno(&pool, "b@x.pt", Some(outra)).await;

        assert_eq!(delete_turma(&pool, math).await.unwrap(), 1);
        assert!(find_turma_by_id(&pool, math).await.unwrap().is_none());

        let turma_a: Option<i64> = sqlx::query_scalar("SELECT turma_id FROM aluno WHERE id = ?1")
            .bind(a)
            .fetch_one(&pool)
            .await
            .unwrap();
        let turma_b: Option<i64> = sqlx::query_scalar("SELECT turma_id FROM aluno WHERE id = ?1")
            .bind(b)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(turma_a, None);
        assert_eq!(turma_b, Some(outra));
    }

    #[tokio::test]
    async fn delete_de_turma_inexistente_nao_mexe_em_nada() {
        let (pool, _dir) = test_support::pool_temporaria().await;
        let erro = delete_turma(&pool, 42).await.unwrap_err();
        assert!(matches!(erro, AppError::NotFound));
    }
}
