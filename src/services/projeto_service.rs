// src/services/projeto_service.rs
use crate::{
    error::{AppError, AppResult},
    models::projeto::{DadosProjeto, Projeto},
    rules::Campo,
    services::traduzir_violacao,
};
use sqlx::SqlitePool;

pub async fn list_projetos_do_aluno(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<Vec<Projeto>> {
    tracing::debug!("Buscando projetos do aluno {}", aluno_id);
    let projetos = sqlx::query_as::<_, Projeto>(
        "SELECT id, nome, nota, aluno_id FROM projeto WHERE aluno_id = ?1 ORDER BY id ASC",
    )
    .bind(aluno_id)
    .fetch_all(db_pool)
    .await?;
    Ok(projetos)
}

/// Cria um projeto para o aluno. Se o aluno não existir, a FK falha e devolvemos
/// `UnknownReference(AlunoId)`.
pub async fn create_projeto(db_pool: &SqlitePool, aluno_id: i64, dados: &DadosProjeto) -> AppResult<i64> {
    tracing::info!("Criando projeto '{}' para aluno {}", dados.nome, aluno_id);
    let id = sqlx::query("INSERT INTO projeto (nome, nota, aluno_id) VALUES (?1, ?2, ?3)")
        .bind(&dados.nome)
        .bind(dados.nota)
        .bind(aluno_id)
        .execute(db_pool)
        .await
        .map_err(|e| traduzir_violacao(e, Campo::AlunoId))?
        .last_insert_rowid();
    tracing::info!("✅ Projeto {} criado.", id);
    Ok(id)
}

/// Atualiza nome e nota. O projeto tem de pertencer ao aluno indicado.
pub async fn update_projeto(
    db_pool: &SqlitePool,
    aluno_id: i64,
    projeto_id: i64,
    dados: &DadosProjeto,
) -> AppResult<()> {
    tracing::info!("Atualizando projeto {} do aluno {}", projeto_id, aluno_id);
    let rows_affected =
        sqlx::query("UPDATE projeto SET nome = ?1, nota = ?2 WHERE id = ?3 AND aluno_id = ?4")
            .bind(&dados.nome)
            .bind(dados.nota)
            .bind(projeto_id)
            .bind(aluno_id)
            .execute(db_pool)
            .await?
            .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Projeto {} não encontrado para aluno {}.", projeto_id, aluno_id);
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn find_projeto(db_pool: &SqlitePool, aluno_id: i64, projeto_id: i64) -> AppResult<Option<Projeto>> {
    let projeto = sqlx::query_as::<_, Projeto>(
        "SELECT id, nome, nota, aluno_id FROM projeto WHERE id = ?1 AND aluno_id = ?2",
    )
    .bind(projeto_id)
    .bind(aluno_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(projeto)
}

pub async fn delete_projeto(db_pool: &SqlitePool, aluno_id: i64, projeto_id: i64) -> AppResult<()> {
    tracing::info!("Removendo projeto {} do aluno {}", projeto_id, aluno_id);
    let rows_affected = sqlx::query("DELETE FROM projeto WHERE id = ?1 AND aluno_id = ?2")
        .bind(projeto_id)
        .bind(aluno_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Projeto {} não encontrado para aluno {}.", projeto_id, aluno_id);
        return Err(AppError::NotFound);
    }
    Ok(())
}
