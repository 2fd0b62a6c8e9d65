// src/services/aluno_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        aluno::{Aluno, AlunoComTurma, AlunoListagem, AlunoOpcao, DadosAluno, DetalheAluno},
        projeto::Projeto,
    },
    rules::{self, Campo, ValidationError},
    services::{projeto_service, traduzir_violacao},
};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

pub async fn find_aluno_by_id(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<Option<Aluno>> {
    tracing::debug!("Buscando aluno por ID: {}", aluno_id);
    let aluno = sqlx::query_as::<_, Aluno>(
        "SELECT id, nome, email, idade, turma_id FROM aluno WHERE id = ?1",
    )
    .bind(aluno_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(aluno)
}

/// Id + nome de todos os alunos (para o <select> de /grades/add).
pub async fn list_opcoes_alunos(db_pool: &SqlitePool) -> AppResult<Vec<AlunoOpcao>> {
    let alunos = sqlx::query_as::<_, AlunoOpcao>("SELECT id, nome FROM aluno ORDER BY id ASC")
        .fetch_all(db_pool)
        .await?;
    Ok(alunos)
}

/// Listagem de /students: cada aluno com o nome da turma e a média dos projetos.
pub async fn list_alunos_com_medias(db_pool: &SqlitePool) -> AppResult<Vec<AlunoListagem>> {
    tracing::debug!("Buscando alunos com médias...");
    let alunos = sqlx::query_as::<_, AlunoComTurma>(
        r#"
        SELECT a.id, a.nome, a.email, a.idade, a.turma_id, t.nome AS turma_nome
        FROM aluno a
        LEFT JOIN turma t ON t.id = a.turma_id
        ORDER BY a.id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;

    // Uma só query para as notas, agrupadas por aluno em memória
    let notas: Vec<(i64, f64)> = sqlx::query_as("SELECT aluno_id, nota FROM projeto ORDER BY id ASC")
        .fetch_all(db_pool)
        .await?;
    let mut notas_por_aluno: HashMap<i64, Vec<f64>> = HashMap::new();
    for (aluno_id, nota) in notas {
        notas_por_aluno.entry(aluno_id).or_default().push(nota);
    }

    let listagem = alunos
        .into_iter()
        .map(|a| {
            let media = notas_por_aluno
                .get(&a.id)
                .and_then(|notas| rules::media_notas(notas));
            AlunoListagem {
                id: a.id,
                nome: a.nome,
                email: a.email,
                idade: a.idade,
                turma_id: a.turma_id,
                turma_nome: a.turma_nome,
                media,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!("Encontrados {} alunos.", listagem.len());
    Ok(listagem)
}

/// Dados da página de detalhe. `NotFound` se o aluno não existir.
pub async fn detalhe_aluno(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<DetalheAluno> {
    let aluno = find_aluno_by_id(db_pool, aluno_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let turma_nome: Option<String> = match aluno.turma_id {
        Some(turma_id) => sqlx::query_scalar("SELECT nome FROM turma WHERE id = ?1")
            .bind(turma_id)
            .fetch_optional(db_pool)
            .await?,
        None => None,
    };

    let projetos: Vec<Projeto> = projeto_service::list_projetos_do_aluno(db_pool, aluno_id).await?;
    let notas: Vec<f64> = projetos.iter().map(|p| p.nota).collect();
    let media = rules::media_notas(&notas);

    Ok(DetalheAluno {
        aluno,
        turma_nome,
        projetos,
        media,
    })
}

// Verifica se o email já pertence a outro aluno (excluindo `excluir_id`, na edição)
async fn email_em_uso(
    conn: &mut SqliteConnection,
    email: &str,
    excluir_id: Option<i64>,
) -> AppResult<bool> {
    let em_uso: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM aluno WHERE email = ?1 AND (?2 IS NULL OR id <> ?2))",
    )
    .bind(email)
    .bind(excluir_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(em_uso)
}

pub async fn create_aluno(db_pool: &SqlitePool, dados: &DadosAluno) -> AppResult<i64> {
    tracing::info!("Tentando criar aluno: {}", dados.email);
    let mut tx = db_pool.begin().await?;

    if email_em_uso(&mut tx, &dados.email, None).await? {
        tracing::warn!("Falha ao criar aluno: email '{}' já existe.", dados.email);
        return Err(ValidationError::DuplicateEmail.into());
    }

    // A FK de turma_id é verificada pelo SQLite
    let id = sqlx::query("INSERT INTO aluno (nome, email, idade, turma_id) VALUES (?1, ?2, ?3, ?4)")
        .bind(&dados.nome)
        .bind(&dados.email)
        .bind(dados.idade)
        .bind(dados.turma_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| traduzir_violacao(e, Campo::TurmaId))?
        .last_insert_rowid();

    tx.commit().await?;
    tracing::info!("✅ Aluno {} criado com sucesso.", id);
    Ok(id)
}

/// Substitui todos os campos do aluno (não é um patch parcial).
pub async fn update_aluno(db_pool: &SqlitePool, aluno_id: i64, dados: &DadosAluno) -> AppResult<()> {
    tracing::info!("Atualizando aluno {}", aluno_id);
    let mut tx = db_pool.begin().await?;

    let existe: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM aluno WHERE id = ?1)")
        .bind(aluno_id)
        .fetch_one(&mut *tx)
        .await?;
    if !existe {
        tracing::warn!("Falha ao atualizar: aluno {} não encontrado.", aluno_id);
        return Err(AppError::NotFound);
    }

    if email_em_uso(&mut tx, &dados.email, Some(aluno_id)).await? {
        tracing::warn!("Falha ao atualizar aluno {}: email '{}' já existe.", aluno_id, dados.email);
        return Err(ValidationError::DuplicateEmail.into());
    }

    sqlx::query("UPDATE aluno SET nome = ?1, email = ?2, idade = ?3, turma_id = ?4 WHERE id = ?5")
        .bind(&dados.nome)
        .bind(&dados.email)
        .bind(dados.idade)
        .bind(dados.turma_id)
        .bind(aluno_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| traduzir_violacao(e, Campo::TurmaId))?;

    tx.commit().await?;
    tracing::info!("✅ Aluno {} atualizado.", aluno_id);
    Ok(())
}

/// Remove o aluno e todos os seus projetos. Devolve quantos projetos foram apagados.
pub async fn delete_aluno(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<u64> {
    tracing::info!("Removendo aluno {} e os seus projetos", aluno_id);
    let mut tx = db_pool.begin().await?;

    // Projetos primeiro (a FK também tem ON DELETE CASCADE)
    let projetos_removidos = sqlx::query("DELETE FROM projeto WHERE aluno_id = ?1")
        .bind(aluno_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removidos = sqlx::query("DELETE FROM aluno WHERE id = ?1")
        .bind(aluno_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removidos == 0 {
        tracing::warn!("Falha ao remover: aluno {} não encontrado.", aluno_id);
        return Err(AppError::NotFound);
    }

    tx.commit().await?;
    tracing::info!("✅ Aluno {} removido ({} projetos).", aluno_id, projetos_removidos);
    Ok(projetos_removidos)
}
