// src/models/turma.rs
use serde::Deserialize;
use sqlx::FromRow;

// Representa uma linha da tabela 'turma'
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct Turma {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
}

/// Turma com a contagem de alunos, para a página /turmas.
#[derive(Debug, Clone, FromRow)]
pub struct TurmaResumo {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub num_alunos: i64,
}

impl TurmaResumo {
    pub fn descricao_texto(&self) -> &str {
        self.descricao.as_deref().unwrap_or("")
    }
}

// Formulário de criação/edição (POST /turma/add e /turma/edit/{id})
#[derive(Debug, Default, Deserialize)]
pub struct TurmaForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
}

/// Dados já validados, prontos a gravar.
#[derive(Debug, Clone, PartialEq)]
pub struct DadosTurma {
    pub nome: String,
    pub descricao: Option<String>,
}
