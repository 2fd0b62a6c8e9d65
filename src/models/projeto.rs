// src/models/projeto.rs
use serde::Deserialize;
use sqlx::FromRow;

// Representa uma linha da tabela 'projeto'
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct Projeto {
    pub id: i64,
    pub nome: String,
    pub nota: f64,
    pub aluno_id: i64,
}

// Formulário inline da página de detalhe (add_projeto / edit_projeto)
#[derive(Debug, Default, Deserialize)]
pub struct ProjetoForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub nota: String,
}

// Formulário de /grades/add: o aluno vem do <select>
#[derive(Debug, Default, Deserialize)]
pub struct LancamentoNotaForm {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub score: String,
}

/// Dados já validados, prontos a gravar.
#[derive(Debug, Clone, PartialEq)]
pub struct DadosProjeto {
    pub nome: String,
    pub nota: f64,
}
