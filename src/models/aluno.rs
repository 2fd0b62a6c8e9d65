// src/models/aluno.rs
use serde::Deserialize;
use sqlx::FromRow;

// Representa uma linha da tabela 'aluno'
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct Aluno {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub idade: i64,
    pub turma_id: Option<i64>, // NULL quando o aluno não pertence a nenhuma turma
}

/// Linha da listagem /students: aluno + nome da turma (LEFT JOIN) + média calculada.
#[derive(Debug, Clone)]
pub struct AlunoListagem {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub idade: i64,
    pub turma_id: Option<i64>,
    pub turma_nome: Option<String>,
    pub media: Option<f64>, // None quando o aluno não tem projetos
}

impl AlunoListagem {
    pub fn turma_texto(&self) -> &str {
        self.turma_nome.as_deref().unwrap_or("Sem turma")
    }

    pub fn media_texto(&self) -> String {
        match self.media {
            Some(media) => format!("{:.2}", media),
            None => "Sem notas".to_string(),
        }
    }
}

// Resultado do SELECT com LEFT JOIN, antes de juntar a média
#[derive(Debug, FromRow)]
pub(crate) struct AlunoComTurma {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub idade: i64,
    pub turma_id: Option<i64>,
    pub turma_nome: Option<String>,
}

/// Opção para o <select> de alunos no formulário de notas.
#[derive(Debug, Clone, FromRow)]
pub struct AlunoOpcao {
    pub id: i64,
    pub nome: String,
}

/// Tudo o que a página de detalhe precisa de um aluno.
#[derive(Debug, Clone)]
pub struct DetalheAluno {
    pub aluno: Aluno,
    pub turma_nome: Option<String>,
    pub projetos: Vec<super::projeto::Projeto>,
    pub media: Option<f64>,
}

// Formulário de aluno. O formulário de criação usa name/age e o de edição nome/idade;
// aceitamos as duas grafias nos dois caminhos.
#[derive(Debug, Default, Deserialize)]
pub struct AlunoForm {
    #[serde(default, rename = "name", alias = "nome")]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "age", alias = "idade")]
    pub idade: String,
    #[serde(default)]
    pub turma_id: String,
}

/// Dados já validados, prontos a gravar.
#[derive(Debug, Clone, PartialEq)]
pub struct DadosAluno {
    pub nome: String,
    pub email: String,
    pub idade: i64,
    pub turma_id: Option<i64>,
}
