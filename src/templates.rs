// src/templates.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        aluno::{Aluno, AlunoListagem, AlunoOpcao},
        projeto::Projeto,
        turma::{Turma, TurmaResumo},
    },
    web::flash::Flash,
};
use askama::Template; // Trait necessário para Askama
use axum::response::Html;

/// Renderiza um template e trata o erro (regista e devolve 500).
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Falha ao renderizar template: {}", e);
            Err(AppError::InternalServerError)
        }
    }
}

/// Uma opção do <select> de turma, já com a indicação de selecionada.
#[derive(Clone, Debug)]
pub struct OpcaoTurma {
    pub id: i64,
    pub nome: String,
    pub selecionada: bool,
}

pub fn opcoes_turma(turmas: &[Turma], selecionada: Option<i64>) -> Vec<OpcaoTurma> {
    turmas
        .iter()
        .map(|t| OpcaoTurma {
            id: t.id,
            nome: t.nome.clone(),
            selecionada: selecionada == Some(t.id),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub flashes: Vec<Flash>,
}

/// Linha da tabela de alunos, com as opções de turma do formulário inline.
#[derive(Clone, Debug)]
pub struct LinhaAluno {
    pub aluno: AlunoListagem,
    pub opcoes_turma: Vec<OpcaoTurma>,
}

#[derive(Template)]
#[template(path = "students.html")]
pub struct StudentsPage {
    pub flashes: Vec<Flash>,
    pub linhas: Vec<LinhaAluno>,
}

impl StudentsPage {
    pub fn new(flashes: Vec<Flash>, alunos: Vec<AlunoListagem>, turmas: &[Turma]) -> Self {
        let linhas = alunos
            .into_iter()
            .map(|aluno| {
                let opcoes_turma = opcoes_turma(turmas, aluno.turma_id);
                LinhaAluno { aluno, opcoes_turma }
            })
            .collect();
        Self { flashes, linhas }
    }
}

#[derive(Template)]
#[template(path = "add_student.html")]
pub struct AddStudentPage {
    pub flashes: Vec<Flash>,
    pub turmas: Vec<Turma>,
}

#[derive(Template)]
#[template(path = "student_detail.html")]
pub struct StudentDetailPage {
    pub flashes: Vec<Flash>,
    pub aluno: Aluno,
    pub turma_nome: Option<String>,
    pub projetos: Vec<Projeto>,
    // Nesta página um aluno sem projetos mostra média 0
    pub media: f64,
    pub opcoes_turma: Vec<OpcaoTurma>,
}

impl StudentDetailPage {
    pub fn turma_texto(&self) -> &str {
        self.turma_nome.as_deref().unwrap_or("Sem turma")
    }

    pub fn media_texto(&self) -> String {
        format!("{:.2}", self.media)
    }
}

#[derive(Template)]
#[template(path = "grades_add.html")]
pub struct GradesAddPage {
    pub flashes: Vec<Flash>,
    pub students: Vec<AlunoOpcao>,
}

#[derive(Template)]
#[template(path = "turmas.html")]
pub struct TurmasPage {
    pub flashes: Vec<Flash>,
    pub turmas: Vec<TurmaResumo>,
}
