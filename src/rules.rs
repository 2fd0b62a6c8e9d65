// src/rules.rs
//! Regras de validação (antes de gravar) e de derivação (depois de ler).
//!
//! Tudo aqui é puro: não toca na base de dados. As verificações que precisam
//! do store (email único, referências existentes) ficam nos serviços.
use crate::models::{
    aluno::{AlunoForm, DadosAluno},
    projeto::{DadosProjeto, LancamentoNotaForm, ProjetoForm},
    turma::{DadosTurma, TurmaForm},
};
use std::fmt;
use thiserror::Error;

pub const NOTA_MINIMA: f64 = 0.0;
pub const NOTA_MAXIMA: f64 = 10.0;

/// Campo do formulário a que um erro de validação se refere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campo {
    Nome,
    NomeTurma,
    Email,
    Idade,
    TurmaId,
    AlunoId,
    Nota,
}

impl fmt::Display for Campo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rotulo = match self {
            Campo::Nome => "Nome",
            Campo::NomeTurma => "Nome da turma",
            Campo::Email => "Email",
            Campo::Idade => "Idade",
            Campo::TurmaId => "ID da turma",
            Campo::AlunoId => "ID do aluno",
            Campo::Nota => "Nota",
        };
        f.write_str(rotulo)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{}", mensagem_obrigatorio(.0))]
    MissingField(Campo),

    #[error("{0} deve ser um número válido.")]
    InvalidNumber(Campo),

    #[error("{}", mensagem_fora_do_intervalo(.0))]
    OutOfRange(Campo),

    #[error("Email já cadastrado.")]
    DuplicateEmail,

    #[error("{}", mensagem_referencia(.0))]
    UnknownReference(Campo),
}

fn mensagem_obrigatorio(campo: &Campo) -> &'static str {
    match campo {
        Campo::NomeTurma => "O nome da turma é obrigatório.",
        _ => "Todos os campos são obrigatórios.",
    }
}

fn mensagem_fora_do_intervalo(campo: &Campo) -> String {
    match campo {
        Campo::Idade => "Idade deve ser um número positivo.".to_string(),
        Campo::Nota => format!("A nota deve ser entre {} e {}.", NOTA_MINIMA, NOTA_MAXIMA),
        outro => format!("{} fora do intervalo permitido.", outro),
    }
}

fn mensagem_referencia(campo: &Campo) -> &'static str {
    match campo {
        Campo::TurmaId => "A turma selecionada não existe.",
        Campo::AlunoId => "O aluno selecionado não existe.",
        _ => "Referência inválida.",
    }
}

// --- Validações de campo ---

/// Campo obrigatório: vazio ou só espaços conta como ausente.
fn obrigatorio(valor: &str, campo: Campo) -> Result<String, ValidationError> {
    let valor = valor.trim();
    if valor.is_empty() {
        Err(ValidationError::MissingField(campo))
    } else {
        Ok(valor.to_string())
    }
}

fn inteiro(valor: &str, campo: Campo) -> Result<i64, ValidationError> {
    valor
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber(campo))
}

/// Converte e valida uma nota: tem de ser número e estar em [0, 10].
/// NaN e infinitos ficam fora do intervalo.
pub fn validar_nota(valor: &str) -> Result<f64, ValidationError> {
    let nota = valor
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber(Campo::Nota))?;
    if (NOTA_MINIMA..=NOTA_MAXIMA).contains(&nota) {
        Ok(nota)
    } else {
        Err(ValidationError::OutOfRange(Campo::Nota))
    }
}

pub fn validar_idade(valor: &str) -> Result<i64, ValidationError> {
    let idade = inteiro(valor, Campo::Idade)?;
    if idade <= 0 {
        return Err(ValidationError::OutOfRange(Campo::Idade));
    }
    Ok(idade)
}

// turma_id vazio significa "sem turma"
fn referencia_opcional(valor: &str, campo: Campo) -> Result<Option<i64>, ValidationError> {
    if valor.trim().is_empty() {
        Ok(None)
    } else {
        inteiro(valor, campo).map(Some)
    }
}

// --- Validação de formulários completos ---

pub fn validar_turma(form: &TurmaForm) -> Result<DadosTurma, ValidationError> {
    let nome = obrigatorio(&form.nome, Campo::NomeTurma)?;
    let descricao = Some(form.descricao.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    Ok(DadosTurma { nome, descricao })
}

/// Mesmas regras para criar e editar: presença, depois números, depois intervalos.
pub fn validar_aluno(form: &AlunoForm) -> Result<DadosAluno, ValidationError> {
    let nome = obrigatorio(&form.nome, Campo::Nome)?;
    let email = obrigatorio(&form.email, Campo::Email)?;
    let idade_texto = obrigatorio(&form.idade, Campo::Idade)?;
    let idade = validar_idade(&idade_texto)?;
    let turma_id = referencia_opcional(&form.turma_id, Campo::TurmaId)?;
    Ok(DadosAluno {
        nome,
        email,
        idade,
        turma_id,
    })
}

pub fn validar_projeto(form: &ProjetoForm) -> Result<DadosProjeto, ValidationError> {
    let nome = obrigatorio(&form.nome, Campo::Nome)?;
    let nota_texto = obrigatorio(&form.nota, Campo::Nota)?;
    let nota = validar_nota(&nota_texto)?;
    Ok(DadosProjeto { nome, nota })
}

/// Validação de /grades/add. Devolve o id do aluno e os dados do projeto.
pub fn validar_lancamento(form: &LancamentoNotaForm) -> Result<(i64, DadosProjeto), ValidationError> {
    // Todos os campos primeiro, como no formulário inline
    let aluno_texto = obrigatorio(&form.student_id, Campo::AlunoId)?;
    let nome = obrigatorio(&form.subject, Campo::Nome)?;
    let nota_texto = obrigatorio(&form.score, Campo::Nota)?;

    let aluno_id = inteiro(&aluno_texto, Campo::AlunoId)?;
    let nota = validar_nota(&nota_texto)?;
    Ok((aluno_id, DadosProjeto { nome, nota }))
}

// --- Derivação ---

/// Média aritmética das notas. `None` quando não há notas (nunca 0 aqui;
/// quem quiser 0 decide no próprio ponto de chamada).
pub fn media_notas(notas: &[f64]) -> Option<f64> {
    if notas.is_empty() {
        return None;
    }
    Some(notas.iter().sum::<f64>() / notas.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_aluno(nome: &str, email: &str, idade: &str, turma_id: &str) -> AlunoForm {
        AlunoForm {
            nome: nome.into(),
            email: email.into(),
            idade: idade.into(),
            turma_id: turma_id.into(),
        }
    }

    #[test]
    fn aluno_valido_com_e_sem_turma() {
        let dados = validar_aluno(&form_aluno(" Alice ", "alice@x.pt", " 17 ", "")).unwrap();
        assert_eq!(
            dados,
            DadosAluno {
                nome: "Alice".into(),
                email: "alice@x.pt".into(),
                idade: 17,
                turma_id: None,
            }
        );

        let dados = validar_aluno(&form_aluno("Alice", "alice@x.pt", "17", "3")).unwrap();
        assert_eq!(dados.turma_id, Some(3));
    }

    #[test]
    fn aluno_com_campo_em_falta() {
        assert_eq!(
            validar_aluno(&form_aluno("", "a@x.pt", "17", "")),
            Err(ValidationError::MissingField(Campo::Nome))
        );
        assert_eq!(
            validar_aluno(&form_aluno("Alice", "   ", "17", "")),
            Err(ValidationError::MissingField(Campo::Email))
        );
        assert_eq!(
            validar_aluno(&form_aluno("Alice", "a@x.pt", "", "")),
            Err(ValidationError::MissingField(Campo::Idade))
        );
    }

    #[test]
    fn idade_tem_de_ser_inteiro_positivo() {
        assert_eq!(validar_idade("abc"), Err(ValidationError::InvalidNumber(Campo::Idade)));
        assert_eq!(validar_idade("12.5"), Err(ValidationError::InvalidNumber(Campo::Idade)));
        assert_eq!(validar_idade("0"), Err(ValidationError::OutOfRange(Campo::Idade)));
        assert_eq!(validar_idade("-4"), Err(ValidationError::OutOfRange(Campo::Idade)));
        assert_eq!(validar_idade("1"), Ok(1));
    }

    #[test]
    fn turma_id_invalido_no_formulario_de_aluno() {
        assert_eq!(
            validar_aluno(&form_aluno("Alice", "a@x.pt", "17", "matematica")),
            Err(ValidationError::InvalidNumber(Campo::TurmaId))
        );
    }

    #[test]
    fn nota_dentro_e_fora_do_intervalo() {
        assert_eq!(validar_nota("0"), Ok(0.0));
        assert_eq!(validar_nota("10"), Ok(10.0));
        assert_eq!(validar_nota(" 7.5 "), Ok(7.5));
        assert_eq!(validar_nota("10.01"), Err(ValidationError::OutOfRange(Campo::Nota)));
        assert_eq!(validar_nota("-1"), Err(ValidationError::OutOfRange(Campo::Nota)));
        assert_eq!(validar_nota("NaN"), Err(ValidationError::OutOfRange(Campo::Nota)));
        assert_eq!(validar_nota("inf"), Err(ValidationError::OutOfRange(Campo::Nota)));
        assert_eq!(validar_nota("oito"), Err(ValidationError::InvalidNumber(Campo::Nota)));
    }

    #[test]
    fn projeto_inline_valida_presenca_antes_do_numero() {
        let form = ProjetoForm {
            nome: "".into(),
            nota: "abc".into(),
        };
        assert_eq!(validar_projeto(&form), Err(ValidationError::MissingField(Campo::Nome)));

        let form = ProjetoForm {
            nome: "Robô".into(),
            nota: "11".into(),
        };
        assert_eq!(validar_projeto(&form), Err(ValidationError::OutOfRange(Campo::Nota)));
    }

    #[test]
    fn lancamento_de_nota() {
        let form = LancamentoNotaForm {
            student_id: "4".into(),
            subject: "Feira de ciências".into(),
            score: "9.5".into(),
        };
        assert_eq!(
            validar_lancamento(&form),
            Ok((
                4,
                DadosProjeto {
                    nome: "Feira de ciências".into(),
                    nota: 9.5,
                }
            ))
        );

        let form = LancamentoNotaForm {
            student_id: "quatro".into(),
            subject: "Feira".into(),
            score: "9".into(),
        };
        assert_eq!(
            validar_lancamento(&form),
            Err(ValidationError::InvalidNumber(Campo::AlunoId))
        );

        let form = LancamentoNotaForm {
            student_id: "4".into(),
            subject: "Feira".into(),
            score: "".into(),
        };
        assert_eq!(
            validar_lancamento(&form),
            Err(ValidationError::MissingField(Campo::Nota))
        );
    }

    #[test]
    fn turma_sem_nome_e_descricao_vazia() {
        let form = TurmaForm {
            nome: "  ".into(),
            descricao: "x".into(),
        };
        assert_eq!(validar_turma(&form), Err(ValidationError::MissingField(Campo::NomeTurma)));

        let form = TurmaForm {
            nome: "Math".into(),
            descricao: "   ".into(),
        };
        assert_eq!(
            validar_turma(&form),
            Ok(DadosTurma {
                nome: "Math".into(),
                descricao: None,
            })
        );
    }

    #[test]
    fn mensagens_para_o_utilizador() {
        assert_eq!(
            ValidationError::MissingField(Campo::Email).to_string(),
            "Todos os campos são obrigatórios."
        );
        assert_eq!(
            ValidationError::MissingField(Campo::NomeTurma).to_string(),
            "O nome da turma é obrigatório."
        );
        assert_eq!(
            ValidationError::InvalidNumber(Campo::Idade).to_string(),
            "Idade deve ser um número válido."
        );
        assert_eq!(
            ValidationError::OutOfRange(Campo::Idade).to_string(),
            "Idade deve ser um número positivo."
        );
        assert_eq!(
            ValidationError::OutOfRange(Campo::Nota).to_string(),
            "A nota deve ser entre 0 e 10."
        );
        assert_eq!(ValidationError::DuplicateEmail.to_string(), "Email já cadastrado.");
    }

    #[test]
    fn media_de_notas() {
        assert_eq!(media_notas(&[]), None);
        assert_eq!(media_notas(&[8.0, 10.0]), Some(9.0));
        assert_eq!(media_notas(&[7.0]), Some(7.0));
    }
}
