// src/models/mod.rs
pub mod aluno;
pub mod projeto;
pub mod turma;
