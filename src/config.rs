// src/config.rs
use crate::error::{AppError, AppResult};
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str =
    "gestao_escolar=debug,tower_http=info,sqlx=warn,tower_sessions=info";

/// Configuração lida do ambiente (e do `.env`, carregado em main).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|chave| std::env::var(chave).ok())
    }

    // Separado de from_env para os testes não mexerem no ambiente do processo
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ler = |chave: &str| lookup(chave).filter(|v| !v.trim().is_empty());

        let database_url = ler("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host: IpAddr = ler("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("HOST inválido: {}", e)))?;

        let port = match ler("PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::ConfigError(format!("PORT inválida '{}': {}", p, e)))?,
            None => DEFAULT_PORT,
        };

        let log_filter = ler("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            database_url,
            bind_addr: SocketAddr::new(host, port),
            log_filter,
        })
    }
}
