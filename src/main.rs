// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod db;
mod error;
mod models;
mod rules;
mod services;
mod state;
mod templates;
mod web;

#[cfg(test)]
mod test_support;

// --- Imports ---
use crate::{config::AppConfig, state::AppState};
use axum::serve;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando servidor Gestão Escolar...");

    // --- Configuração da Base de Dados ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/inicializar DB: {}", e));
        }
    };

    // --- Configuração das Sessões (mensagens flash) ---
    let session_layer = web::flash::session_layer(db_pool.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Falha ao configurar sessões: {}", e))?;
    tracing::info!("🔑 Camada de sessão configurada.");

    let app_state = AppState { db_pool };

    // --- Configuração do Endereço e Listener ---
    let addr = config.bind_addr;
    tracing::info!("📡 Servidor escutando em http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", addr, e);
            return Err(e.into());
        }
    };

    let app = web::routes::create_app(app_state, session_layer);

    // --- Início do Servidor ---
    tracing::info!("👂 Servidor pronto para aceitar conexões...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
