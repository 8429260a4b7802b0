//! Healthcare Bot HTTP server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use healthcare_bot::adapters::http::{dialogue_app, DialogueAppState};
use healthcare_bot::adapters::knowledge::{KnowledgeBase, PatternSymptomMatcher};
use healthcare_bot::adapters::storage::{FileSessionStore, InMemorySessionStore};
use healthcare_bot::config::{AppConfig, StorageBackend};
use healthcare_bot::domain::dialogue::DialogueEngine;
use healthcare_bot::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let knowledge = KnowledgeBase::load(&config.knowledge.path).await?;
    tracing::info!(
        path = %config.knowledge.path.display(),
        diseases = knowledge.disease_count(),
        "Loaded knowledge base"
    );

    let engine = DialogueEngine::new(Arc::new(knowledge), Arc::new(PatternSymptomMatcher::new()))
        .with_settings(config.dialogue.settings());

    let session_store: Arc<dyn SessionStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemorySessionStore::with_idle_timeout(
            config.storage.idle_timeout(),
        )),
        StorageBackend::File => Arc::new(FileSessionStore::new(&config.storage.directory)),
    };
    tracing::info!(backend = ?config.storage.backend, "Session store ready");

    let state = DialogueAppState::new(
        session_store,
        Arc::new(engine),
        config.storage.cookie_name.as_str(),
    );

    let app = dialogue_app(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Healthcare Bot listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
