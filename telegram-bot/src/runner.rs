use anyhow::Result;
use chatgate_core::init_tracing;
use session::SessionManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::health::{serve_health, BotStatus, HealthState};
use crate::queue::UserQueues;
use crate::telegram::run_repl;

/// Drops expired sessions every `every`. The first sweep happens one interval after start.
pub fn spawn_sweep_task(manager: Arc<SessionManager>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = manager.sweep_expired().await;
            let remaining = manager.len().await;
            debug!(removed, remaining, "step: session sweep");
        }
    })
}

/// Main entry: init logging, validate config, start the health endpoint and the sweep task,
/// then poll Telegram until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(config.log_file())?;
    config.validate()?;

    let health = HealthState::new();
    let health_task = match config.health_port() {
        0 => None,
        port => {
            let state = health.clone();
            Some(tokio::spawn(async move {
                if let Err(e) = serve_health(port, state).await {
                    error!(error = %e, port, "Health endpoint failed");
                }
            }))
        }
    };

    let components = build_bot_components(&config, None)?;
    let sweep_task = spawn_sweep_task(components.manager.clone(), config.session().sweep_interval());
    let queues = Arc::new(UserQueues::new(build_handler_chain(&components)));

    health.set(BotStatus::Running).await;
    info!("Bot started successfully");

    let result = run_repl(components.teloxide_bot.clone(), queues).await;

    health.set(BotStatus::Stopping).await;
    sweep_task.abort();
    if let Some(task) = health_task {
        task.abort();
    }
    let sessions = components.manager.len().await;
    info!(sessions, "Bot stopped");
    result
}
