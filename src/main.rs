//! bankcore daemon
//!
//! Connects to PostgreSQL, ensures the schema and runs the overdue
//! sweeper on its timer. The request-facing operations (accounts,
//! transfers, credits, analytics) are library surface consumed by a thin
//! request layer that is wired separately.

use std::time::Duration;

use bankcore::config::AppConfig;
use bankcore::db::{self, Database};
use bankcore::logging::init_logging;
use bankcore::sweeper::OverdueSweeper;

/// Get environment name from command line (--env argument)
fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    tracing::info!(env = %env, "bankcore starting");

    let database = Database::connect(&config.database).await?;
    db::init_schema(database.pool()).await?;
    database.health_check().await?;

    if config.sweeper.enabled {
        let period = Duration::from_secs(config.sweeper.interval_hours * 3600);
        tracing::info!(
            interval_hours = config.sweeper.interval_hours,
            "Overdue sweeper scheduled"
        );
        OverdueSweeper::new(database.pool().clone(), period).spawn();
    } else {
        tracing::warn!("Overdue sweeper disabled by config");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, exiting");
    Ok(())
}
