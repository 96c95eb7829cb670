use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contribstats_db::PgStore;
use contribstats_pipeline::JobRunner;
use contribstats_worker::config::WorkerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contribstats_worker=info,contribstats_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env().context("Invalid worker configuration")?;
    tracing::info!(job = %config.job, policy = ?config.policy, "Loaded worker configuration");

    // --- Database ---
    let pool = contribstats_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    contribstats_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    contribstats_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Job ---
    let runner = JobRunner::new(PgStore::new(pool), config.policy)?;
    let report = runner
        .run(config.job)
        .await
        .with_context(|| format!("Job {} failed", config.job))?;

    for line in report.lines() {
        println!("{line}");
    }

    Ok(())
}
