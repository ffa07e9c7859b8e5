use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eshop_api::{
    config,
    db,
    migrator::{run_migration, Migrator},
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

#[derive(Parser)]
#[command(name = "eshop-migrate", about = "Manage the eshop-api database schema")]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Database URL (defaults to DATABASE_URL, then the loaded configuration)"
    )]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations
    Up {
        #[arg(long, help = "Apply at most this many migrations")]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        #[arg(long, default_value_t = 1, help = "Number of migrations to roll back")]
        steps: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    if let Some(url) = explicit {
        return Ok(url);
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }
    let cfg = config::load_config().context("failed to load configuration")?;
    Ok(cfg.database_url)
}

#[tokio::main]
async fn main() -> Result<()> {
    config::init_tracing("info", false);
    let cli = Cli::parse();
    let url = resolve_database_url(cli.database_url)?;

    match cli.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps: None } => run_migration(&url).await?,
        Command::Up { steps } => {
            let conn = db::establish_connection(&url).await?;
            Migrator::up(&conn, steps).await?;
            info!(?steps, "migrations applied");
        }
        Command::Down { steps } => {
            let conn = db::establish_connection(&url).await?;
            Migrator::down(&conn, Some(steps)).await?;
            info!(steps, "migrations rolled back");
        }
        Command::Status => {
            let conn = db::establish_connection(&url).await?;
            Migrator::status(&conn).await?;
        }
        Command::Fresh => {
            let conn = db::establish_connection(&url).await?;
            Migrator::fresh(&conn).await?;
            info!("schema recreated");
        }
    }

    Ok(())
}
