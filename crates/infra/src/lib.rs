mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{IIntervenantRepo, IUserRepo, Repos};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct DispoContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl DispoContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(&params.postgres_connection_string).await?;
        Ok(Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment.
///
/// Falls back to inmemory repositories when no `DATABASE_URL` is given.
pub async fn setup_context() -> anyhow::Result<DispoContext> {
    match get_psql_connection_string() {
        Some(postgres_connection_string) => {
            info!("DATABASE_URL was provided, using postgres repositories");
            DispoContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        None => {
            warn!("DATABASE_URL was not provided, data will only be kept in memory");
            Ok(DispoContext::create_inmemory())
        }
    }
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}

/// Runs the pending migrations, a no-op without a `DATABASE_URL`
pub async fn run_migration() -> anyhow::Result<()> {
    let connection_string = match get_psql_connection_string() {
        Some(s) => s,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e: MigrateError| anyhow::anyhow!("Migration failed: {}", e))
}
