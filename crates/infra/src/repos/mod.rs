mod intervenant;
mod shared;
mod user;

pub use intervenant::IIntervenantRepo;
use intervenant::{InMemoryIntervenantRepo, PostgresIntervenantRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub intervenants: Arc<dyn IIntervenantRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            intervenants: Arc::new(PostgresIntervenantRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            intervenants: Arc::new(InMemoryIntervenantRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
