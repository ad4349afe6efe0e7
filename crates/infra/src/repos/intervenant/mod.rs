mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
use dispo_domain::{AvailabilityDocument, Intervenant, ID};
pub use inmemory::InMemoryIntervenantRepo;
pub use postgres::PostgresIntervenantRepo;

#[async_trait::async_trait]
pub trait IIntervenantRepo: Send + Sync {
    async fn insert(&self, intervenant: &Intervenant) -> anyhow::Result<()>;
    /// Stores the profile, key and expiry. The availability document is left untouched
    async fn save(&self, intervenant: &Intervenant) -> anyhow::Result<()>;
    async fn delete(&self, intervenant_id: &ID) -> Option<Intervenant>;
    async fn find(&self, intervenant_id: &ID) -> Option<Intervenant>;
    async fn find_by_key(&self, key: &str) -> Option<Intervenant>;
    async fn find_by_email(&self, email: &str) -> Option<Intervenant>;
    /// Newest intervenants first
    async fn find_all(&self) -> anyhow::Result<Vec<Intervenant>>;
    /// Overwrites the whole availability document, last write wins
    async fn update_availabilities(
        &self,
        intervenant_id: &ID,
        availabilities: &AvailabilityDocument,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<()>;
}
