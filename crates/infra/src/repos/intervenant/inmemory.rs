use super::IIntervenantRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use dispo_domain::{AvailabilityDocument, Intervenant, ID};

pub struct InMemoryIntervenantRepo {
    intervenants: std::sync::Mutex<Vec<Intervenant>>,
}

impl InMemoryIntervenantRepo {
    pub fn new() -> Self {
        Self {
            intervenants: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IIntervenantRepo for InMemoryIntervenantRepo {
    async fn insert(&self, intervenant: &Intervenant) -> anyhow::Result<()> {
        if any(&self.intervenants, |i| i.email == intervenant.email) {
            anyhow::bail!("An intervenant with email {} already exists", intervenant.email);
        }
        insert(intervenant, &self.intervenants);
        Ok(())
    }

    async fn save(&self, intervenant: &Intervenant) -> anyhow::Result<()> {
        if any(&self.intervenants, |i| {
            i.id != intervenant.id && i.email == intervenant.email
        }) {
            anyhow::bail!("An intervenant with email {} already exists", intervenant.email);
        }
        // The availability document is only written by `update_availabilities`
        let updated = update(&intervenant.id, &self.intervenants, |stored| {
            stored.firstname = intervenant.firstname.clone();
            stored.lastname = intervenant.lastname.clone();
            stored.email = intervenant.email.clone();
            stored.key = intervenant.key.clone();
            stored.updated_at = intervenant.updated_at;
            stored.expires_at = intervenant.expires_at;
        });
        match updated {
            Some(_) => Ok(()),
            None => anyhow::bail!("Intervenant with id {} was not found", intervenant.id),
        }
    }

    async fn delete(&self, intervenant_id: &ID) -> Option<Intervenant> {
        delete(intervenant_id, &self.intervenants)
    }

    async fn find(&self, intervenant_id: &ID) -> Option<Intervenant> {
        find(intervenant_id, &self.intervenants)
    }

    async fn find_by_key(&self, key: &str) -> Option<Intervenant> {
        find_by(&self.intervenants, |i| i.key == key).into_iter().next()
    }

    async fn find_by_email(&self, email: &str) -> Option<Intervenant> {
        find_by(&self.intervenants, |i| i.email == email)
            .into_iter()
            .next()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Intervenant>> {
        let mut intervenants = find_by(&self.intervenants, |_| true);
        intervenants.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(intervenants)
    }

    async fn update_availabilities(
        &self,
        intervenant_id: &ID,
        availabilities: &AvailabilityDocument,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let updated = update(intervenant_id, &self.intervenants, |i| {
            i.availabilities = availabilities.clone();
            i.updated_at = updated_at;
        });
        match updated {
            Some(_) => Ok(()),
            None => anyhow::bail!("Intervenant with id {} was not found", intervenant_id),
        }
    }
}
