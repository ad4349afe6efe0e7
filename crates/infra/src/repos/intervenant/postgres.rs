use super::IIntervenantRepo;
use chrono::{DateTime, Utc};
use dispo_domain::{AvailabilityDocument, Intervenant, ID};
use serde_json::Value;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use std::convert::{TryFrom, TryInto};
use tracing::error;

pub struct PostgresIntervenantRepo {
    pool: PgPool,
}

impl PostgresIntervenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IntervenantRaw {
    intervenant_uid: Uuid,
    firstname: String,
    lastname: String,
    email: String,
    key: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    availabilities: Value,
}

impl TryFrom<IntervenantRaw> for Intervenant {
    type Error = serde_json::Error;

    fn try_from(e: IntervenantRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: e.intervenant_uid.into(),
            firstname: e.firstname,
            lastname: e.lastname,
            email: e.email,
            key: e.key,
            created_at: e.created_at,
            updated_at: e.updated_at,
            expires_at: e.expires_at,
            availabilities: serde_json::from_value(e.availabilities)?,
        })
    }
}

fn into_intervenant(raw: IntervenantRaw) -> Option<Intervenant> {
    let id = raw.intervenant_uid;
    raw.try_into()
        .map_err(|e| {
            error!(
                "Stored availabilities of intervenant: {:?} are malformed: {:?}",
                id, e
            );
        })
        .ok()
}

#[async_trait::async_trait]
impl IIntervenantRepo for PostgresIntervenantRepo {
    async fn insert(&self, intervenant: &Intervenant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO intervenants(intervenant_uid, firstname, lastname, email, key, created_at, updated_at, expires_at, availabilities)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(intervenant.id.inner_ref())
        .bind(&intervenant.firstname)
        .bind(&intervenant.lastname)
        .bind(&intervenant.email)
        .bind(&intervenant.key)
        .bind(intervenant.created_at)
        .bind(intervenant.updated_at)
        .bind(intervenant.expires_at)
        .bind(Json(&intervenant.availabilities))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert intervenant: {:?}. DB returned error: {:?}",
                intervenant, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, intervenant: &Intervenant) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE intervenants
            SET firstname = $2,
            lastname = $3,
            email = $4,
            key = $5,
            updated_at = $6,
            expires_at = $7
            WHERE intervenant_uid = $1
            "#,
        )
        .bind(intervenant.id.inner_ref())
        .bind(&intervenant.firstname)
        .bind(&intervenant.lastname)
        .bind(&intervenant.email)
        .bind(&intervenant.key)
        .bind(intervenant.updated_at)
        .bind(intervenant.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save intervenant: {:?}. DB returned error: {:?}",
                intervenant, e
            );
            e
        })?;
        if res.rows_affected() == 0 {
            anyhow::bail!("Intervenant with id {} was not found", intervenant.id);
        }
        Ok(())
    }

    async fn delete(&self, intervenant_id: &ID) -> Option<Intervenant> {
        let res: Option<IntervenantRaw> = sqlx::query_as(
            r#"
            DELETE FROM intervenants
            WHERE intervenant_uid = $1
            RETURNING *
            "#,
        )
        .bind(intervenant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete intervenant with id: {:?} failed. DB returned error: {:?}",
                intervenant_id, e
            );
            e
        })
        .ok()?;
        res.and_then(into_intervenant)
    }

    async fn find(&self, intervenant_id: &ID) -> Option<Intervenant> {
        let res: Option<IntervenantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM intervenants
            WHERE intervenant_uid = $1
            "#,
        )
        .bind(intervenant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find intervenant with id: {:?} failed. DB returned error: {:?}",
                intervenant_id, e
            );
            e
        })
        .ok()?;
        res.and_then(into_intervenant)
    }

    async fn find_by_key(&self, key: &str) -> Option<Intervenant> {
        let res: Option<IntervenantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM intervenants
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find intervenant by access key failed. DB returned error: {:?}",
                e
            );
            e
        })
        .ok()?;
        res.and_then(into_intervenant)
    }

    async fn find_by_email(&self, email: &str) -> Option<Intervenant> {
        let res: Option<IntervenantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM intervenants
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find intervenant with email: {:?} failed. DB returned error: {:?}",
                email, e
            );
            e
        })
        .ok()?;
        res.and_then(into_intervenant)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Intervenant>> {
        let intervenants_raw: Vec<IntervenantRaw> = sqlx::query_as(
            r#"
            SELECT * FROM intervenants
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Find all intervenants failed. DB returned error: {:?}", e);
            e
        })?;
        Ok(intervenants_raw
            .into_iter()
            .filter_map(into_intervenant)
            .collect())
    }

    async fn update_availabilities(
        &self,
        intervenant_id: &ID,
        availabilities: &AvailabilityDocument,
        updated_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE intervenants
            SET availabilities = $2,
            updated_at = $3
            WHERE intervenant_uid = $1
            "#,
        )
        .bind(intervenant_id.inner_ref())
        .bind(Json(availabilities))
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to update availabilities of intervenant: {:?}. DB returned error: {:?}",
                intervenant_id, e
            );
            e
        })?;
        if res.rows_affected() == 0 {
            anyhow::bail!("Intervenant with id {} was not found", intervenant_id);
        }
        Ok(())
    }
}
