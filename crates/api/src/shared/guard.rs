use crate::error::DispoError;
use dispo_domain::{Intervenant, ID};
use dispo_infra::DispoContext;
use validator::Validate;

pub struct Guard {}

impl Guard {
    pub fn against_malformed_id(val: String) -> Result<ID, DispoError> {
        val.parse()
            .map_err(|e| DispoError::BadClientData(format!("{}", e)))
    }

    pub fn against_invalid_body<T: Validate>(body: &T) -> Result<(), DispoError> {
        body.validate().map_err(DispoError::from)
    }

    /// The access key gate. Unknown keys are not found, expired ones are
    /// rejected even though the intervenant exists.
    pub async fn against_invalid_key(
        key: &str,
        ctx: &DispoContext,
    ) -> Result<Intervenant, DispoError> {
        let intervenant = ctx
            .repos
            .intervenants
            .find_by_key(key)
            .await
            .ok_or_else(|| {
                DispoError::NotFound("No intervenant was found for the given access key".into())
            })?;
        intervenant
            .check_access(ctx.sys.now())
            .map_err(|e| DispoError::KeyExpired(e.to_string()))?;
        Ok(intervenant)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use dispo_infra::StaticTimeSys;
    use std::sync::Arc;

    #[actix_web::test]
    async fn it_gates_access_keys() {
        let mut ctx = DispoContext::create_inmemory();
        let now = Utc::now();
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: now.timestamp_millis(),
        });
        let active = Intervenant::new(
            "Ada".into(),
            "Lovelace".into(),
            "ada@example.com".into(),
            now + Duration::days(1),
            now,
        );
        let expired = Intervenant::new(
            "Alan".into(),
            "Turing".into(),
            "alan@example.com".into(),
            now - Duration::days(1),
            now - Duration::days(60),
        );
        ctx.repos.intervenants.insert(&active).await.unwrap();
        ctx.repos.intervenants.insert(&expired).await.unwrap();

        let res = Guard::against_invalid_key(&active.key, &ctx).await;
        assert_eq!(res.unwrap().id, active.id);

        // The record exists but the key is no longer accepted
        assert!(ctx.repos.intervenants.find_by_key(&expired.key).await.is_some());
        let res = Guard::against_invalid_key(&expired.key, &ctx).await;
        assert!(matches!(res, Err(DispoError::KeyExpired(_))));

        let res = Guard::against_invalid_key("ik_unknown", &ctx).await;
        assert!(matches!(res, Err(DispoError::NotFound(_))));
    }
}
