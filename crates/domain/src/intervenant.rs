use crate::{
    availability::AvailabilityDocument,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Months, Utc};
use dispo_utils::create_random_secret;
use thiserror::Error;

const ACCESS_KEY_LEN: usize = 32;

/// A contributor whose weekly availabilities are collected.
///
/// The `key` is the only credential needed to read and edit the availabilities,
/// until `expires_at`.
#[derive(Debug, Clone)]
pub struct Intervenant {
    pub id: ID,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub availabilities: AvailabilityDocument,
}

#[derive(Error, Debug, PartialEq)]
pub enum KeyAccessError {
    #[error("The access key expired at {0}")]
    Expired(DateTime<Utc>),
}

impl Intervenant {
    pub fn new(
        firstname: String,
        lastname: String,
        email: String,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            firstname,
            lastname,
            email,
            key: Self::generate_access_key(),
            created_at: now,
            updated_at: now,
            expires_at,
            availabilities: AvailabilityDocument::empty(),
        }
    }

    pub fn generate_access_key() -> String {
        let rand_secret = create_random_secret(ACCESS_KEY_LEN);
        format!("ik_{}", rand_secret)
    }

    /// Expiry given to keys when the admin does not choose one
    pub fn default_expiry(now: DateTime<Utc>, validity_months: u32) -> DateTime<Utc> {
        now.checked_add_months(Months::new(validity_months))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Replaces the access key. The previous key stops working right away.
    pub fn regenerate_key(&mut self, expires_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.key = Self::generate_access_key();
        self.expires_at = expires_at;
        self.updated_at = now;
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn check_access(&self, now: DateTime<Utc>) -> Result<(), KeyAccessError> {
        if self.is_expired(now) {
            Err(KeyAccessError::Expired(self.expires_at))
        } else {
            Ok(())
        }
    }
}

impl Entity for Intervenant {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn intervenant(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Intervenant {
        Intervenant::new(
            "Ada".into(),
            "Lovelace".into(),
            "ada@example.com".into(),
            expires_at,
            now,
        )
    }

    #[test]
    fn it_creates_intervenant_with_key_and_empty_document() {
        let now = Utc::now();
        let i = intervenant(now, now + Duration::days(10));
        assert!(i.key.starts_with("ik_"));
        assert!(i.key.len() > ACCESS_KEY_LEN);
        assert_eq!(i.availabilities, AvailabilityDocument::empty());
        assert_eq!(i.created_at, now);
    }

    #[test]
    fn expired_key_is_denied() {
        let now = Utc::now();
        let yesterday = now - Duration::days(1);
        let i = intervenant(now - Duration::days(30), yesterday);
        assert!(i.is_expired(now));
        assert_eq!(i.check_access(now), Err(KeyAccessError::Expired(yesterday)));

        let i = intervenant(now, now + Duration::days(1));
        assert!(i.check_access(now).is_ok());
        // Access is still granted at the exact expiry instant
        assert!(i.check_access(i.expires_at).is_ok());
    }

    #[test]
    fn regenerating_key_replaces_previous_one() {
        let now = Utc::now();
        let mut i = intervenant(now, now);
        let old_key = i.key.clone();
        let later = now + Duration::days(2);
        i.regenerate_key(later + Duration::days(60), later);
        assert_ne!(i.key, old_key);
        assert_eq!(i.updated_at, later);
        assert!(i.check_access(later).is_ok());
    }

    #[test]
    fn default_expiry_adds_calendar_months() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        assert_eq!(
            Intervenant::default_expiry(now, 2),
            Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap()
        );
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(
            Intervenant::default_expiry(now, 2),
            Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap()
        );
    }
}
