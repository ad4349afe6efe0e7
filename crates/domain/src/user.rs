use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use dispo_utils::{hash_password, verify_password, PasswordHashError};

/// An administrator of the roster
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        name: Option<String>,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, PasswordHashError> {
        Ok(Self {
            id: Default::default(),
            email,
            name,
            password_hash: hash_password(password)?,
            created_at: now,
        })
    }

    /// A malformed stored hash never verifies
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash).unwrap_or(false)
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_verifies_password() {
        let user = User::new("admin@example.com".into(), None, "secret1", Utc::now()).unwrap();
        assert_ne!(user.password_hash, "secret1");
        assert!(user.verify_password("secret1"));
        assert!(!user.verify_password("secret2"));
    }

    #[test]
    fn corrupted_hash_does_not_verify() {
        let mut user = User::new("admin@example.com".into(), None, "secret1", Utc::now()).unwrap();
        user.password_hash = "garbage".into();
        assert!(!user.verify_password("secret1"));
    }
}
