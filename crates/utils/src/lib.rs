use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::Hmac;
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const PBKDF2_ITERATIONS: u32 = 100_000;
const PBKDF2_KEY_LEN: usize = 32;
const SALT_LEN: usize = 16;

pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

#[derive(Error, Debug, PartialEq)]
pub enum PasswordHashError {
    #[error("The stored password hash is malformed")]
    MalformedHash,
    #[error("Unable to derive the password hash")]
    Derivation,
}

/// Hashes a password with PBKDF2-HMAC-SHA256.
///
/// Output format: `pbkdf2:sha256:<iterations>$<salt>$<hash>` where salt and hash
/// are url-safe base64 without padding.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let mut salt = [0u8; SALT_LEN];
    thread_rng().fill(&mut salt);

    let key = derive(password, &salt, PBKDF2_ITERATIONS, PBKDF2_KEY_LEN)?;

    Ok(format!(
        "pbkdf2:sha256:{}${}${}",
        PBKDF2_ITERATIONS,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parts = stored_hash.split('$').collect::<Vec<_>>();
    if parts.len() != 3 {
        return Err(PasswordHashError::MalformedHash);
    }

    let header = parts[0].split(':').collect::<Vec<_>>();
    if header.len() != 3 || header[0] != "pbkdf2" || header[1] != "sha256" {
        return Err(PasswordHashError::MalformedHash);
    }
    let iterations = header[2]
        .parse::<u32>()
        .map_err(|_| PasswordHashError::MalformedHash)?;

    let salt = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|_| PasswordHashError::MalformedHash)?;
    let expected = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|_| PasswordHashError::MalformedHash)?;
    if expected.is_empty() {
        return Err(PasswordHashError::MalformedHash);
    }

    let computed = derive(password, &salt, iterations, expected.len())?;

    // Constant time comparison
    let diff = computed
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    Ok(diff == 0)
}

fn derive(
    password: &str,
    salt: &[u8],
    iterations: u32,
    key_len: usize,
) -> Result<Vec<u8>, PasswordHashError> {
    let mut key = vec![0u8; key_len];
    pbkdf2::pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations, &mut key)
        .map_err(|_| PasswordHashError::Derivation)?;
    Ok(key)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_secrets_of_given_length() {
        let secret = create_random_secret(30);
        assert_eq!(secret.len(), 30);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(secret, create_random_secret(30));
    }

    #[test]
    fn it_verifies_hashed_password() {
        let hash = hash_password("hunter42").unwrap();
        assert!(hash.starts_with("pbkdf2:sha256:100000$"));
        assert_eq!(verify_password("hunter42", &hash), Ok(true));
        assert_eq!(verify_password("hunter43", &hash), Ok(false));
    }

    #[test]
    fn it_salts_every_hash() {
        assert_ne!(
            hash_password("same").unwrap(),
            hash_password("same").unwrap()
        );
    }

    #[test]
    fn it_rejects_malformed_hashes() {
        for bad in &["", "plain", "pbkdf2:sha256$a$b", "bcrypt:x:10$abc$def", "pbkdf2:sha256:x$a$b"] {
            assert_eq!(
                verify_password("pw", bad),
                Err(PasswordHashError::MalformedHash)
            );
        }
    }
}
