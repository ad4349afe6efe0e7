use dispo_domain::{DayMatching, Tz};
use dispo_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TIMEZONE: Tz = Tz::Europe__Paris;
const DEFAULT_KEY_VALIDITY_MONTHS: u32 = 2;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code used to register new admin `User`s
    pub create_user_secret_code: String,
    /// Secret used to sign the json web tokens handed out to admins
    pub jwt_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Timezone the calendars are displayed in. Incoming timestamps are
    /// converted to wall clock time in this timezone before touching the
    /// availabilities.
    pub timezone: Tz,
    /// How long a freshly minted access key is valid when no expiry is given
    pub key_validity_months: u32,
    /// How stored slots are matched against calendar gestures
    pub day_matching: DayMatching,
}

impl Config {
    pub fn new() -> Self {
        let create_user_secret_code = match std::env::var("CREATE_USER_SECRET_CODE") {
            Ok(code) => code,
            Err(_) => {
                info!("Did not find CREATE_USER_SECRET_CODE environment variable. Going to create one.");
                let code = create_random_secret(16);
                info!(
                    "Secret code for registering admin users was generated and set to: {}",
                    code
                );
                code
            }
        };
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Admin sessions will not survive a restart.");
                create_random_secret(48)
            }
        };

        Self {
            create_user_secret_code,
            jwt_secret,
            port: parse_env("PORT", DEFAULT_PORT),
            timezone: parse_env("DISPO_TIMEZONE", DEFAULT_TIMEZONE),
            key_validity_months: parse_env("KEY_VALIDITY_MONTHS", DEFAULT_KEY_VALIDITY_MONTHS),
            day_matching: parse_env("DAY_MATCHING", DayMatching::default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Debug,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn it_falls_back_to_defaults_on_invalid_values() {
        std::env::set_var("KEY_VALIDITY_MONTHS", "two");
        std::env::set_var("DAY_MATCHING", "fuzzy");
        std::env::set_var("DISPO_TIMEZONE", "Mars/Olympus");
        let config = Config::new();
        assert_eq!(config.key_validity_months, DEFAULT_KEY_VALIDITY_MONTHS);
        assert_eq!(config.day_matching, DayMatching::Exact);
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
        std::env::remove_var("KEY_VALIDITY_MONTHS");
        std::env::remove_var("DAY_MATCHING");
        std::env::remove_var("DISPO_TIMEZONE");
    }

    #[test]
    #[serial_test::serial]
    fn it_reads_values_from_env() {
        std::env::set_var("KEY_VALIDITY_MONTHS", "6");
        std::env::set_var("DAY_MATCHING", "containment");
        std::env::set_var("DISPO_TIMEZONE", "UTC");
        let config = Config::new();
        assert_eq!(config.key_validity_months, 6);
        assert_eq!(config.day_matching, DayMatching::Containment);
        assert_eq!(config.timezone, Tz::UTC);
        std::env::remove_var("KEY_VALIDITY_MONTHS");
        std::env::remove_var("DAY_MATCHING");
        std::env::remove_var("DISPO_TIMEZONE");
    }
}
