use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var}='{value}' is not a valid number")]
    InvalidNumber { var: String, value: String },
}

/// Runtime configuration, loaded from the environment with defaults
/// matching the reference deployment. Secrets belong in `.env` (loaded by
/// the binary before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expires_minutes: i64,
    pub razorpay: RazorpayConfig,
    pub twelve_data_key: Option<String>,
    pub frontend_origin: String,
}

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub base_url: String,
    pub key_id: String,
    pub key_secret: String,
    pub source_account: String,
    pub fund_account_id: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let expires = var_or("JWT_EXPIRES_MINUTES", "120");
        let jwt_expires_minutes =
            expires
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "JWT_EXPIRES_MINUTES".to_string(),
                    value: expires.clone(),
                })?;

        Ok(Self {
            jwt_secret: var_or("JWT_SECRET", "devsecret"),
            jwt_expires_minutes,
            razorpay: RazorpayConfig {
                base_url: var_or("RAZORPAY_BASE_URL", "https://api.razorpay.com/v1"),
                key_id: var_or("RAZORPAY_KEY_ID", "rzp_test"),
                key_secret: var_or("RAZORPAY_KEY_SECRET", "secret"),
                source_account: var_or("RAZORPAY_SOURCE_ACCOUNT", "000000000000"),
                fund_account_id: var_or("RAZORPAY_FUND_ACCOUNT_ID", "fa_XXXX"),
            },
            twelve_data_key: env::var("TWELVE_DATA_KEY").ok().filter(|k| !k.is_empty()),
            frontend_origin: var_or("FRONTEND_URL", "http://localhost:3000"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; keep them in one test so they
    // cannot race each other.
    #[test]
    fn test_defaults_and_invalid_number() {
        unsafe {
            env::remove_var("JWT_SECRET");
            env::remove_var("JWT_EXPIRES_MINUTES");
            env::remove_var("TWELVE_DATA_KEY");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.jwt_secret, "devsecret");
        assert_eq!(config.jwt_expires_minutes, 120);
        assert_eq!(config.razorpay.key_id, "rzp_test");
        assert!(config.twelve_data_key.is_none());

        unsafe {
            env::set_var("JWT_EXPIRES_MINUTES", "soon");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
        unsafe {
            env::remove_var("JWT_EXPIRES_MINUTES");
        }
    }
}
