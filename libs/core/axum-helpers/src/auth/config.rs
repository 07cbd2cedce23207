use core_config::{ConfigError, FromEnv, env_parse, env_required};

const MIN_SECRET_LEN: usize = 32;

/// Token signing settings.
///
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_TTL_HOURS` (default 12)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                    MIN_SECRET_LEN,
                    secret.len()
                ),
            });
        }

        Ok(Self {
            secret,
            ttl_hours: 12,
        })
    }

    pub fn with_ttl_hours(mut self, ttl_hours: i64) -> Self {
        self.ttl_hours = ttl_hours;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let ttl_hours: i64 = env_parse("JWT_TTL_HOURS", "12")?;
        if ttl_hours <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_HOURS".to_string(),
                details: "must be positive".to_string(),
            });
        }

        Ok(Self::new(env_required("JWT_SECRET")?)?.with_ttl_hours(ttl_hours))
    }
}
