use core_config::{ConfigError, env_optional};

/// Initial admin account created at startup when both variables are set.
///
/// | Variable         | Default |
/// |------------------|---------|
/// | `ADMIN_LOGIN`    | unset   |
/// | `ADMIN_PASSWORD` | unset   |
#[derive(Clone)]
pub struct AdminBootstrap {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminBootstrap {
    /// `Ok(None)` when neither variable is set; setting only one is an error.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        match (env_optional("ADMIN_LOGIN"), env_optional("ADMIN_PASSWORD")) {
            (None, None) => Ok(None),
            (Some(login), Some(password)) => Ok(Some(Self { login, password })),
            (Some(_), None) => Err(ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string())),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar("ADMIN_LOGIN".to_string())),
        }
    }
}
