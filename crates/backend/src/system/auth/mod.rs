pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

use once_cell::sync::OnceCell;

use crate::shared::config::AuthConfig;

static AUTH: OnceCell<AuthSettings> = OnceCell::new();

/// Longest session a token can be issued for (30 days)
pub const MAX_SESSION_HOURS: i64 = 720;

/// Resolved at startup from `[auth]` and the environment
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    /// argon2 PHC string; `None` disables login
    pub password_hash: Option<String>,
    pub session_hours: i64,
}

impl AuthSettings {
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let password_hash = match (&config.password_hash, &config.password) {
            (Some(hash), _) => Some(hash.clone()),
            (None, Some(plain)) => Some(password::hash_password(plain)?),
            (None, None) => None,
        };
        let jwt_secret = match &config.jwt_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::info!("JWT_SECRET not set, generated a per-process secret");
                jwt::generate_jwt_secret()
            }
        };

        Ok(Self {
            jwt_secret,
            password_hash,
            session_hours: config.session_hours.clamp(1, MAX_SESSION_HOURS),
        })
    }
}

/// Install auth settings for the process (first call wins)
pub fn initialize(config: &AuthConfig) -> anyhow::Result<()> {
    let settings = AuthSettings::from_config(config)?;
    if settings.password_hash.is_none() {
        tracing::warn!("No STAFF_PASSWORD or STAFF_PASSWORD_HASH configured, login is disabled");
    }
    if AUTH.set(settings).is_err() {
        tracing::warn!("Auth already initialized, ignoring");
    }
    Ok(())
}

pub fn settings() -> anyhow::Result<&'static AuthSettings> {
    AUTH.get()
        .ok_or_else(|| anyhow::anyhow!("Auth is not initialized"))
}

#[cfg(test)]
pub(crate) const TEST_PASSWORD: &str = "letmein";

/// Settings shared by every test that goes through the router
#[cfg(test)]
pub(crate) fn install_for_tests() -> &'static AuthSettings {
    AUTH.get_or_init(|| AuthSettings {
        jwt_secret: "router-test-secret".to_string(),
        password_hash: password::hash_password(TEST_PASSWORD).ok(),
        session_hours: 1,
    })
}
