//! Cookie session layer and its MongoDB-backed store.
//!
//! The layer is generic over the store: the service runs on
//! [`MongoSessionStore`], tests use `tower_sessions::MemoryStore`.

mod mongo_store;

pub use mongo_store::{MongoSessionStore, spawn_expired_session_cleanup};

use core_config::{ConfigError, Environment, FromEnv, env_or_default, env_parse_or};
use tower_sessions::cookie::{SameSite, time::Duration};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

const DEFAULT_COOKIE_NAME: &str = "inventory.sid";
const DEFAULT_INACTIVITY_DAYS: i64 = 7;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 3600;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Sessions expire after this many days without a request
    pub inactivity_days: i64,
    /// How often expired sessions are purged from the store
    pub cleanup_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            inactivity_days: DEFAULT_INACTIVITY_DAYS,
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
        }
    }
}

impl FromEnv for SessionConfig {
    /// - SESSION_COOKIE_NAME: defaults to `inventory.sid`
    /// - SESSION_INACTIVITY_DAYS: defaults to 7
    /// - SESSION_CLEANUP_INTERVAL_SECS: defaults to 3600
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cookie_name: env_or_default("SESSION_COOKIE_NAME", DEFAULT_COOKIE_NAME),
            inactivity_days: env_parse_or("SESSION_INACTIVITY_DAYS", DEFAULT_INACTIVITY_DAYS)?,
            cleanup_interval_secs: env_parse_or(
                "SESSION_CLEANUP_INTERVAL_SECS",
                DEFAULT_CLEANUP_INTERVAL_SECS,
            )?,
        })
    }
}

/// Build the session layer. The cookie is only marked `Secure` when the
/// environment serves HTTPS.
pub fn create_session_layer<S>(
    store: S,
    config: &SessionConfig,
    environment: &Environment,
) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_secure(environment.use_https())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(config.inactivity_days)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        temp_env::with_vars(
            [
                ("SESSION_COOKIE_NAME", None::<&str>),
                ("SESSION_INACTIVITY_DAYS", None::<&str>),
                ("SESSION_CLEANUP_INTERVAL_SECS", None::<&str>),
            ],
            || {
                let config = SessionConfig::from_env().unwrap();
                assert_eq!(config, SessionConfig::default());
            },
        );
    }

    #[test]
    fn test_session_config_from_env() {
        temp_env::with_vars(
            [
                ("SESSION_COOKIE_NAME", Some("sid")),
                ("SESSION_INACTIVITY_DAYS", Some("30")),
                ("SESSION_CLEANUP_INTERVAL_SECS", Some("60")),
            ],
            || {
                let config = SessionConfig::from_env().unwrap();
                assert_eq!(config.cookie_name, "sid");
                assert_eq!(config.inactivity_days, 30);
                assert_eq!(config.cleanup_interval_secs, 60);
            },
        );
    }

    #[test]
    fn test_session_config_rejects_bad_days() {
        temp_env::with_var("SESSION_INACTIVITY_DAYS", Some("a week"), || {
            assert!(SessionConfig::from_env().is_err());
        });
    }
}
