use core_config::{ConfigError, FromEnv, env_or_default};

const DEFAULT_API_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_VERIFIED_REDIRECT: &str = "http://localhost:3000/email-verified";
const DEFAULT_FAILED_REDIRECT: &str = "http://localhost:3000/email-verification-failed";

/// Where verification links point and where the browser lands afterwards
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Public base URL of this API, without trailing slash
    pub api_public_url: String,
    pub verified_redirect: String,
    pub failed_redirect: String,
}

impl VerificationConfig {
    /// Link embedded in the verification email
    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/api/users/verify-email?token={}",
            self.api_public_url.trim_end_matches('/'),
            token
        )
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            api_public_url: DEFAULT_API_PUBLIC_URL.to_string(),
            verified_redirect: DEFAULT_VERIFIED_REDIRECT.to_string(),
            failed_redirect: DEFAULT_FAILED_REDIRECT.to_string(),
        }
    }
}

impl FromEnv for VerificationConfig {
    /// Reads API_PUBLIC_URL, EMAIL_VERIFIED_REDIRECT and
    /// EMAIL_VERIFICATION_FAILED_REDIRECT, all optional.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_public_url: env_or_default("API_PUBLIC_URL", DEFAULT_API_PUBLIC_URL),
            verified_redirect: env_or_default("EMAIL_VERIFIED_REDIRECT", DEFAULT_VERIFIED_REDIRECT),
            failed_redirect: env_or_default(
                "EMAIL_VERIFICATION_FAILED_REDIRECT",
                DEFAULT_FAILED_REDIRECT,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(
            [
                "API_PUBLIC_URL",
                "EMAIL_VERIFIED_REDIRECT",
                "EMAIL_VERIFICATION_FAILED_REDIRECT",
            ],
            || {
                assert_eq!(VerificationConfig::from_env().unwrap(), VerificationConfig::default());
            },
        );
    }

    #[test]
    fn test_link_uses_public_url() {
        temp_env::with_var("API_PUBLIC_URL", Some("https://api.example.com/"), || {
            let config = VerificationConfig::from_env().unwrap();
            assert_eq!(
                config.verification_link("abc123"),
                "https://api.example.com/api/users/verify-email?token=abc123"
            );
        });
    }
}
