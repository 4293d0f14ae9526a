//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration for the built-in token validator
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Comma-separated `token=user_id` pairs
    #[serde(default)]
    pub static_tokens: Option<String>,
}

impl AuthConfig {
    /// Parses `static_tokens` into `(token, user_id)` pairs.
    ///
    /// Blank entries are skipped.
    pub fn token_pairs(&self) -> Result<Vec<(String, String)>, ValidationError> {
        let Some(raw) = self.static_tokens.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| -> Result<(String, String), ValidationError> {
                let (token, user_id) = entry
                    .split_once('=')
                    .map(|(t, u)| (t.trim(), u.trim()))
                    .filter(|(t, u)| !t.is_empty() && !u.is_empty())
                    .ok_or_else(|| ValidationError::MalformedStaticToken(entry.to_string()))?;
                Ok((token.to_string(), user_id.to_string()))
            })
            .collect()
    }

    /// Validate authentication configuration
    ///
    /// Every entry must parse. In production at least one token is required.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let pairs = self.token_pairs()?;
        if *environment == Environment::Production && pairs.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__STATIC_TOKENS"));
        }
        Ok(())
    }
}
