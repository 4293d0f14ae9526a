//! Static bearer token validator.
//!
//! Maps a fixed set of opaque tokens to users. Tokens come from
//! configuration (`auth.static_tokens`) or are registered directly in tests.
//!
//! # Example
//!
//! ```ignore
//! use period_tracker::adapters::auth::StaticTokenValidator;
//!
//! let validator = StaticTokenValidator::new()
//!     .with_test_user("valid-token", "user-123");
//!
//! let user = validator.validate("valid-token").await?;
//! assert_eq!(user.id.as_str(), "user-123");
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, ValidationError};
use crate::ports::SessionValidator;

/// Session validator over a fixed token table.
///
/// Tokens not in the table return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, AuthenticatedUser>,
}

impl StaticTokenValidator {
    /// Creates a validator that accepts no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a validator from `(token, user_id)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any user ID is blank.
    pub fn from_pairs<I, T, U>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (T, U)>,
        T: Into<String>,
        U: Into<String>,
    {
        let mut validator = Self::new();
        for (token, user_id) in pairs {
            let user = AuthenticatedUser::new(UserId::new(user_id)?);
            validator.tokens.insert(token.into(), user);
        }
        Ok(validator)
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Adds a valid token for a user with the given ID.
    ///
    /// Blank IDs are ignored.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_user(token, AuthenticatedUser::new(id)),
            Err(_) => self,
        }
    }

    /// Returns the number of registered tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl SessionValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
