//! Borrower account model and capability claims.
//!
//! Authentication itself (login, passwords) is handled outside this server;
//! requests arrive with a JWT whose claims carry the user's capabilities.
//! Capability checks are explicit guard methods so they can be tested
//! without any transport layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Named permission a user account may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Mark instances returned, renew loans, see all borrowed books
    MarkReturned,
    AddAuthor,
    ChangeAuthor,
    DeleteAuthor,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::MarkReturned => "mark_returned",
            Capability::AddAuthor => "add_author",
            Capability::ChangeAuthor => "change_author",
            Capability::DeleteAuthor => "delete_author",
        }
    }
}

/// Borrower account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create borrower account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Guard: fail with Authorization unless the capability is held
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Missing capability: {}",
                capability.as_str()
            )))
        }
    }

    pub fn require_mark_returned(&self) -> Result<(), AppError> {
        self.require(Capability::MarkReturned)
    }

    pub fn require_add_author(&self) -> Result<(), AppError> {
        self.require(Capability::AddAuthor)
    }

    pub fn require_change_author(&self) -> Result<(), AppError> {
        self.require(Capability::ChangeAuthor)
    }

    pub fn require_delete_author(&self) -> Result<(), AppError> {
        self.require(Capability::DeleteAuthor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(capabilities: Vec<Capability>) -> UserClaims {
        UserClaims {
            sub: "patron".to_string(),
            user_id: 7,
            capabilities,
            exp: 4_000_000_000,
            iat: 0,
        }
    }

    #[test]
    fn require_passes_with_capability() {
        let c = claims(vec![Capability::MarkReturned]);
        assert!(c.require_mark_returned().is_ok());
    }

    #[test]
    fn require_fails_without_capability() {
        let c = claims(vec![]);
        let err = c.require_mark_returned().unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[test]
    fn capabilities_are_independent() {
        let c = claims(vec![Capability::AddAuthor]);
        assert!(c.require_add_author().is_ok());
        assert!(c.require_change_author().is_err());
        assert!(c.require_delete_author().is_err());
    }

    #[test]
    fn token_round_trip() {
        let c = claims(vec![Capability::MarkReturned, Capability::AddAuthor]);
        let token = c.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 7);
        assert!(parsed.has(Capability::MarkReturned));
        assert!(!parsed.has(Capability::DeleteAuthor));
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let c = claims(vec![]);
        let token = c.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }
}
