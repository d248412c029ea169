use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::OwnerId;

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_USERNAME_LENGTH: usize = 64;

/// Registration payload for the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_username(&self.username)?;
        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(ModelError::InvalidField {
                field: "password",
                reason: format!(
                    "must be at least {MIN_PASSWORD_LENGTH} characters"
                ),
            });
        }
        Ok(())
    }
}

/// Login payload for the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_username(&self.username)?;
        if self.password.is_empty() {
            return Err(ModelError::MissingField("password"));
        }
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), ModelError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ModelError::MissingField("username"));
    }
    if trimmed.len() > MAX_USERNAME_LENGTH {
        return Err(ModelError::InvalidField {
            field: "username",
            reason: format!("must be at most {MAX_USERNAME_LENGTH} characters"),
        });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(ModelError::InvalidField {
            field: "username",
            reason: "may only contain letters, digits, '_', '-' and '.'"
                .to_string(),
        });
    }
    Ok(())
}

/// Opaque bearer token issued on sign-up and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Public view of an owner identity, returned by the verification endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: OwnerId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_usernames() {
        for name in ["ada", "grace_h", "kay.94", "pet-lover"] {
            let request = SignUpRequest {
                username: name.to_string(),
                password: "hunter2hunter2".to_string(),
            };
            assert!(request.validate().is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn rejects_short_passwords_and_bad_usernames() {
        let request = SignUpRequest {
            username: "ada".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());

        let request = SignUpRequest {
            username: "no spaces allowed".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn sign_in_requires_password() {
        let request = SignInRequest {
            username: "ada".to_string(),
            password: String::new(),
        };
        assert!(matches!(
            request.validate(),
            Err(ModelError::MissingField("password"))
        ));
    }
}
