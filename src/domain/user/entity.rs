//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, UserValidationError};

/// User identifier - at least 5 characters, no whitespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered account of the planner.
///
/// The password is kept and compared as plain text, exactly as it sits in
/// `tbl_user.user_pwd`. This is a known security defect of the account
/// store; it is never written to serialized output or logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Plain-text password - never exposed in serialization
    #[serde(skip_serializing)]
    password: String,
    /// Registration timestamp, fixed at creation
    registered_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly registered user
    pub fn new(id: UserId, password: impl Into<String>) -> Self {
        Self {
            id,
            password: password.into(),
            registered_at: Utc::now(),
        }
    }

    /// Rebuild a user from a stored row
    pub fn restore(id: UserId, password: impl Into<String>, registered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            password: password.into(),
            registered_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Replace the password
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("alice1").unwrap();
        assert_eq!(id.as_str(), "alice1");
        assert_eq!(id.to_string(), "alice1");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("abc").is_err());
        assert!(UserId::new("alice bob").is_err());
    }

    #[test]
    fn test_user_id_deserialize_validates() {
        let id: UserId = serde_json::from_str("\"alice1\"").unwrap();
        assert_eq!(id.as_str(), "alice1");

        let result: Result<UserId, _> = serde_json::from_str("\"bob\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_user_creation() {
        let before = Utc::now();
        let user = User::new(UserId::new("alice1").unwrap(), "Passw0rd1234");

        assert_eq!(user.id().as_str(), "alice1");
        assert_eq!(user.password(), "Passw0rd1234");
        assert!(user.registered_at() >= before);
    }

    #[test]
    fn test_user_restore_keeps_timestamp() {
        let registered_at = Utc.with_ymd_and_hms(2019, 6, 1, 8, 30, 0).unwrap();
        let user = User::restore(UserId::new("alice1").unwrap(), "Passw0rd1234", registered_at);

        assert_eq!(user.registered_at(), registered_at);
    }

    #[test]
    fn test_set_password_keeps_registration_time() {
        let mut user = User::new(UserId::new("alice1").unwrap(), "Passw0rd1234");
        let registered_at = user.registered_at();

        user.set_password("NewPassw0rd99");
        assert_eq!(user.password(), "NewPassw0rd99");
        assert_eq!(user.registered_at(), registered_at);
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = User::new(UserId::new("alice1").unwrap(), "Passw0rd1234");

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice1"));
        assert!(json.contains("registered_at"));
        assert!(!json.contains("Passw0rd1234"));
        assert!(!json.contains("password"));
    }
}
