use thiserror::Error;

use super::locale::Locale;
use super::user::UserValidationError;

/// Boxed cause carried by [`AccountError::Storage`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a credential check was refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("account not found")]
    AccountNotFound,

    #[error("bad password")]
    BadPassword,

    #[error("old password is incorrect")]
    WrongOldPassword,
}

impl AuthFailure {
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::ZhCn => match self {
                Self::AccountNotFound => "登陆账号不存在".to_string(),
                Self::BadPassword => "密码错误".to_string(),
                Self::WrongOldPassword => "原密码错误".to_string(),
            },
        }
    }
}

/// Errors raised by the account operations
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Validation error: {0}")]
    Validation(#[from] UserValidationError),

    #[error("Conflict: user '{user_id}' is already registered")]
    Conflict { user_id: String },

    #[error("Authentication failed: {0}")]
    Auth(AuthFailure),

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl AccountError {
    pub fn conflict(user_id: impl Into<String>) -> Self {
        Self::Conflict {
            user_id: user_id.into(),
        }
    }

    pub fn auth(failure: AuthFailure) -> Self {
        Self::Auth(failure)
    }

    pub fn storage(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Stable tag for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict { .. } => "conflict",
            Self::Auth(_) => "auth",
            Self::Storage { .. } => "storage",
        }
    }

    /// Message suitable for showing to the caller in their language
    pub fn localized(&self, locale: Locale) -> String {
        match self {
            Self::Validation(e) => e.message(locale),
            Self::Auth(f) => f.message(locale),
            Self::Conflict { user_id } => match locale {
                Locale::En => format!("User ID '{}' is already registered", user_id),
                Locale::ZhCn => format!("该用户名已经被注册: {}", user_id),
            },
            Self::Storage { message, .. } => match locale {
                Locale::En => format!("Storage failure: {}", message),
                Locale::ZhCn => format!("数据库操作失败: {}", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_validation_error() {
        let error = AccountError::from(UserValidationError::EmptyId);
        assert_eq!(error.to_string(), "Validation error: User ID cannot be empty");
        assert_eq!(error.kind(), "validation");
    }

    #[test]
    fn test_conflict_error() {
        let error = AccountError::conflict("alice1");
        assert_eq!(
            error.to_string(),
            "Conflict: user 'alice1' is already registered"
        );
        assert_eq!(error.kind(), "conflict");
    }

    #[test]
    fn test_auth_error() {
        let error = AccountError::auth(AuthFailure::AccountNotFound);
        assert_eq!(error.to_string(), "Authentication failed: account not found");
        assert_eq!(error.kind(), "auth");
    }

    #[test]
    fn test_storage_error_keeps_source() {
        let cause = std::io::Error::other("connection reset");
        let error = AccountError::storage("Failed to insert user", cause);

        assert_eq!(error.to_string(), "Storage error: Failed to insert user");
        assert_eq!(error.kind(), "storage");
        assert_eq!(error.source().unwrap().to_string(), "connection reset");
    }

    #[test]
    fn test_localized_messages() {
        let error = AccountError::auth(AuthFailure::BadPassword);
        assert_eq!(error.localized(Locale::En), "bad password");
        assert_eq!(error.localized(Locale::ZhCn), "密码错误");

        let error = AccountError::conflict("alice1");
        assert_eq!(
            error.localized(Locale::En),
            "User ID 'alice1' is already registered"
        );
        assert!(error.localized(Locale::ZhCn).starts_with("该用户名已经被注册"));
    }
}
