//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::locale::Locale;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID cannot contain whitespace characters")]
    IdContainsWhitespace,

    #[error("User ID is too short. Minimum length is {0} characters")]
    IdTooShort(usize),

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password contains forbidden character: '{0}'")]
    ForbiddenCharacter(char),

    #[error("Password must contain both digits and letters")]
    MissingDigitOrLetter,

    /// A password rule failed for the replacement password of a password change
    #[error("New password rejected: {0}")]
    NewPassword(Box<UserValidationError>),
}

impl UserValidationError {
    /// Render the violated rule in the caller's language
    pub fn message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::ZhCn => match self {
                Self::EmptyId => "用户名称不能为空".to_string(),
                Self::IdContainsWhitespace => {
                    "用户名称不能包含空格、制表符、换页符等空白字符".to_string()
                }
                Self::IdTooShort(min) => format!("用户名称不能少于{}个字符", min),
                Self::PasswordMismatch => "确认密码错误".to_string(),
                Self::PasswordTooShort(min) => format!("密码长度小于{}个字符", min),
                Self::ForbiddenCharacter(c) => format!("密码包含非法字符: '{}'", c),
                Self::MissingDigitOrLetter => "密码需同时包含数字和字母".to_string(),
                Self::NewPassword(inner) => match inner.as_ref() {
                    Self::PasswordMismatch => "确认新密码错误，请重新确认".to_string(),
                    Self::PasswordTooShort(min) => format!("新密码长度小于{}个字符", min),
                    Self::ForbiddenCharacter(c) => format!("新密码包含非法字符: '{}'", c),
                    Self::MissingDigitOrLetter => "新密码需同时包含数字和字母".to_string(),
                    other => other.message(locale),
                },
            },
        }
    }
}

pub const MIN_USER_ID_LENGTH: usize = 5;
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Characters a password may not contain
pub const FORBIDDEN_PASSWORD_CHARACTERS: &str = "_+|<>,.?/:;'[]{}\"";

static FORBIDDEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[_+|<>,.?/:;'\[\]{}"]"#).unwrap());

static DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

static LETTER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]").unwrap());

/// Validate a user ID
///
/// Rules, checked in order:
/// - Cannot be empty
/// - No whitespace of any kind (spaces, tabs, form feeds, newlines)
/// - Minimum 5 characters
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.chars().any(char::is_whitespace) {
        return Err(UserValidationError::IdContainsWhitespace);
    }

    if id.chars().count() < MIN_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooShort(MIN_USER_ID_LENGTH));
    }

    Ok(())
}

/// Validate a password together with its confirmation.
///
/// The confirmation is compared first; format rules only run once both
/// entries agree.
pub fn validate_password(password: &str, confirm: &str) -> Result<(), UserValidationError> {
    if password != confirm {
        return Err(UserValidationError::PasswordMismatch);
    }

    validate_password_format(password)
}

/// Validate the replacement password of a password change.
///
/// Same rules as [`validate_password`]; failures are wrapped in
/// [`UserValidationError::NewPassword`].
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), UserValidationError> {
    validate_password(password, confirm)
        .map_err(|e| UserValidationError::NewPassword(Box::new(e)))
}

/// Validate a password
///
/// Rules, checked in order:
/// - Minimum 12 characters
/// - None of `_ + | < > , . ? / : ; ' [ ] { } "`
/// - At least one ASCII digit and one ASCII letter
pub fn validate_password_format(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if let Some(m) = FORBIDDEN_PATTERN.find(password) {
        let c = m.as_str().chars().next().unwrap_or_default();
        return Err(UserValidationError::ForbiddenCharacter(c));
    }

    if !DIGIT_PATTERN.is_match(password) || !LETTER_PATTERN.is_match(password) {
        return Err(UserValidationError::MissingDigitOrLetter);
    }

    Ok(())
}
