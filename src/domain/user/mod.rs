//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the user entity, input validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_new_password, validate_password, validate_password_format, validate_user_id,
    UserValidationError, FORBIDDEN_PASSWORD_CHARACTERS, MIN_PASSWORD_LENGTH,
    MIN_USER_ID_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
