//! Domain layer - Core business rules and entities

pub mod error;
pub mod locale;
pub mod user;

pub use error::{AccountError, AuthFailure};
pub use locale::Locale;
pub use user::{User, UserId, UserRepository, UserValidationError};
