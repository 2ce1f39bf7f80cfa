//! User infrastructure module
//!
//! This module provides the account service and the repository
//! implementations it runs against: PostgreSQL for production and an
//! in-memory map for tests and embedding.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::AccountService;
