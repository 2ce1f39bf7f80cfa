//! CLI module for the personal planner accounts
//!
//! Provides subcommands for the account operations:
//! - `register`: create a new account
//! - `login`: check credentials and print the account
//! - `change-password`: replace the password of an account
//! - `migrate`: apply or revert the database schema

pub mod account;
pub mod migrate;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::{AccountError, Locale};
use crate::infrastructure::logging;

/// Personal planner account management
#[derive(Parser)]
#[command(name = "personplan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new account
    Register(account::RegisterArgs),

    /// Log in with an existing account
    Login(account::LoginArgs),

    /// Change the password of an account
    ChangePassword(account::ChangePasswordArgs),

    /// Apply (or revert) the database schema
    Migrate(migrate::MigrateArgs),
}

/// Load `.env`, the layered configuration, and install logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    Ok(config)
}

/// Turn an account error into a report headed by the localized message
fn report(error: AccountError, locale: Locale) -> anyhow::Error {
    let message = error.localized(locale);
    anyhow::Error::new(error).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthFailure;

    #[test]
    fn test_parse_register() {
        let cli = Cli::try_parse_from([
            "personplan",
            "register",
            "alice1",
            "--password",
            "Passw0rd1234",
            "--confirm",
            "Passw0rd1234",
        ])
        .unwrap();

        match cli.command {
            Command::Register(args) => {
                assert_eq!(args.user_id, "alice1");
                assert_eq!(args.password, "Passw0rd1234");
                assert_eq!(args.confirm, "Passw0rd1234");
            }
            _ => panic!("expected register"),
        }
    }

    #[test]
    fn test_parse_change_password() {
        let cli = Cli::try_parse_from([
            "personplan",
            "change-password",
            "alice1",
            "--old",
            "Passw0rd1234",
            "--new",
            "NewPassw0rd99",
            "--confirm",
            "NewPassw0rd99",
        ])
        .unwrap();

        match cli.command {
            Command::ChangePassword(args) => {
                assert_eq!(args.user_id, "alice1");
                assert_eq!(args.old, "Passw0rd1234");
                assert_eq!(args.new, "NewPassw0rd99");
            }
            _ => panic!("expected change-password"),
        }
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["personplan", "migrate", "--revert"]).unwrap();

        match cli.command {
            Command::Migrate(args) => assert!(args.revert),
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_login_requires_password() {
        assert!(Cli::try_parse_from(["personplan", "login", "alice1"]).is_err());
    }

    #[test]
    fn test_report_leads_with_localized_message() {
        let report = report(AccountError::auth(AuthFailure::BadPassword), Locale::ZhCn);

        assert_eq!(report.to_string(), "密码错误");
        assert_eq!(
            report.root_cause().to_string(),
            "Authentication failed: bad password"
        );
    }
}
