//! Account commands - register, login, change-password

use clap::Args;

use super::{bootstrap, report};
use crate::domain::user::{User, UserRepository};
use crate::domain::{AccountError, AuthFailure};
use crate::infrastructure::user::AccountService;

/// Arguments for the register command
#[derive(Args, Clone)]
pub struct RegisterArgs {
    /// User ID to register (at least 5 characters, no whitespace)
    pub user_id: String,

    /// Password (at least 12 characters, digits and letters)
    #[arg(long)]
    pub password: String,

    /// Password confirmation, must match --password
    #[arg(long)]
    pub confirm: String,
}

/// Arguments for the login command
#[derive(Args, Clone)]
pub struct LoginArgs {
    pub user_id: String,

    #[arg(long)]
    pub password: String,
}

/// Arguments for the change-password command
#[derive(Args, Clone)]
pub struct ChangePasswordArgs {
    pub user_id: String,

    /// Current password
    #[arg(long)]
    pub old: String,

    /// New password
    #[arg(long)]
    pub new: String,

    /// New password confirmation, must match --new
    #[arg(long)]
    pub confirm: String,
}

/// Register a new account
pub async fn register(args: RegisterArgs) -> anyhow::Result<()> {
    let config = bootstrap()?;
    let locale = config.locale;

    let service = crate::create_account_service(&config)
        .await
        .map_err(|e| report(e, locale))?;

    let user = service
        .register(&args.user_id, &args.password, &args.confirm)
        .await
        .map_err(|e| report(e, locale))?;

    println!(
        "Registered {} at {}",
        user.id(),
        user.registered_at().to_rfc3339()
    );

    Ok(())
}

/// Log in and print the account as JSON
pub async fn login(args: LoginArgs) -> anyhow::Result<()> {
    let config = bootstrap()?;
    let locale = config.locale;

    let service = crate::create_account_service(&config)
        .await
        .map_err(|e| report(e, locale))?;

    let user = service
        .login(&args.user_id, &args.password)
        .await
        .map_err(|e| report(e, locale))?;

    println!("{}", serde_json::to_string_pretty(&user)?);

    Ok(())
}

/// Change the password of an account
pub async fn change_password(args: ChangePasswordArgs) -> anyhow::Result<()> {
    let config = bootstrap()?;
    let locale = config.locale;

    let service = crate::create_account_service(&config)
        .await
        .map_err(|e| report(e, locale))?;

    let user = apply_password_change(&service, &args)
        .await
        .map_err(|e| report(e, locale))?;

    println!("Password changed for {}", user.id());

    Ok(())
}

/// Load the account and change its password; a wrong `--old` surfaces as
/// the password-change failure rather than a login failure
async fn apply_password_change<R: UserRepository>(
    service: &AccountService<R>,
    args: &ChangePasswordArgs,
) -> Result<User, AccountError> {
    let mut user = service
        .get(&args.user_id)
        .await?
        .ok_or(AccountError::auth(AuthFailure::AccountNotFound))?;

    service
        .change_password(&mut user, &args.old, &args.new, &args.confirm)
        .await?;

    Ok(user)
}
