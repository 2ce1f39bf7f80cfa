use clap::Parser;
use personplan_accounts::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Register(args) => cli::account::register(args).await,
        Command::Login(args) => cli::account::login(args).await,
        Command::ChangePassword(args) => cli::account::change_password(args).await,
        Command::Migrate(args) => cli::migrate::run(args).await,
    }
}
