use clap::{Parser, Subcommand};

mod dates;
mod db;
mod users;

#[derive(Debug, Parser)]
#[command(name = "vestry-app", about = "Vestry administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Users(users::UsersCommand),
    Dates(dates::DatesCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Users(command) => users::run(command).await,
            Commands::Dates(command) => dates::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
