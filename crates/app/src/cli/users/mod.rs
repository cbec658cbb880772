use clap::{Args, Subcommand};

mod promote;

#[derive(Debug, Args)]
pub(crate) struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
enum UsersSubcommand {
    /// Grant the admin role to every account with the given email
    Promote(promote::PromoteArgs),
}

pub(crate) async fn run(command: UsersCommand) -> Result<(), String> {
    match command.command {
        UsersSubcommand::Promote(args) => promote::run(args).await,
    }
}
