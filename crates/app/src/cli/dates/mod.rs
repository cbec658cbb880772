use clap::{Args, Subcommand};

mod cleanup;
mod seed;

#[derive(Debug, Args)]
pub(crate) struct DatesCommand {
    #[command(subcommand)]
    command: DatesSubcommand,
}

#[derive(Debug, Subcommand)]
enum DatesSubcommand {
    /// Delete every available date before a cutoff
    Cleanup(cleanup::CleanupArgs),

    /// Open a run of consecutive dates with default capacity
    Seed(seed::SeedArgs),
}

pub(crate) async fn run(command: DatesCommand) -> Result<(), String> {
    match command.command {
        DatesSubcommand::Cleanup(args) => cleanup::run(args).await,
        DatesSubcommand::Seed(args) => seed::run(args).await,
    }
}
