use clap::Args;
use jiff::civil::Date;
use vestry_app::{
    database::{self, Db},
    domain::available_dates::{AvailableDatesService, PgAvailableDatesService},
};

#[derive(Debug, Args)]
pub(crate) struct CleanupArgs {
    /// Dates strictly before this day are deleted (YYYY-MM-DD)
    #[arg(long)]
    before: Date,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CleanupArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAvailableDatesService::new(Db::new(pool));

    let deleted = service
        .delete_dates_before(args.before)
        .await
        .map_err(|error| format!("failed to clean up dates: {error}"))?;

    println!("deleted {deleted} dates before {}", args.before);

    Ok(())
}
