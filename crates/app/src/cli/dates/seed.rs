use clap::Args;
use jiff::civil::Date;
use vestry::calendar::consecutive_days;
use vestry_app::{
    database::{self, Db},
    domain::available_dates::{
        AvailableDatesService, PgAvailableDatesService, data::AvailableDateUpsert,
    },
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// First day to open (YYYY-MM-DD)
    #[arg(long)]
    from: Date,

    /// Number of consecutive days
    #[arg(long, default_value_t = 30)]
    days: usize,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    if args.days == 0 {
        return Err("days must be at least 1".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAvailableDatesService::new(Db::new(pool));

    let upserts = consecutive_days(args.from, args.days)
        .into_iter()
        .map(AvailableDateUpsert::for_date)
        .collect();

    let dates = service
        .upsert_dates(upserts)
        .await
        .map_err(|error| format!("failed to seed dates: {error}"))?;

    for date in &dates {
        println!(
            "{}: {} normal / {} emergency, {} booked",
            date.date,
            date.normal_slots,
            date.emergency_slots,
            date.normal_booked_slots + date.emergency_booked_slots
        );
    }

    Ok(())
}
