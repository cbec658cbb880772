use clap::Args;
use vestry_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersServiceError, records::UserRole},
};

#[derive(Debug, Args)]
pub(crate) struct PromoteArgs {
    /// Email address of the user to promote
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PromoteArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let promoted = match service.set_role_by_email(&args.email, UserRole::Admin).await {
        Ok(users) => users,
        Err(UsersServiceError::NotFound) => {
            return Err(format!(
                "no user with email {}; they must sign in once first",
                args.email
            ));
        }
        Err(error) => return Err(format!("failed to promote user: {error}")),
    };

    for user in promoted {
        println!("user_uuid: {}", user.uuid);
        println!("email: {}", user.email);
        println!("role: {}", user.role);
    }

    Ok(())
}
