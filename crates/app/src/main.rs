//! Showroom Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use showroom_app::{
    auth::{NewUser, PgAuthService, Role, UserUuid},
    database,
};

#[derive(Debug, Parser)]
#[command(name = "showroom-app", about = "Showroom CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, default_value = "")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    User(UserCommand),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Create a user and print a bearer token for it
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Login email
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// retailer, brand, sales_rep or admin
    #[arg(long, default_value = "retailer")]
    role: Role,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    if cli.database_url.trim().is_empty() {
        return Err("DATABASE_URL is required".to_string());
    }

    let pool = database::connect(&cli.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match cli.command {
        Commands::Migrate => {
            database::migrate(&pool)
                .await
                .map_err(|error| format!("failed to run migrations: {error}"))?;

            println!("migrations applied");

            Ok(())
        }
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(PgAuthService::new(pool), args).await,
    }
}

async fn create_user(service: PgAuthService, args: CreateUserArgs) -> Result<(), String> {
    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            email: args.email,
            name: args.name,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = service
        .issue_api_token(user)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_uuid: {user}");
    println!("role: {}", args.role);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
