use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, NewProduct, NewUser, Role};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "mithai_admin")]
#[command(about = "Admin utilities for Mithai (bootstrap accounts and demo data)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./mithai.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Seed(SeedArgs),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    /// Also read from `MITHAI_PASSWORD` to keep it out of shell history.
    #[arg(long, env = "MITHAI_PASSWORD")]
    password: String,
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "admin", value_parser = parse_role)]
    role: Role,
}

/// Populates a demo catalog for an existing account.
#[derive(Args, Debug)]
struct SeedArgs {
    #[arg(long)]
    owner: String,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::try_from(raw).map_err(|err| err.to_string())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let user = engine
                .register_user(NewUser {
                    username: args.username,
                    password: args.password,
                    full_name: args.full_name,
                    email: args.email,
                    role: args.role,
                })
                .await?;
            println!("created user: {}", user.username);
        }
        Command::Seed(args) => {
            engine.user_profile(&args.owner).await?;

            let catalog = [
                ("Kaju Katli", 90_000, "kg", "Dry Fruit"),
                ("Kesar Pedha", 45_000, "kg", "Milk"),
                ("Motichoor Ladoo", 38_000, "kg", "Besan"),
                ("Soan Papdi", 30_000, "kg", "Besan"),
                ("Gulab Jamun", 25_000, "kg", "Milk"),
            ];
            for (name, price_minor, unit, category) in catalog {
                let product = engine
                    .create_product(
                        &args.owner,
                        NewProduct {
                            name: name.to_string(),
                            description: None,
                            price_minor,
                            unit: unit.to_string(),
                            category: Some(category.to_string()),
                        },
                    )
                    .await?;
                println!("created product: {} ({})", product.name, product.id);
            }
        }
    }

    Ok(())
}
