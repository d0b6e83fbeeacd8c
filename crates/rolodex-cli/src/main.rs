use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use rolodex_cli::admin::create_admin;
use rolodex_cli::seeder::{self, SeedConfig};
use rolodex_config::DatabaseConfig;
use rolodex_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "rolodex-cli")]
#[command(about = "Rolodex CLI - Administrative tools for Rolodex", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users, contacts and details
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of contacts per user
        #[arg(short = 'c', long, default_value = "20")]
        contacts: usize,

        /// Number of details per contact
        #[arg(short = 'd', long, default_value = "2")]
        details: usize,

        /// Password shared by every seeded account
        #[arg(long, default_value = "password123")]
        password: String,
    },
    /// Remove all seeded data (keeps administrators)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = connect().await;

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&pool, first_name, last_name, email, password).await,
        Commands::Seed {
            users,
            contacts,
            details,
            password,
        } => {
            let config = SeedConfig::new(users)
                .with_contacts(contacts, details)
                .with_password(password);
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn connect() -> PgPool {
    let config =
        DatabaseConfig::from_env().unwrap_or_else(|e| exit_with("Invalid configuration", e));
    let pool = init_db_pool(&config)
        .await
        .unwrap_or_else(|e| exit_with("Failed to connect to database", e));
    run_migrations(&pool)
        .await
        .unwrap_or_else(|e| exit_with("Failed to run migrations", e));
    pool
}

fn prompt(value: Option<String>, label: &str) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(label)
            .interact_text()
            .unwrap_or_else(|e| exit_with(&format!("Failed to read {}", label.to_lowercase()), e))
    })
}

async fn handle_create_admin(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let first_name = prompt(first_name, "First name");
    let last_name = prompt(last_name, "Last name");
    let email = prompt(email, "Email address");
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| exit_with("Failed to read password", e))
    });

    match create_admin(pool, &first_name, &last_name, &email, &password).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   ID: {}", user.id);
            println!("   Email: {}", user.email);
            println!("   Name: {} {}", user.first_name, user.last_name);
        }
        Err(e) => exit_with("Error creating admin", e.error),
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        exit_with("Error seeding database", e);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    match seeder::clear_all(pool).await {
        Ok(_) => println!("✅ Cleared seeded data"),
        Err(e) => exit_with("Error clearing seeded data", e),
    }
}

fn exit_with<E: std::fmt::Display>(message: &str, e: E) -> ! {
    eprintln!("\n❌ {}: {}", message, e);
    std::process::exit(1);
}
