use bookmarket::cli::create_admin;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bookmarket-cli")]
#[command(about = "Administrative tools for Bookmarket", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account (admins cannot register via the API)
    CreateAdmin {
        /// Username for the admin account
        #[arg(short, long)]
        username: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => handle_create_admin(&pool, username, email, password).await,
    }
}

async fn handle_create_admin(
    pool: &sqlx::postgres::PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Username")
            .interact_text()
            .expect("Failed to read username")
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .expect("Failed to read email")
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .expect("Failed to read password")
    });

    match create_admin(pool, &username, &email, &password).await {
        Ok(user) => {
            println!("Admin account created");
            println!("  Username: {}", user.username);
            println!("  Email: {}", user.email);
        }
        Err(e) => {
            eprintln!("Error creating admin: {}", e.error);
            std::process::exit(1);
        }
    }
}
