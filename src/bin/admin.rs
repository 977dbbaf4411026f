//! CLI administration tool for banco-digital.
//!
//! Provides commands for creating and inspecting accounts and performing
//! database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new account
//! cargo run --bin admin -- account create
//!
//! # List all accounts
//! cargo run --bin admin -- account list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `account create`): keys the stored
//!   password hash, must match the server's secret
//!
//! # Features
//!
//! - **Account Management**: Create and list bank accounts
//! - **Statistics**: View account and transfer counts
//! - **Database Tools**: Connection checks and info queries
//! - **Interactive Prompts**: User-friendly CLI with confirmation dialogs
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use banco_digital::application::services::hash_password;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// CLI tool for managing banco-digital.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage bank accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create a new account
    Create {
        /// Account holder name
        #[arg(short, long)]
        name: Option<String>,

        /// Login email (must be unique, compared case-insensitively)
        #[arg(short, long)]
        email: Option<String>,

        /// Initial balance (e.g. "1000.00")
        #[arg(short, long)]
        balance: Option<Decimal>,

        /// Password (optional, auto-generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

/// Row shape for `account list`.
#[derive(sqlx::FromRow)]
struct AccountListing {
    id: i64,
    name: String,
    email: String,
    balance: Decimal,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    match action {
        AccountAction::Create {
            name,
            email,
            balance,
            password,
            yes,
        } => {
            create_account(pool, name, email, balance, password, yes).await?;
        }
        AccountAction::List => {
            list_accounts(pool).await?;
        }
    }

    Ok(())
}

/// Creates a new account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for holder details (or use provided flags)
/// 2. Generate a random password or use the provided one
/// 3. Display account details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash the password keyed by `TOKEN_SIGNING_SECRET`
/// 6. Store in database
///
/// # Security
///
/// - Only the keyed hash is stored in the database
/// - A generated password is displayed once and cannot be retrieved later
async fn create_account(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    balance: Option<Decimal>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let secret = std::env::var("TOKEN_SIGNING_SECRET")
        .context("TOKEN_SIGNING_SECRET must be set to hash the password")?;

    println!("{}", "🏦 Create Account".bright_blue().bold());
    println!();

    let holder_name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Holder name").interact_text()?,
    };

    let login_email: String = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let tax_id: String = Input::new().with_prompt("Tax id (CPF)").interact_text()?;

    let birth_date: String = Input::new()
        .with_prompt("Birth date (YYYY-MM-DD)")
        .interact_text()?;
    let birth_date: NaiveDate = birth_date
        .parse()
        .context("Birth date must be YYYY-MM-DD")?;

    let monthly_income: String = Input::new()
        .with_prompt("Monthly income")
        .with_initial_text("0.00")
        .interact_text()?;
    let monthly_income: Decimal = monthly_income
        .parse()
        .context("Monthly income must be a decimal number")?;

    let initial_balance = match balance {
        Some(b) => b,
        None => {
            let raw: String = Input::new()
                .with_prompt("Initial balance")
                .with_initial_text("0.00")
                .interact_text()?;
            raw.parse()
                .context("Initial balance must be a decimal number")?
        }
    };

    if initial_balance < Decimal::ZERO {
        anyhow::bail!("Initial balance must not be negative");
    }

    // Generate or use provided password
    let password_value = match password {
        Some(p) => {
            println!("{}", "⚠️  Using provided password".yellow());
            p
        }
        None => {
            let generated = generate_password();
            println!("{}", "✨ Generated new password".green());
            generated
        }
    };

    // Show account details
    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Name:     {}", holder_name.cyan());
    println!("  Email:    {}", login_email.cyan());
    println!("  Balance:  {}", initial_balance.to_string().bright_green());
    println!(
        "  Password: {}",
        password_value.bright_yellow().bold()
    );
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    // Confirm
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = hash_password(&secret, &password_value);

    let account_id: i64 = sqlx::query_scalar(
        "INSERT INTO accounts (name, email, tax_id, birth_date, password_hash, balance, monthly_income)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(&holder_name)
    .bind(&login_email)
    .bind(&tax_id)
    .bind(birth_date)
    .bind(&password_hash)
    .bind(initial_balance)
    .bind(monthly_income)
    .fetch_one(pool)
    .await
    .context("Failed to create account")?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!("  ID: {}", account_id.to_string().bright_white().bold());
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST http://localhost:3000/auth/login \\
    -H 'Content-Type: application/json' \\
    -d '{{\"email\": \"{}\", \"senha\": \"{}\"}}'",
        login_email.bright_cyan(),
        password_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all accounts with balances.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID  Name                           Email                          Balance
///   ─────────────────────────────────────────────────────────────────────────
///   1   Ana Souza                      ana@example.com                1500.00
///   2   Bruno Lima                     bruno@example.com               320.50
/// ```
async fn list_accounts(pool: &PgPool) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts: Vec<AccountListing> = sqlx::query_as(
        "SELECT id, name, email, balance, created_at FROM accounts ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list accounts")?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin account create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<30} {:<12} {:<17}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Balance".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(95).bright_black());

    for account in &accounts {
        println!(
            "  {:<4} {:<30} {:<30} {:<12} {}",
            account.id.to_string().bright_black(),
            account.name.cyan(),
            account.email,
            account.balance.to_string().bright_green(),
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of accounts
/// - Total number of transfers
/// - Sum of all balances
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let accounts_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    let transfers_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transfers")
        .fetch_one(pool)
        .await?;

    let total_balance: Option<Decimal> = sqlx::query_scalar("SELECT SUM(balance) FROM accounts")
        .fetch_one(pool)
        .await?;

    println!(
        "  Accounts:      {}",
        accounts_count.to_string().bright_green().bold()
    );
    println!(
        "  Transfers:     {}",
        transfers_count.to_string().bright_green().bold()
    );
    println!(
        "  Total balance: {}",
        total_balance
            .unwrap_or(Decimal::ZERO)
            .to_string()
            .bright_green()
            .bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random temporary password.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
