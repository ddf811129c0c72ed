//! FlashFood CLI - admin dashboard operations from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the second page of customers
//! ff-cli customers list --page 2
//!
//! # Ban a customer
//! ff-cli customers ban FF_CUS_42 --reason "chargeback fraud"
//!
//! # Show one order
//! ff-cli orders show FF_ORD_7
//!
//! # Print the sidebar for a role
//! ff-cli menu --role FINANCE_ADMIN
//! ```
//!
//! # Environment Variables
//!
//! - `API_BASE_URL` - FlashFood REST API base URL
//! - `ADMIN_API_TOKEN` - Bearer token (or `--token`)
//! - `ADMIN_ROLE` - Role the token belongs to (or `--role`)
//! - `API_TIMEOUT_SECS` - Request timeout (default: 30)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(author, version, about = "FlashFood admin CLI")]
struct Cli {
    /// Bearer token (defaults to `ADMIN_API_TOKEN`)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Role the token belongs to (defaults to `ADMIN_ROLE`)
    #[arg(long, global = true)]
    role: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer management
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Order management
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// FAQ management
    Faqs {
        #[command(subcommand)]
        action: FaqAction,
    },
    /// Print the sidebar menu for a role
    Menu,
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List one page of customers
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search customers by name, email or phone
    Search { query: String },
    /// Ban a customer
    Ban {
        id: String,
        #[arg(short, long)]
        reason: String,
    },
    /// Order history of a customer
    Orders { id: String },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List one page of orders
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one order
    Show { id: String },
    /// Delete an order
    Delete { id: String },
}

#[derive(Subcommand)]
enum FaqAction {
    /// List one page of FAQs
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flashfood_cli=info,flashfood_admin=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    dotenvy::dotenv().ok();
    let credentials = commands::Credentials {
        token: cli.token,
        role: cli.role,
    };

    match cli.command {
        Commands::Customers { action } => {
            let client = commands::connect(&credentials)?;
            match action {
                CustomerAction::List { page } => commands::customers::list(&client, page).await,
                CustomerAction::Search { query } => {
                    commands::customers::search(&client, &query).await
                }
                CustomerAction::Ban { id, reason } => {
                    commands::customers::ban(&client, &id, &reason).await
                }
                CustomerAction::Orders { id } => commands::customers::orders(&client, &id).await,
            }
        }
        Commands::Orders { action } => {
            let client = commands::connect(&credentials)?;
            match action {
                OrderAction::List { page } => commands::orders::list(&client, page).await,
                OrderAction::Show { id } => commands::orders::show(&client, &id).await,
                OrderAction::Delete { id } => commands::orders::delete(&client, &id).await,
            }
        }
        Commands::Faqs { action } => {
            let client = commands::connect(&credentials)?;
            match action {
                FaqAction::List { page } => commands::faqs::list(&client, page).await,
            }
        }
        Commands::Menu => commands::menu::show(credentials.role()?),
    }
}
