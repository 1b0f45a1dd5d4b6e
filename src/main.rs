//! Cheese Inventory - command-line client for the cheese shop backend
//!
//! Keeps the login session on disk between invocations.

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use cheese_inventory::config::DEFAULT_TIMEOUT_SECS;
use cheese_inventory::models::Role;
use cheese_inventory::Config;

/// Cheese shop inventory: barcode intake, cuts, history and reports
#[derive(Parser, Debug)]
#[command(name = "cheese_inventory")]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL (default: $CHEESE_API_URL or http://localhost:3000)
    #[arg(long)]
    api_url: Option<String>,

    /// Where the login session is stored
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// UTC offset in hours used for calendar days (default: local time)
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "CHEESE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the current role and what it allows
    Whoami,
    /// List active units
    Units {
        /// Filter by product name, PLU or unit id
        query: Option<String>,
        /// Search intake notes instead
        #[arg(long)]
        notes_only: bool,
    },
    /// Decode a scale label without registering anything
    Scan { code: String },
    /// Register a new unit from its scale label
    Intake {
        code: String,
        #[arg(long)]
        reason: Option<u64>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Cut weight from an active unit
    Cut {
        unit_id: u64,
        /// Weight to cut in grams
        #[arg(long, conflicts_with_all = ["label", "all"], required_unless_present_any = ["label", "all"])]
        grams: Option<u32>,
        /// Label of the piece that stays
        #[arg(long, conflicts_with = "all")]
        label: Option<String>,
        /// Take everything that is left
        #[arg(long)]
        all: bool,
        #[arg(long)]
        reason: Option<u64>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Replace the intake note of a unit
    Note { unit_id: u64, text: String },
    /// Delete a unit
    Delete {
        unit_id: u64,
        /// Also remove it from history
        #[arg(long)]
        permanent: bool,
    },
    /// Show historical units with filters and totals
    History {
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
        /// Category name, or "all"
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        notes_only: bool,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Print every cut of each unit
        #[arg(long)]
        cuts: bool,
    },
    /// Rank products by weight sold
    TopSellers,
    #[command(subcommand)]
    Products(ProductCommand),
    /// List cheese categories
    Categories,
    /// List intake and cut reasons
    Reasons,
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Elements(ElementCommand),
    /// Dashboard KPIs, sales and top products
    Dashboard {
        #[arg(long, value_enum, default_value_t = PeriodArg::Week)]
        period: PeriodArg,
    },
    /// Active stock alerts
    Alerts,
    /// Download the inventory as Excel or PDF
    Export {
        #[arg(value_enum)]
        format: FormatArg,
        /// Output file (default: inventory.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Manage the product catalog
#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    List,
    Add(ProductArgs),
    Update {
        id: u64,
        #[command(flatten)]
        product: ProductArgs,
    },
    Delete { id: u64 },
}

#[derive(clap::Args, Debug)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub plu: String,
    #[arg(long)]
    pub category: u64,
    #[arg(long)]
    pub price: Option<f64>,
    /// Sold per piece instead of per weight
    #[arg(long)]
    pub by_unit: bool,
}

/// Manage user accounts
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List,
    Add {
        username: String,
        #[arg(long, default_value = "usuario")]
        role: Role,
        /// Prompted twice on stdin when omitted
        #[arg(long, env = "CHEESE_NEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Change a user's role
    Role { id: u64, role: Role },
    Delete { id: u64 },
}

/// Auxiliary stock (bags, film, labels, ...)
#[derive(Subcommand, Debug)]
pub enum ElementCommand {
    List {
        query: Option<String>,
        /// Include inactive elements
        #[arg(long)]
        all: bool,
    },
    /// Show one element with its movements
    Show { id: u64 },
    Add {
        name: String,
        quantity: u64,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: u64,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: u64 },
    Ingress {
        id: u64,
        quantity: u64,
        #[arg(long)]
        notes: Option<String>,
    },
    Egress {
        id: u64,
        quantity: u64,
        #[arg(long)]
        reason: Option<u64>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatusArg {
    All,
    Active,
    Depleted,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PeriodArg {
    Today,
    Week,
    Month,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Excel,
    Pdf,
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?.with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(url) = &args.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = &args.session_file {
        config = config.with_session_path(path);
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=cheese_inventory=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    log::debug!("Backend: {}, session file: {}", config.api_url, config.session_path.display());

    if let Err(e) = commands::run(&config, args.utc_offset, args.command).await {
        log::error!("Command failed: {e:#}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
