use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::audit::AuditLog;
use fintrack::cli::{
    handle_budget_command, handle_dashboard_command, handle_history_command,
    handle_profile_command, handle_transaction_command, stderr_notifier, BudgetCommands,
    ProfileCommands, TransactionCommands,
};
use fintrack::config::{paths::FinancePaths, settings::Settings};
use fintrack::storage::FileStorage;
use fintrack::store::FinanceStore;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker",
    long_about = "fintrack records income and expenses, tracks category budgets \
                  against spending and summarizes where your money goes."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Profile commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Show totals, monthly trend and category breakdown
    Dashboard {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    fintrack::init_tracing();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinancePaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    let audit = AuditLog::new(paths.audit_log());

    // Open the store
    let storage = FileStorage::new(paths.data_dir());
    let mut store = FinanceStore::open_with_key(storage, settings.storage_key.as_str());
    if settings.audit_enabled {
        store = store.with_audit(audit.clone());
    }
    store.subscribe(stderr_notifier());

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Profile(cmd)) => {
            handle_profile_command(&mut store, cmd)?;
        }
        Some(Commands::Dashboard { from, to }) => {
            handle_dashboard_command(&store, from.as_deref(), to.as_deref())?;
        }
        Some(Commands::History { count }) => {
            handle_history_command(&audit, count)?;
        }
        Some(Commands::Config) => {
            settings.save(&paths)?;
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Storage key:        {}", settings.storage_key);
            println!("  Audit enabled:      {}", settings.audit_enabled);
            println!("  Budget percent cap: {}", settings.budget_percent_cap);
            println!("  Date format:        {}", settings.date_format);
        }
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack dashboard' for an overview.");
        }
    }

    Ok(())
}
