use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "blocksmith-cli", version, about = "Blocksmith CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a task into its Eisenhower quadrant
    Classify(commands::classify::ClassifyArgs),
    /// Suggest time slots for a single task
    Slot(commands::slot::SlotArgs),
    /// Schedule a list of tasks
    Batch(commands::batch::BatchArgs),
    /// Show the time-block catalog
    Catalog(commands::catalog::CatalogArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BLOCKSMITH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Slot(args) => commands::slot::run(args),
        Commands::Batch(args) => commands::batch::run(args),
        Commands::Catalog(args) => commands::catalog::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
