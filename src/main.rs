//! Restaurant Hub - Application entry point
//!
//! CLI-based entry point that dispatches to the server or the admin console.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use restaurant_hub::{
    cli::{Cli, Commands},
    commands,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration; --data-file wins over DATA_FILE
    let config = Config::from_env().with_data_file(cli.data_file);
    tracing::debug!(data_file = %config.data_file.display(), "Configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Pending => commands::admin::pending(config).await,
        Commands::Approved => commands::admin::approved(config).await,
        Commands::Approve { ids } => commands::admin::approve(ids, config).await,
        Commands::Reject(args) => commands::admin::reject(args.id, args.reason, config).await,
        Commands::Remove(args) => commands::admin::remove(args.id, args.reason, config).await,
        Commands::Notifications(args) => {
            commands::admin::notifications(args.email, args.mark_read, config).await
        }
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
