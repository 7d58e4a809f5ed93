//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Restaurant Hub - marketplace server and admin console
#[derive(Parser, Debug)]
#[command(name = "restaurant-hub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON data file backing the store
    #[arg(short, long, global = true, env = "DATA_FILE")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// List restaurants awaiting approval
    Pending,

    /// List approved restaurants, most recent approval first
    Approved,

    /// Approve one or more pending restaurants
    Approve {
        /// Restaurant ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Reject and delete a pending restaurant
    Reject(ModerationArgs),

    /// Remove an approved restaurant from the platform
    Remove(ModerationArgs),

    /// Show a user's notifications
    Notifications(NotificationArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, env = "SERVER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT")]
    pub port: Option<u16>,

    /// Keep all data in memory; nothing is written to disk
    #[arg(long)]
    pub in_memory: bool,
}

/// Arguments for reject and remove
#[derive(Args, Debug)]
pub struct ModerationArgs {
    /// Restaurant id
    pub id: String,

    /// Reason shown to the owner
    #[arg(short, long)]
    pub reason: String,
}

#[derive(Args, Debug)]
pub struct NotificationArgs {
    /// User email
    pub email: String,

    /// Mark every notification read after listing
    #[arg(long)]
    pub mark_read: bool,
}
