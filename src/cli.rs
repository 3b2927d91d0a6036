use clap::{Parser, Subcommand};

/// Stockroom — inventory REST API with JWT authentication
#[derive(Parser)]
#[command(name = "stockroom", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to bind
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },

    /// Apply pending database migrations and exit
    Migrate,
}
