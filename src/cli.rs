use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Group-stage tournament manager")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema
    Setup {
        /// Drop all tables before recreating them
        #[arg(long)]
        reset: bool,
    },
    /// Recompute standings for every group of a tournament
    Recalculate {
        tournament_id: i64,
    },
    /// Print the standings tables of a tournament
    Standings {
        tournament_id: i64,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}
