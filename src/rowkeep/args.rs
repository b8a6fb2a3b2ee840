use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowkeep", version)]
#[command(about = "Browse and exercise a record store from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (store events on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON scenario script against an empty store
    Run {
        /// Path to the script (a JSON array of steps)
        script: PathBuf,
    },

    /// Walk a JSON array of contacts in circular order
    #[command(alias = "b")]
    Browse {
        /// Path to the records file
        records: PathBuf,

        /// Start at this id instead of the first record
        #[arg(long)]
        from: Option<u32>,

        /// Walk backwards
        #[arg(long)]
        backward: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print all settings
    Show,

    /// Set a value (e.g. `rowkeep config set wrap_unknown false`)
    Set { key: String, value: String },
}
