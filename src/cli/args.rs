//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Owner/subsidiary party hierarchy on a materialized-path store
#[derive(Parser, Debug)]
#[command(name = "partytree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (layered over the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Populate the store with a random multi-level tree
    Seed {
        /// Number of top-level parties (overrides config)
        #[arg(short, long)]
        roots: Option<usize>,
        /// Fixed RNG seed for reproducible trees
        #[arg(long)]
        rng_seed: Option<u64>,
    },

    /// Operate on single parties
    Party {
        #[command(subcommand)]
        command: PartyCommands,
    },

    /// Show the whole hierarchy as a tree
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PartyCommands {
    /// List all parties
    List,

    /// Show one party
    Get {
        /// Party ID
        id: String,
    },

    /// Create a party
    Create {
        /// Display name
        name: String,
        /// Owning party ID
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Delete one party (subsidiaries are kept)
    Delete {
        /// Party ID
        id: String,
    },

    /// List ancestors, root first
    Parents {
        /// Party ID
        id: String,
    },

    /// List subsidiaries at every depth
    Subsidiaries {
        /// Party ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template in the global location
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
