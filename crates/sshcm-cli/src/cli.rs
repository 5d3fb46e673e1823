//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// SSH Config Manager - inspect and safely edit ~/.ssh/config
#[derive(Parser, Debug)]
#[command(name = "sshcm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// SSH config file to manage (defaults to ~/.ssh/config)
    #[arg(short, long, global = true, env = "SSHCM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Settings file (.toml or .json)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every Host section
    Print,

    /// List Host names in file order
    List,

    /// Export Host records as JSON
    Export,

    /// Show the current file version
    Version,

    /// Add a new Host section
    Add {
        /// Host name (pattern)
        name: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Change fields of the first Host with this name
    ///
    /// Examples:
    ///   sshcm set build --port 2222
    ///   sshcm set build --user ci --identity-file ~/.ssh/ci
    Set {
        /// Host name to update
        name: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Remove the first Host with this name
    Remove {
        /// Host name to remove
        name: String,
    },
}

/// Optional directive values; an empty string clears the field.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs {
    /// HostName directive
    #[arg(long)]
    pub hostname: Option<String>,

    /// Port directive
    #[arg(long)]
    pub port: Option<String>,

    /// User directive
    #[arg(long)]
    pub user: Option<String>,

    /// IdentityFile directive
    #[arg(long)]
    pub identity_file: Option<String>,

    /// Extra directive lines, kept verbatim (repeatable)
    #[arg(long = "line")]
    pub lines: Vec<String>,
}
