mod help_text;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Index a public asset tree and keep its git remote in sync
#[derive(Parser, Debug)]
#[command(name = "assetreg", version, about, long_about = help_text::ROOT_LONG_ABOUT)]
pub struct Cli {
    /// Run as if started in DIRECTORY (like git -C)
    #[arg(short = 'C', value_name = "DIRECTORY", global = true)]
    pub directory: Option<PathBuf>,

    /// Read configuration from PATH instead of <root>/.assetreg.toml
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug)
    ///
    /// Takes precedence over RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "log_level")]
    pub verbose: u8,

    /// Set the log level explicitly
    ///
    /// Takes precedence over RUST_LOG.
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Never wait for Enter before exiting, even on a terminal
    #[arg(long, global = true)]
    pub no_pause: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Commit pending edits, rebuild the register and tree, then commit and push them
    #[command(long_about = help_text::UPDATE_LONG_ABOUT)]
    Update {
        /// Commit locally but do not push
        #[arg(long)]
        no_push: bool,

        /// Skip every git step; only rebuild the outputs
        #[arg(long, conflicts_with = "no_push")]
        no_sync: bool,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Rebuild the register, per-folder JSONs and tree without touching git
    Register {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Print the tree listing to stdout without writing anything
    Tree {},
}

#[derive(Args, Debug, Default)]
pub struct RemoteArgs {
    /// Hosting user used in asset URLs
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Hosting repository used in asset URLs
    #[arg(long, value_name = "REPO")]
    pub repo: Option<String>,

    /// Branch used in asset URLs
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// The level requested on the command line, if any.
    pub fn explicit_log_level(&self) -> Option<&'static str> {
        if let Some(level) = self.log_level {
            return Some(level.as_filter());
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            _ => Some("debug"),
        }
    }
}
