mod cli;
mod config;
mod dir_list;
mod fragment;
mod output;
mod register;
mod tree;
mod update;
mod vcs;

use anyhow::Context;
use cli::{Cli, Command, RemoteArgs};
use config::{Config, RemoteOverrides};
use std::fmt as stdfmt;
use std::io::{IsTerminal, Write, stderr, stdin, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber, error, info, warn};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use update::{UpdateOptions, run_update, write_manifests};
use vcs::GitCli;

struct AssetregExitCode;

impl AssetregExitCode {
    /// Exit code used for any error (I/O errors, invalid config, etc.).
    fn any_error() -> ExitCode {
        ExitCode::from(255)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.explicit_log_level(), default_log_level(&cli.command));

    let pause = !cli.no_pause && stdin().is_terminal() && stdout().is_terminal();

    let exit_code = match run(cli) {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err:#}");
            AssetregExitCode::any_error()
        }
    };

    if pause {
        wait_for_enter();
    }

    exit_code
}

/// Update and register report progress by default; the tree command keeps stderr quiet.
fn default_log_level(command: &Command) -> &'static str {
    match command {
        Command::Update { .. } | Command::Register { .. } => "info",
        Command::Tree {} => "warn",
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Some(directory) = &cli.directory {
        std::env::set_current_dir(directory)
            .with_context(|| format!("Failed to change directory to {}", directory.display()))?;
    }

    let root = PathBuf::from(".")
        .canonicalize()
        .context("Failed to resolve the repository root")?;

    match cli.command {
        Command::Update {
            no_push,
            no_sync,
            remote,
        } => {
            let config = load_config(&root, cli.config.as_deref(), remote)?;
            let options = UpdateOptions {
                sync: !no_sync,
                push: !no_push,
            };
            handle_update(&config, &options)
        }
        Command::Register { remote } => {
            let config = load_config(&root, cli.config.as_deref(), remote)?;
            handle_register(&config)
        }
        Command::Tree {} => {
            let config = load_config(&root, cli.config.as_deref(), RemoteArgs::default())?;
            handle_tree(&config)
        }
    }
}

fn load_config(
    root: &Path,
    config_path: Option<&Path>,
    remote: RemoteArgs,
) -> anyhow::Result<Config> {
    let config = Config::load(root, config_path)?.with_overrides(RemoteOverrides {
        user: remote.user,
        repo: remote.repo,
        branch: remote.branch,
    });
    Ok(config)
}

fn warn_if_user_missing(config: &Config) {
    if config.user.is_empty() {
        warn!("No hosting user configured; asset URLs will have an empty user segment");
    }
}

fn handle_update(config: &Config, options: &UpdateOptions) -> anyhow::Result<ExitCode> {
    warn_if_user_missing(config);
    let vcs = GitCli::new(&config.root);
    let report = run_update(config, &vcs, options)?;

    info!(
        "Indexed {} assets in {} folders ({} per-folder JSONs)",
        report.assets,
        report.folders,
        report.fragments.len()
    );
    info!(
        "Wrote {} and {}",
        report.register_path.display(),
        report.tree_path.display()
    );

    if report.vcs_failures > 0 {
        warn!(
            "Registry files updated, but {} git step(s) failed; rerun to retry",
            report.vcs_failures
        );
    } else if options.sync && options.push {
        info!("Done! All registry files updated and pushed.");
    } else {
        info!("Done! All registry files updated.");
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_register(config: &Config) -> anyhow::Result<ExitCode> {
    warn_if_user_missing(config);
    let manifests = write_manifests(config)?;

    info!(
        "Indexed {} assets in {} folders",
        register::asset_count(&manifests.groups),
        manifests.groups.len()
    );
    info!("Wrote {}", manifests.register_path.display());
    for fragment in &manifests.fragments {
        info!("Wrote {}", fragment.display());
    }
    info!("Wrote {}", manifests.tree_path.display());

    Ok(ExitCode::SUCCESS)
}

fn handle_tree(config: &Config) -> anyhow::Result<ExitCode> {
    let document = tree::render_tree_document(&config.root, config)?;
    println!("{document}");
    Ok(ExitCode::SUCCESS)
}

fn wait_for_enter() {
    eprint!("Press Enter to exit...");
    let _ = stderr().flush();
    let mut line = String::new();
    let _ = stdin().read_line(&mut line);
}

fn init_tracing(explicit_level: Option<&str>, default_level: &str) {
    let stderr_is_terminal = stderr().is_terminal();
    let formatter = EmojiFormatter { stderr_is_terminal };

    let filter = match explicit_level {
        Some(level) => EnvFilter::new(level),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
        }
    };

    let fmt_layer = tracing_fmt::layer()
        .event_format(formatter)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

struct EmojiFormatter {
    stderr_is_terminal: bool,
}

impl<S, N> FormatEvent<S, N> for EmojiFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        if self.stderr_is_terminal {
            match *event.metadata().level() {
                Level::DEBUG => write!(writer, "🔍 ")?,
                Level::INFO => write!(writer, "📦 ")?,
                Level::WARN => write!(writer, "⚠️  ")?,
                Level::ERROR => write!(writer, "❌ ")?,
                _ => {}
            }
        } else {
            match *event.metadata().level() {
                Level::DEBUG => writer.write_str("DEBUG: ")?,
                Level::INFO => writer.write_str("INFO: ")?,
                Level::WARN => writer.write_str("WARN: ")?,
                Level::ERROR => writer.write_str("ERROR: ")?,
                _ => {}
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
