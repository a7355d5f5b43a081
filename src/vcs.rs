//! Version-control gateway.
//!
//! The orchestrator talks to version control only through the [`Vcs`] trait. The
//! real implementation, [`GitCli`], shells out to `git` in the repository root.
//! Failures are reported as a [`VcsOutcome`] and never abort the run.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsOutcome {
    Success,
    Failed { reason: String },
}

pub trait Vcs {
    /// Stage every change in the working tree.
    fn stage_all(&self) -> VcsOutcome;
    /// Stage the given paths (relative to the repository root).
    fn stage(&self, paths: &[String]) -> VcsOutcome;
    /// Commit staged changes. An empty commit is an expected, silent failure.
    fn commit(&self, message: &str) -> VcsOutcome;
    fn push(&self) -> VcsOutcome;
}

pub struct GitCli {
    program: OsString,
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        GitCli {
            program: OsString::from("git"),
            repo_root: repo_root.into(),
        }
    }

    #[cfg(test)]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Run the tool with `args` in the repository root.
    ///
    /// With `suppress_errors`, a failure is returned without logging its output;
    /// otherwise it is logged as a warning. Either way execution continues.
    pub fn run_vcs<S: AsRef<str>>(&self, args: &[S], suppress_errors: bool) -> VcsOutcome {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let subcommand = args.first().copied().unwrap_or_default();

        debug!(
            "Running {} {} in {}",
            self.program.to_string_lossy(),
            args.join(" "),
            self.repo_root.display()
        );

        let reason = match Command::new(&self.program)
            .args(&args)
            .current_dir(&self.repo_root)
            .output()
        {
            Ok(output) if output.status.success() => return VcsOutcome::Success,
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    format!("exited with {}: {stderr}", output.status)
                }
            }
            Err(e) => format!(
                "failed to run {}: {e}",
                self.program.to_string_lossy()
            ),
        };

        if suppress_errors {
            debug!("git {subcommand} did not succeed (ignored)");
        } else {
            warn!("git {subcommand} failed, continuing: {reason}");
        }

        VcsOutcome::Failed { reason }
    }
}

impl Vcs for GitCli {
    fn stage_all(&self) -> VcsOutcome {
        self.run_vcs(&["add", "-A"], false)
    }

    fn stage(&self, paths: &[String]) -> VcsOutcome {
        let mut args = vec!["add".to_string(), "--".to_string()];
        args.extend(paths.iter().cloned());
        self.run_vcs(&args, false)
    }

    fn commit(&self, message: &str) -> VcsOutcome {
        self.run_vcs(&["commit", "-m", message], true)
    }

    fn push(&self) -> VcsOutcome {
        self.run_vcs(&["push"], false)
    }
}
