use crate::config::Config;
use crate::dir_list::DirListError;
use crate::fragment::write_fragments;
use crate::output::{OutputError, write_atomically};
use crate::register::{
    FolderGroups, RegisterError, asset_count, build_register, register_to_json,
};
use crate::tree::render_tree_document;
use crate::vcs::{Vcs, VcsOutcome};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SYNC_COMMIT_MESSAGE: &str = "Auto-update assets";
const REGISTER_COMMIT_MESSAGE: &str = "Update asset register, per-folder JSONs, and tree";

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Cannot use repository root {}: {source}", .path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Register error: {0}")]
    Register(#[from] RegisterError),
    #[error("Tree rendering error: {0}")]
    DirList(#[from] DirListError),
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Run the version-control steps at all.
    pub sync: bool,
    /// Push after each commit.
    pub push: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        UpdateOptions {
            sync: true,
            push: true,
        }
    }
}

#[derive(Debug)]
pub struct UpdateReport {
    pub folders: usize,
    pub assets: usize,
    pub fragments: Vec<PathBuf>,
    pub register_path: PathBuf,
    pub tree_path: PathBuf,
    /// Version-control steps that failed without being expected to.
    pub vcs_failures: usize,
}

/// Outputs of one register build, before anything is committed.
#[derive(Debug)]
pub struct Manifests {
    pub groups: FolderGroups,
    pub fragments: Vec<PathBuf>,
    pub register_path: PathBuf,
    pub tree_path: PathBuf,
}

/// Rebuild the register, its per-folder fragments and the tree listing under
/// `config.root`, replacing whatever was there.
pub fn write_manifests(config: &Config) -> Result<Manifests, UpdateError> {
    let root = &config.root;

    info!("Building asset register and per-folder JSONs...");
    let groups = build_register(root, config)?;
    let fragments = write_fragments(root, &groups, config)?;

    let register_path = config.register_path();
    info!("Writing {}...", config.register_file);
    let register_json = register_to_json(&groups).map_err(OutputError::from)?;
    write_atomically(&register_path, &register_json)?;

    let tree_path = config.tree_path();
    info!("Writing {}...", config.tree_file);
    write_atomically(&tree_path, &render_tree_document(root, config)?)?;

    Ok(Manifests {
        groups,
        fragments,
        register_path,
        tree_path,
    })
}

/// Run the full update procedure against `config.root`:
///
/// 1. check that the repository root is usable,
/// 2. commit and push any pending edits,
/// 3. rebuild the register, fragments and tree,
/// 4. stage exactly those outputs, commit and push them.
///
/// Version-control failures never stop the run; they are logged by the gateway and
/// counted in the report. Any other failure is returned as an error.
pub fn run_update(
    config: &Config,
    vcs: &dyn Vcs,
    options: &UpdateOptions,
) -> Result<UpdateReport, UpdateError> {
    ensure_root(&config.root)?;

    let mut vcs_failures = 0;
    let mut tally = |outcome: VcsOutcome| {
        if let VcsOutcome::Failed { reason } = outcome {
            debug!("Counting failed git step: {reason}");
            vcs_failures += 1;
        }
    };

    if options.sync {
        info!("Checking for local changes...");
        tally(vcs.stage_all());
        // An empty commit is expected here and not counted.
        vcs.commit(SYNC_COMMIT_MESSAGE);
        if options.push {
            tally(vcs.push());
        }
    }

    let manifests = write_manifests(config)?;

    if options.sync {
        info!("Committing updates...");
        let mut paths = vec![config.register_file.clone()];
        paths.extend(
            manifests
                .fragments
                .iter()
                .filter_map(|p| relative_name(p, &config.root)),
        );
        paths.push(config.tree_file.clone());

        tally(vcs.stage(&paths));
        vcs.commit(REGISTER_COMMIT_MESSAGE);
        if options.push {
            tally(vcs.push());
        }
    }

    Ok(UpdateReport {
        folders: manifests.groups.len(),
        assets: asset_count(&manifests.groups),
        fragments: manifests.fragments,
        register_path: manifests.register_path,
        tree_path: manifests.tree_path,
        vcs_failures,
    })
}

fn ensure_root(root: &Path) -> Result<(), UpdateError> {
    let metadata = std::fs::metadata(root).map_err(|source| UpdateError::RootUnavailable {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(UpdateError::Register(RegisterError::RootNotDirectory(
            root.to_path_buf(),
        )));
    }
    Ok(())
}

fn relative_name(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}
