//! Run configuration.
//!
//! A [`Config`] is built once at startup (defaults, optionally overlaid with a TOML
//! file and CLI overrides) and passed explicitly to the builder, the renderer and
//! the orchestrator.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional per-repository configuration file, looked up in the root.
pub const CONFIG_FILENAME: &str = ".assetreg.toml";

pub const DEFAULT_HOST_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REGISTER_FILE: &str = "asset_register.json";
pub const DEFAULT_TREE_FILE: &str = "public_assets.tree";
pub const DEFAULT_ROOT_FRAGMENT_NAME: &str = "root";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository root: the tree that is indexed and the git working directory.
    pub root: PathBuf,
    pub host_url: String,
    pub user: String,
    pub repo: String,
    pub branch: String,
    /// Folder names pruned from both the register and the tree.
    pub ignored_folders: Vec<String>,
    /// Files whose names start with this are left out of the register.
    pub hidden_prefix: String,
    pub register_file: String,
    pub tree_file: String,
    pub root_fragment_name: String,
    pub tree_label: String,
}

/// On-disk shape of `.assetreg.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    remote: RemoteSection,
    #[serde(default)]
    scan: ScanSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoteSection {
    host_url: Option<String>,
    user: Option<String>,
    repo: Option<String>,
    branch: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScanSection {
    ignored_folders: Option<Vec<String>>,
    hidden_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    register_file: Option<String>,
    tree_file: Option<String>,
    root_fragment_name: Option<String>,
    tree_label: Option<String>,
}

/// Values supplied on the command line; they win over the config file.
#[derive(Debug, Default, Clone)]
pub struct RemoteOverrides {
    pub user: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
}

impl Config {
    /// Built-in defaults for `root`. The repository name defaults to the root
    /// directory's name, and the tree label to `<repo>/`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let repo = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Config {
            host_url: DEFAULT_HOST_URL.to_string(),
            user: String::new(),
            branch: DEFAULT_BRANCH.to_string(),
            ignored_folders: vec![".git".to_string()],
            hidden_prefix: ".".to_string(),
            register_file: DEFAULT_REGISTER_FILE.to_string(),
            tree_file: DEFAULT_TREE_FILE.to_string(),
            root_fragment_name: DEFAULT_ROOT_FRAGMENT_NAME.to_string(),
            tree_label: format!("{repo}/"),
            repo,
            root,
        }
    }

    /// Load the configuration for `root`.
    ///
    /// An explicit `config_path` must exist. Without one, `<root>/.assetreg.toml` is
    /// used when present and the built-in defaults otherwise.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::for_root(root);

        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                path.to_path_buf()
            }
            None => {
                let candidate = root.join(CONFIG_FILENAME);
                if !candidate.exists() {
                    defaults.validate()?;
                    return Ok(defaults);
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
        let config = defaults.merge_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn merge_toml(mut self, content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;

        let repo_from_file = file.remote.repo.is_some();
        if let Some(v) = file.remote.host_url {
            self.host_url = v;
        }
        if let Some(v) = file.remote.user {
            self.user = v;
        }
        if let Some(v) = file.remote.repo {
            self.repo = v;
        }
        if let Some(v) = file.remote.branch {
            self.branch = v;
        }
        if let Some(v) = file.scan.ignored_folders {
            self.ignored_folders = v;
        }
        if let Some(v) = file.scan.hidden_prefix {
            self.hidden_prefix = v;
        }
        if let Some(v) = file.output.register_file {
            self.register_file = v;
        }
        if let Some(v) = file.output.tree_file {
            self.tree_file = v;
        }
        if let Some(v) = file.output.root_fragment_name {
            self.root_fragment_name = v;
        }
        match file.output.tree_label {
            Some(v) => self.tree_label = v,
            None if repo_from_file => self.tree_label = format!("{}/", self.repo),
            None => {}
        }

        Ok(self)
    }

    /// Apply CLI overrides. A repository override also moves the default tree label
    /// along with it unless the label was configured explicitly.
    pub fn with_overrides(mut self, overrides: RemoteOverrides) -> Self {
        if let Some(user) = overrides.user {
            self.user = user;
        }
        if let Some(repo) = overrides.repo {
            if self.tree_label == format!("{}/", self.repo) {
                self.tree_label = format!("{repo}/");
            }
            self.repo = repo;
        }
        if let Some(branch) = overrides.branch {
            self.branch = branch;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hidden_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "hidden_prefix must not be empty".to_string(),
            ));
        }

        for (key, name) in [
            ("register_file", &self.register_file),
            ("tree_file", &self.tree_file),
            ("root_fragment_name", &self.root_fragment_name),
        ] {
            if name.is_empty() {
                return Err(ConfigError::Invalid(format!("{key} must not be empty")));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a plain file name, got {name:?}"
                )));
            }
        }

        Ok(())
    }

    pub fn is_ignored_folder(&self, name: &str) -> bool {
        self.ignored_folders.iter().any(|ignored| ignored == name)
    }

    pub fn is_hidden_file(&self, name: &str) -> bool {
        name.starts_with(&self.hidden_prefix)
    }

    /// Download URL for a file at `relative_path` (forward-slash separated, unescaped).
    pub fn asset_url(&self, relative_path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.host_url.trim_end_matches('/'),
            self.user,
            self.repo,
            self.branch,
            relative_path
        )
    }

    pub fn register_path(&self) -> PathBuf {
        self.root.join(&self.register_file)
    }

    pub fn tree_path(&self) -> PathBuf {
        self.root.join(&self.tree_file)
    }
}
