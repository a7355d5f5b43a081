pub(super) const ROOT_LONG_ABOUT: &str = "\
Index a public asset tree and keep its git remote in sync

Assetreg walks a directory tree that is published through a git hosting service and
writes a machine-readable index of every file in it, together with the raw download
URL each file will have once pushed.

OUTPUTS (written to the repository root on every run):

  asset_register.json
    One JSON object mapping every folder's relative path (\"\" for the root) to the
    list of files directly inside it. Each file is {name, ext, path, url}.

  <folder>.json
    One JSON array per non-empty folder, named after the folder's relative path with
    '/' replaced by '_'. The root folder's file is root.json.

  public_assets.tree
    A box-drawing tree of the whole directory structure.

Folders named in the ignore list (default: .git) are skipped entirely. Files whose
names start with '.' are left out of the register but still appear in the tree.

CONFIGURATION:

  Settings are read from .assetreg.toml in the repository root, or from the file
  given with --config. Every key is optional:

    [remote]
    host_url = \"https://raw.githubusercontent.com\"
    user = \"juelz-101\"
    repo = \"PublicAssets\"     # defaults to the root directory's name
    branch = \"main\"

    [scan]
    ignored_folders = [\".git\"]
    hidden_prefix = \".\"

    [output]
    register_file = \"asset_register.json\"
    tree_file = \"public_assets.tree\"
    root_fragment_name = \"root\"
    tree_label = \"PublicAssets/\"

EXAMPLES:

  # Full update: commit edits, rebuild the index, commit and push it
  $ assetreg -C /path/to/PublicAssets update

  # Rebuild the index only
  $ assetreg register

  # Preview the tree
  $ assetreg tree

For more details on each command, use:
  assetreg update --help
";

pub(super) const UPDATE_LONG_ABOUT: &str = "\
Commit pending edits, rebuild the register and tree, then commit and push them

The update runs a fixed sequence:

  1. Stage all changes, commit them as 'Auto-update assets' and push.
  2. Rebuild asset_register.json, every per-folder JSON and public_assets.tree.
  3. Stage exactly those files, commit them and push.

Git failures never stop the run. A commit with nothing to commit is expected and
stays silent; any other failure (a rejected push, no network, git missing) is
logged as a warning and the remaining steps still run. The outputs are always
rebuilt from scratch, so the next run retries whatever did not get pushed.

When run on a terminal, assetreg waits for Enter before exiting so the output
stays readable in a window that would otherwise close. Use --no-pause to
disable this; it is never done when stdin or stdout is not a terminal.
";
