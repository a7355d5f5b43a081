use assert_cmd::{Command, cargo::cargo_bin_cmd};
use std::fs;
use std::path::Path;

pub fn assetreg_cmd(cwd: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("assetreg");
    cmd.env_remove("RUST_LOG")
        .arg("--no-pause")
        .arg("-C")
        .arg(cwd);
    cmd
}

/// Create every file in `files` (relative, `/`-separated) under `root`.
pub fn write_files(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, file).unwrap();
    }
}

// Only the update tests need a real repository; other test crates leave this unused.
#[allow(dead_code)]
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[allow(dead_code)]
pub fn git(cwd: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout).expect("git stdout should be UTF-8")
}

#[allow(dead_code)]
pub fn init_git_repo(cwd: &Path) {
    git(cwd, &["init", "-q"]);
    git(cwd, &["config", "user.email", "assets@example.com"]);
    git(cwd, &["config", "user.name", "Asset Bot"]);
    git(cwd, &["config", "commit.gpgsign", "false"]);
}
