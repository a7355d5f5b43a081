mod common;

use common::{assetreg_cmd, write_files};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn tree_prints_document_without_writing() {
    let temp = TempDir::new().unwrap();
    write_files(temp.path(), &["b", "a", "sub/x.txt"]);
    fs::create_dir(temp.path().join(".git")).unwrap();
    fs::write(
        temp.path().join(".assetreg.toml"),
        "[output]\ntree_label = \"PublicAssets/\"\n",
    )
    .unwrap();

    assetreg_cmd(temp.path())
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::eq(
            "PublicAssets/\n├── .assetreg.toml\n├── a\n├── b\n└── sub/\n    └── x.txt\n",
        ))
        .stderr(predicate::str::is_empty());

    assert!(!temp.path().join("public_assets.tree").exists());
}

#[test]
fn tree_fails_for_missing_directory() {
    let temp = TempDir::new().unwrap();

    assetreg_cmd(&temp.path().join("missing"))
        .arg("tree")
        .assert()
        .code(255)
        .stderr(predicate::str::contains("Failed to change directory"));
}
