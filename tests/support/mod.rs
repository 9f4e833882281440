use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use lettergrade_core::config::GraderConfig;
use lettergrade_core::VariantIndex;

/// Get a Command for lettergrade, isolated from any ambient config
pub fn lettergrade() -> Command {
    let mut cmd = cargo_bin_cmd!("lettergrade");
    cmd.env_remove("LETTERGRADE_CONFIG")
        .env_remove("LETTERGRADE_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Variant the default config assigns to an identifier
pub fn variant_of(identifier: &str) -> VariantIndex {
    GraderConfig::default()
        .selector()
        .unwrap()
        .select(identifier)
}

/// Temp dir with a `refs/` directory holding one reference file for `identifier`
pub fn setup_reference(identifier: &str, csv: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let refs = dir.path().join("refs");
    fs::create_dir_all(&refs).unwrap();
    write_reference(&refs, identifier, csv);
    dir
}

pub fn write_reference(refs: &Path, identifier: &str, csv: &str) {
    let variant = variant_of(identifier);
    fs::write(refs.join(format!("letters_{variant}.csv")), csv).unwrap();
}
