use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::PathBuf;

#[fixture]
pub fn scenario_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn write_scenario(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let file = dir.child(name);
    file.write_str(&lines.join("\n"))
        .expect("Failed to write scenario file");
    file.path().to_path_buf()
}

pub fn run_bitsim(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitsim").expect("Failed to find bitsim binary");
    cmd.arg("--no-color").args(args);
    cmd
}
