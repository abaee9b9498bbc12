#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary under test, with HOME pointed at a scratch directory so the
/// user's real configuration is never read or written.
pub fn tor() -> Command {
    let home = env::temp_dir().join("torego_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("torego");
    cmd.env("HOME", home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_torego.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh initialized database
pub fn init_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    tor()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// Run a command against `db_path` and parse its stdout as JSON.
pub fn json(db_path: &str, args: &[&str]) -> serde_json::Value {
    let out = tor()
        .args(["--db", db_path])
        .args(args)
        .arg("--json")
        .output()
        .expect("run torego");
    assert!(out.status.success(), "command failed: {:?}", args);
    serde_json::from_slice(&out.stdout).expect("valid json")
}

pub fn days_from_today(offset: i64) -> String {
    let d = chrono::Local::now().date_naive() + chrono::Duration::days(offset);
    d.format("%Y-%m-%d").to_string()
}
