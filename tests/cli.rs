use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("worldexplorer").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("worldexplorer"));
}

#[test]
fn cli_rejects_invalid_base_url() {
    let mut cmd = Command::cargo_bin("worldexplorer").unwrap();
    cmd.args(["--base-url", "ftp://api.worldbank.org", "country", "BRA"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid client configuration"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_series() {
    let mut cmd = Command::cargo_bin("worldexplorer").unwrap();
    cmd.args([
        "series",
        "--country",
        "DEU",
        "--indicator",
        "total-population",
        "--date",
        "2019:2020",
    ]);
    cmd.assert().success();
}
