//! Binary-level CLI checks.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_subcommands() {
    Command::cargo_bin("lastbuild")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("latest").and(predicate::str::contains("fetch")));
}

#[test]
fn latest_prints_the_located_build() {
    let mut server = mockito::Server::new();
    let temp = tempfile::tempdir().unwrap();

    let _listing = server
        .mock("GET", "/master")
        .with_status(200)
        .with_body(r#"<a href="1.2.3.4568/">1.2.3.4568/</a>"#)
        .create();
    let _artifact = server
        .mock("GET", "/master/1.2.3.4568/Win/QA/NimbusSetup.exe")
        .with_status(200)
        .create();

    Command::cargo_bin("lastbuild")
        .unwrap()
        .args([
            "--quiet",
            "--config",
            temp.path().join("absent.toml").to_str().unwrap(),
            "latest",
            "master",
            "--platform",
            "Win",
            "--type",
            "QA",
            "--root",
            &server.url(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.3.4568"));
}

#[test]
fn unknown_platform_fails_with_a_config_error() {
    let temp = tempfile::tempdir().unwrap();

    Command::cargo_bin("lastbuild")
        .unwrap()
        .args([
            "--config",
            temp.path().join("absent.toml").to_str().unwrap(),
            "latest",
            "master",
            "--platform",
            "Amiga",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform"));
}
