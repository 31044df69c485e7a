//! End-to-end tests for the `bundle-builder completions` command.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

#[test]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("bundle-builder");
    cmd.args(["completions", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completion scripts"))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("powershell"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("bundle-builder");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_bundle__builder()"))
        .stdout(predicate::str::contains("complete -F _bundle__builder"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("libs"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("bundle-builder");
    cmd.args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef bundle-builder"));
}

#[test]
fn test_completions_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("bundle-builder");
    cmd.args(["completions", "tcsh"]).assert().failure().code(2);
}
