use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a test command
fn hcloudctl() -> Command {
    Command::cargo_bin("hcloudctl").unwrap()
}

/// Helper that isolates the command from ambient HCLOUD_* variables and
/// the user's real config file.
fn isolated(config: &std::path::Path) -> Command {
    let mut cmd = hcloudctl();
    cmd.env_remove("HCLOUD_TOKEN")
        .env_remove("HCLOUD_API_URL")
        .arg("--config-file")
        .arg(config);
    cmd
}

#[test]
fn test_help_flag() {
    hcloudctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage Hetzner Cloud"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_help_short_flag() {
    hcloudctl()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    hcloudctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hcloudctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_subcommand() {
    hcloudctl()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    hcloudctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    hcloudctl()
        .arg("not-a-command")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_server_help_lists_operations() {
    hcloudctl()
        .args(["server", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("resize"))
        .stdout(predicate::str::contains("rebuild"));
}

#[test]
fn test_load_balancer_alias() {
    hcloudctl()
        .args(["lb", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add-target"));
}

#[test]
fn test_completions_generate() {
    hcloudctl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hcloudctl"));
}

#[test]
fn test_api_rejects_unknown_method() {
    hcloudctl()
        .args(["api", "patch", "/servers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown method"));
}

#[test]
fn test_command_without_profile_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    isolated(&config)
        .args(["server", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No profile configured"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_profile_set_list_and_remove_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    isolated(&config)
        .args(["profile", "set", "dev", "--api-token", "test-token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'dev' saved"));

    isolated(&config)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"));

    // The token must never appear in profile output
    isolated(&config)
        .args(["profile", "show", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test-token").not());

    isolated(&config)
        .args(["profile", "remove", "dev", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'dev' removed"));
}

#[test]
fn test_profile_path_points_at_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    isolated(&config)
        .args(["profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    isolated(&config)
        .args(["profile", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}
