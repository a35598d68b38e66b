use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn template_sync(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("template-sync").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("TEMPLATE_SYNC_SYNC__TEMPLATE_DIRECTORY")
        .env_remove("TEMPLATE_SYNC_GITHUB__TOKEN")
        .env_remove("TEMPLATE_SYNC_GITHUB_TOKEN")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_no_arguments_shows_getting_started() {
    let workdir = TempDir::new().unwrap();

    template_sync(&workdir)
        .assert()
        .success()
        .stdout(predicate::str::contains("template-sync - Issue & PR Template Sync"))
        .stdout(predicate::str::contains("template-sync sync OWNER/REPO --template-dir"))
        .stdout(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_help_lists_subcommands() {
    let workdir = TempDir::new().unwrap();

    template_sync(&workdir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_sync_help_lists_options() {
    let workdir = TempDir::new().unwrap();

    template_sync(&workdir)
        .args(["sync", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--template-dir"))
        .stdout(predicate::str::contains("--label"))
        .stdout(predicate::str::contains("--no-archive-check"))
        .stdout(predicate::str::contains("--replace-all-existing"));
}

#[test]
fn test_sync_without_template_dir_fails_before_network() {
    let workdir = TempDir::new().unwrap();

    template_sync(&workdir)
        .args(["sync", "octo-org/widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no template directory configured"));
}

#[test]
fn test_sync_rejects_malformed_repository() {
    let workdir = TempDir::new().unwrap();

    template_sync(&workdir)
        .args(["sync", "widgets", "--template-dir", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected OWNER/REPO"));
}

#[test]
fn test_config_prints_effective_settings_with_redacted_token() {
    let workdir = TempDir::new().unwrap();
    std::fs::write(
        workdir.path().join("template-sync.toml"),
        "[github]\ntoken = \"ghp_secretvalue\"\n\n[sync]\nlabel_name = \"documentation\"\n",
    )
    .unwrap();

    template_sync(&workdir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[sync]"))
        .stdout(predicate::str::contains("documentation"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("ghp_secretvalue").not());
}
