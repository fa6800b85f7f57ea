//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test, isolated from the user's config and credentials.
fn planwright(home: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("planwright").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("OPENAI_API_KEY")
        .env_remove("PLANWRIGHT_MODEL")
        .env_remove("PLANWRIGHT_PROVIDER")
        .env_remove("OLLAMA_HOST");
    cmd
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("business plan"));
}

#[test]
fn test_version_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp).arg("frobnicate").assert().failure();
}

// ============================================================================
// Sections & Config Tests
// ============================================================================

#[test]
fn test_sections_lists_default_template() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .arg("sections")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Executive Summary"))
        .stdout(predicate::str::contains("9. Appendix"));
}

#[test]
fn test_sections_from_local_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".planwright.toml")
        .write_str("[plan]\ntitle = \"Pitch\"\nsections = [\"Problem\", \"Solution\"]\n")
        .unwrap();

    planwright(&temp)
        .arg("sections")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pitch"))
        .stdout(predicate::str::contains("2. Solution"))
        .stdout(predicate::str::contains("Executive Summary").not());
}

#[test]
fn test_sections_rejects_duplicate_names() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".planwright.toml").write_str("[plan]\nsections = [\"A\", \"A\"]\n").unwrap();

    planwright(&temp).arg("sections").assert().failure();
}

#[test]
fn test_config_redacts_api_key() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .args(["config", "--api-key", "sk-very-secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ai]"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("sk-very-secret").not());
}

#[test]
fn test_config_never_writes_global_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp).args(["config", "--api-key", "sk-very-secret"]).assert().success();

    temp.child(".config/planwright/config.toml").assert(predicate::path::missing());
}

#[test]
fn test_config_path_prefers_local_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".planwright.toml").write_str("").unwrap();

    planwright(&temp)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".planwright.toml"));
}

// ============================================================================
// Generate Tests
// ============================================================================

#[test]
fn test_generate_dry_run_writes_markdown() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .args([
            "generate",
            "--dry-run",
            "--name",
            "Acme Bikes",
            "--industry",
            "retail",
            "--core-product",
            "e-bikes",
            "--problem-solved",
            "urban commuting",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("business_plan.md"));

    let plan = temp.child("business_plan.md");
    plan.assert(predicate::str::starts_with("# Business Plan\n"));
    plan.assert(predicate::str::contains("## Executive Summary"));
    plan.assert(predicate::str::contains("## Appendix"));
    plan.assert(predicate::str::contains("Acme Bikes"));
}

#[test]
fn test_generate_dry_run_json_from_profile_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("profile.toml")
        .write_str(
            "name = \"Acme Bikes\"\nindustry = \"retail\"\n\
             core_product = \"e-bikes\"\nproblem_solved = \"urban commuting\"\n",
        )
        .unwrap();
    temp.child("out").create_dir_all().unwrap();

    planwright(&temp)
        .args(["generate", "--dry-run", "--profile", "profile.toml", "--format", "json"])
        .args(["--output", "out"])
        .assert()
        .success();

    let plan = temp.child("out/business_plan.json");
    plan.assert(predicate::str::contains("\"title\": \"Business Plan\""));
    plan.assert(predicate::str::contains("\"heading\": \"Market Analysis\""));
}

#[test]
fn test_generate_reports_failed_sections() {
    let temp = assert_fs::TempDir::new().unwrap();
    // Nothing listens on the discard port, so every request fails
    temp.child(".planwright.toml")
        .write_str(
            "[ai]\nprovider = \"ollama\"\nmodel = \"llama3.2\"\n\
             base_url = \"http://127.0.0.1:9\"\ntimeout_secs = 5\n\n\
             [plan]\nsections = [\"Overview\", \"Market\"]\n",
        )
        .unwrap();

    planwright(&temp)
        .args(["generate", "--name", "A", "--industry", "B"])
        .args(["--core-product", "C", "--problem-solved", "D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("business_plan.md"))
        .stderr(predicate::str::contains("failed to generate 'Overview'"))
        .stderr(predicate::str::contains(
            "Warning: 2 of 2 sections could not be generated: Overview, Market",
        ));

    temp.child("business_plan.md").assert("# Business Plan\n");
}

#[test]
fn test_generate_requires_complete_profile() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .args(["generate", "--dry-run", "--name", "Acme Bikes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete business profile"));

    temp.child("business_plan.md").assert(predicate::path::missing());
}

#[test]
fn test_generate_requires_api_key() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .args(["generate", "--name", "A", "--industry", "B"])
        .args(["--core-product", "C", "--problem-solved", "D"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

// ============================================================================
// Completions Tests
// ============================================================================

#[test]
fn test_completions_bash() {
    let temp = assert_fs::TempDir::new().unwrap();
    planwright(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("planwright"));
}
