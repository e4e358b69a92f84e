use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const REQUIRED_API_KEYS: [&str; 7] = [
    "GROQ_API_KEY",
    "GOOGLE_API_KEY",
    "TAVILY_API_KEY",
    "OPENAI_API_KEY",
    "LANGSMITH_API_KEY",
    "LANGSMITH_TRACING_V2",
    "LANGSMITH_PROJECT",
];

fn analyst() -> Command {
    let mut cmd = Command::cargo_bin("analyst").unwrap();
    cmd.env_remove("PATH_TO_CONFIG")
        .env_remove("LLM_PROVIDER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn versions_lists_tracked_packages() {
    analyst()
        .arg("versions")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyst-core"))
        .stdout(predicate::str::contains("tokio"));
}

#[test]
fn config_prints_explicit_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("configuration.yaml");
    std::fs::write(
        &path,
        "embedding:\n  model_name: embed-x\nllm:\n  groq:\n    provider: groq\n    model_name: Y\n",
    )
    .unwrap();

    analyst()
        .args(["config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()))
        .stdout(predicate::str::contains("embed-x"))
        .stdout(predicate::str::contains("\"groq\""));
}

#[test]
fn config_reports_missing_file() {
    let dir = tempdir().unwrap();

    analyst()
        .args(["config", "--config"])
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn chat_fails_fast_without_credentials() {
    let dir = tempdir().unwrap();
    let mut cmd = analyst();
    for key in REQUIRED_API_KEYS {
        cmd.env_remove(key);
    }

    cmd.current_dir(dir.path())
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "GROQ_API_KEY is not set in environment variables.",
        ));
}

const PROVIDER_CONFIG: &str = "embedding:\n  model_name: embed-x\nllm:\n  groq:\n    provider: groq\n  openai:\n    provider: openai\n    model_name: gpt-4o-mini\n";

/// Command with every credential set, run from a directory holding `rel.yaml`
fn analyst_with_keys(dir: &std::path::Path) -> Command {
    std::fs::write(dir.join("rel.yaml"), PROVIDER_CONFIG).unwrap();

    let mut cmd = analyst();
    for key in REQUIRED_API_KEYS {
        cmd.env(key, format!("{}-secret", key.to_lowercase()));
    }
    cmd.current_dir(dir).env("PATH_TO_CONFIG", "rel.yaml");
    cmd
}

#[test]
fn config_resolves_relative_path_from_working_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("rel.yaml"), PROVIDER_CONFIG).unwrap();

    analyst()
        .current_dir(dir.path())
        .args(["config", "--config", "rel.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("embed-x"));

    analyst()
        .current_dir(dir.path())
        .env("PATH_TO_CONFIG", "rel.yaml")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("gpt-4o-mini"));
}

#[test]
fn chat_reports_provider_missing_from_configuration() {
    let dir = tempdir().unwrap();

    analyst_with_keys(dir.path())
        .env("LLM_PROVIDER", "unknown-provider")
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error loading LLM model: LLM provider 'unknown-provider' not found in configuration.",
        ));
}

#[test]
fn chat_defaults_to_google_provider() {
    let dir = tempdir().unwrap();

    analyst_with_keys(dir.path())
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "LLM provider 'google' not found in configuration.",
        ));
}

#[test]
fn chat_uses_provider_from_environment() {
    let dir = tempdir().unwrap();

    analyst_with_keys(dir.path())
        .env("LLM_PROVIDER", "groq")
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("llm.groq.model_name"));
}

#[test]
fn chat_treats_empty_provider_as_a_key() {
    let dir = tempdir().unwrap();

    analyst_with_keys(dir.path())
        .env("LLM_PROVIDER", "")
        .args(["chat", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "LLM provider '' not found in configuration.",
        ));
}
