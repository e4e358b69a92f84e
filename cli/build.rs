//! Generates the dependency version table shown by `analyst versions`.
//!
//! Versions are taken from the workspace `Cargo.lock`. Packages that are not
//! in the lock file are emitted without a version.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Packages reported by `analyst versions`, in display order
const TRACKED_PACKAGES: &[&str] = &[
    "analyst-core",
    "tokio",
    "reqwest",
    "async-openai",
    "serde",
    "serde_json",
    "config",
    "dotenvy",
    "tracing",
    "tracing-subscriber",
    "clap",
    "anyhow",
    "thiserror",
];

fn locked_version(lock: Option<&toml::Value>, name: &str) -> Option<String> {
    lock?
        .get("package")?
        .as_array()?
        .iter()
        .find(|pkg| pkg.get("name").and_then(|n| n.as_str()) == Some(name))?
        .get("version")?
        .as_str()
        .map(str::to_string)
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let lock_path = manifest_dir.join("..").join("Cargo.lock");
    println!("cargo:rerun-if-changed={}", lock_path.display());
    println!("cargo:rerun-if-changed=build.rs");

    let lock = fs::read_to_string(&lock_path)
        .ok()
        .and_then(|content| content.parse::<toml::Value>().ok());

    let entries: Vec<String> = TRACKED_PACKAGES
        .iter()
        .map(|name| format!("    ({:?}, {:?}),", name, locked_version(lock.as_ref(), name)))
        .collect();

    let generated = format!(
        "/// Tracked packages and their locked versions\npub const PACKAGE_VERSIONS: &[(&str, Option<&str>)] = &[\n{}\n];\n",
        entries.join("\n")
    );

    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap()).join("package_versions.rs");
    fs::write(out_path, generated).unwrap();
}
