//! Dependency version report

include!(concat!(env!("OUT_DIR"), "/package_versions.rs"));

/// Format one report line
fn version_line(name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}=={}", name, version),
        None => format!("{} (not installed)", name),
    }
}

/// Print `name==version` (or `name (not installed)`) per tracked package
pub fn versions_command() {
    for (name, version) in PACKAGE_VERSIONS {
        println!("{}", version_line(name, *version));
    }
}
