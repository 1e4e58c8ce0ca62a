//! Workspace packaging checks.

use std::path::Path;

#[test]
fn test_every_crate_readme_exists() {
    let crates = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");

    for name in ["core", "site", "cli", "integration-tests"] {
        let manifest = std::fs::read_to_string(crates.join(name).join("Cargo.toml"))
            .unwrap_or_else(|e| panic!("{name}/Cargo.toml: {e}"));
        assert!(manifest.contains(r#"readme = "README.md""#), "{name}");
        assert!(crates.join(name).join("README.md").is_file(), "{name}/README.md missing");
    }
}
