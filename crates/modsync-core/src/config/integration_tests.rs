//! Integration tests for configuration module

use std::fs;

use tempfile::TempDir;

use super::{ConfigManager, ConfigValidator};
use crate::scanner::Scanner;
use crate::status::NullSink;

#[test]
fn test_full_config_workflow() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("primary/skins/CH ModA 1.0.0")).unwrap();
    fs::create_dir_all(tmp.path().join("primary/Backup/ModA 0.9.0")).unwrap();
    fs::create_dir(tmp.path().join("secondary")).unwrap();

    let config_file = tmp.path().join("config.toml");
    fs::write(
        &config_file,
        r#"
primary = "primary"
secondary = "secondary"
ignore = ["/Backup"]
"#,
    )
    .unwrap();

    let config = ConfigManager::load(Some(&config_file)).unwrap();
    let roots = ConfigValidator::resolve_roots(&config).unwrap();
    let scanner = Scanner::new(config.scan_options().unwrap());
    let outcome = scanner.scan(&roots.primary, &mut NullSink).unwrap();

    assert!(outcome.inventory.category("Backup").is_none());
    assert!(outcome.inventory.get("skins", "ModA").is_some());
}

#[test]
fn test_invalid_config_validation() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, r#"ignore = ["*.bak", ""]"#).unwrap();

    let result = ConfigManager::load(Some(&config_file));

    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Ignore pattern cannot be empty")
    );
}

#[test]
fn test_command_line_roots_override_file() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("a")).unwrap();
    fs::create_dir(tmp.path().join("b")).unwrap();
    fs::create_dir(tmp.path().join("usb")).unwrap();

    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, "primary = \"a\"\nsecondary = \"b\"\n").unwrap();

    let config = ConfigManager::load(Some(&config_file))
        .unwrap()
        .with_overrides(None, Some(tmp.path().join("usb")));
    let roots = ConfigValidator::resolve_roots(&config).unwrap();

    assert!(roots.primary.ends_with("a"));
    assert!(roots.secondary.ends_with("usb"));
}
