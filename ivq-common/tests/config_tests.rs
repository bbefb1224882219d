//! Unit tests for catalog configuration loading and resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate IVQ_CONFIG are marked with #[serial].

use ivq_common::config::{
    load_catalog_config, resolve_config_path, CatalogConfig, CONFIG_ENV_VAR,
    DEFAULT_COMPANY_TIER, DEFAULT_THIN_CONTENT_THRESHOLD,
};
use ivq_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = CatalogConfig::default();

    assert_eq!(config.thin_content_threshold, DEFAULT_THIN_CONTENT_THRESHOLD);
    assert_eq!(config.thin_content_threshold, 3);
    assert_eq!(config.company_top_topics, 5);
    assert_eq!(config.topic_top_companies, 10);
    assert!(config.company_tiers.is_empty());
    assert_eq!(config.company_names.get("ibm").map(String::as_str), Some("IBM"));
}

#[test]
fn test_empty_toml_is_valid() {
    let config = CatalogConfig::from_toml_str("").unwrap();
    assert_eq!(config, CatalogConfig::default());
}

#[test]
fn test_toml_overrides_and_tables() {
    let toml = r#"
thin_content_threshold = 5
company_top_topics = 3

[company_tiers]
google = 1
amazon = 1
stripe = 2

[company_names]
ibm = "International Business Machines"
a16z = "Andreessen Horowitz"

[topic_descriptions]
array = "Contiguous sequences."
"#;

    let config = CatalogConfig::from_toml_str(toml).unwrap();

    assert_eq!(config.thin_content_threshold, 5);
    assert_eq!(config.company_top_topics, 3);
    // Unspecified fields keep defaults
    assert_eq!(config.topic_top_companies, 10);

    assert_eq!(config.tier_for("google"), 1);
    assert_eq!(config.tier_for("stripe"), 2);
    assert_eq!(config.tier_for("unknown-co"), DEFAULT_COMPANY_TIER);

    // File entries win over the built-in table, built-ins fill the rest
    assert_eq!(
        config.company_names.get("ibm").map(String::as_str),
        Some("International Business Machines")
    );
    assert_eq!(
        config.company_names.get("a16z").map(String::as_str),
        Some("Andreessen Horowitz")
    );
    assert_eq!(
        config.company_names.get("linkedin").map(String::as_str),
        Some("LinkedIn")
    );

    assert_eq!(config.topic_description("array", "Array"), "Contiguous sequences.");
}

#[test]
fn test_topic_description_fallback_mentions_name() {
    let config = CatalogConfig::default();
    let text = config.topic_description("dynamic-programming", "Dynamic Programming");
    assert!(text.contains("Dynamic Programming"));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let result = CatalogConfig::from_toml_str("thin_content_threshold = \"three\"");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_zero_tier_rejected() {
    let result = CatalogConfig::from_toml_str("[company_tiers]\ngoogle = 0\n");
    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("google")),
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.toml");
    std::fs::write(&path, "related_limit = 4\n").unwrap();

    let config = CatalogConfig::load(&path).unwrap();
    assert_eq!(config.related_limit, 4);
}

#[test]
fn test_load_missing_explicit_file_errors() {
    let result = CatalogConfig::load(Path::new("/nonexistent/ivq/catalog.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_cli_arg_takes_precedence_over_env() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/ivq-from-env.toml");

    let resolved = resolve_config_path(Some(Path::new("/tmp/ivq-from-cli.toml")));
    assert_eq!(resolved, Some(PathBuf::from("/tmp/ivq-from-cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_cli_arg() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/ivq-from-env.toml");

    let resolved = resolve_config_path(None);
    assert_eq!(resolved, Some(PathBuf::from("/tmp/ivq-from-env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_load_catalog_config_via_env() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("env.toml");
    std::fs::write(&path, "thin_content_threshold = 7\n").unwrap();
    env::set_var(CONFIG_ENV_VAR, &path);

    let config = load_catalog_config(None).unwrap();
    assert_eq!(config.thin_content_threshold, 7);

    env::remove_var(CONFIG_ENV_VAR);
}
