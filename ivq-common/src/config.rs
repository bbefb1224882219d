//! Catalog configuration loading and path resolution
//!
//! Lookup tables the aggregation layer depends on (company tiers, display-name
//! overrides, topic descriptions) and the thin-content policy are injected as a
//! `CatalogConfig` rather than hardwired, so tests and deployments can swap them.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming a catalog TOML file
pub const CONFIG_ENV_VAR: &str = "IVQ_CONFIG";

/// Minimum records for a (company, topic) page to be published
pub const DEFAULT_THIN_CONTENT_THRESHOLD: usize = 3;

/// Tier assigned to companies missing from the tier table
pub const DEFAULT_COMPANY_TIER: u8 = 3;

/// Catalog configuration
///
/// Every field has a default; an empty TOML file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// (company, topic) pairs with fewer records are thin content
    pub thin_content_threshold: usize,
    /// Number of top topics kept per company
    pub company_top_topics: usize,
    /// Number of top companies kept per topic
    pub topic_top_companies: usize,
    /// Related links kept per entity in the published link table
    pub related_limit: usize,
    /// Company slug → tier (1 = most prominent)
    pub company_tiers: HashMap<String, u8>,
    /// Company slug → display name override
    pub company_names: HashMap<String, String>,
    /// Topic slug → description text
    pub topic_descriptions: HashMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            thin_content_threshold: DEFAULT_THIN_CONTENT_THRESHOLD,
            company_top_topics: 5,
            topic_top_companies: 10,
            related_limit: 6,
            company_tiers: HashMap::new(),
            company_names: default_company_names(),
            topic_descriptions: HashMap::new(),
        }
    }
}

impl CatalogConfig {
    /// Tier for a company slug, `DEFAULT_COMPANY_TIER` if unlisted
    pub fn tier_for(&self, company_slug: &str) -> u8 {
        self.company_tiers
            .get(company_slug)
            .copied()
            .unwrap_or(DEFAULT_COMPANY_TIER)
    }

    /// Description for a topic, or a generated fallback
    pub fn topic_description(&self, topic_slug: &str, topic_name: &str) -> String {
        match self.topic_descriptions.get(topic_slug) {
            Some(text) => text.clone(),
            None => format!(
                "Practice {} interview questions asked by top tech companies, \
                 with difficulty breakdowns and the companies that ask them most.",
                topic_name
            ),
        }
    }

    /// Parse configuration from TOML text
    ///
    /// Display-name overrides from the file are layered over the built-in table.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: CatalogConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;

        for (slug, name) in default_company_names() {
            config.company_names.entry(slug).or_insert(name);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed for {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            tiers = config.company_tiers.len(),
            descriptions = config.topic_descriptions.len(),
            "Loaded catalog configuration"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some((slug, tier)) = self.company_tiers.iter().find(|(_, tier)| **tier == 0) {
            return Err(Error::Config(format!(
                "company tier for '{}' must be >= 1, got {}",
                slug, tier
            )));
        }
        Ok(())
    }
}

/// Built-in display names for slugs that word capitalization gets wrong
pub fn default_company_names() -> HashMap<String, String> {
    [
        ("ibm", "IBM"),
        ("jpmorgan", "JPMorgan"),
        ("linkedin", "LinkedIn"),
        ("paypal", "PayPal"),
        ("tiktok", "TikTok"),
        ("doordash", "DoorDash"),
        ("bytedance", "ByteDance"),
        ("servicenow", "ServiceNow"),
        ("walmart-labs", "Walmart Labs"),
        ("de-shaw", "D. E. Shaw"),
        ("ebay", "eBay"),
        ("sap", "SAP"),
        ("tcs", "TCS"),
    ]
    .into_iter()
    .map(|(slug, name)| (slug.to_string(), name.to_string()))
    .collect()
}

/// Catalog config file resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `IVQ_CONFIG` environment variable
/// 3. `<config dir>/ivq/catalog.toml` if it exists
/// 4. None: use built-in defaults
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let default_path = dirs::config_dir().map(|d| d.join("ivq").join("catalog.toml"));
    match default_path {
        Some(path) if path.exists() => Some(path),
        _ => {
            debug!("No catalog config file found, using built-in defaults");
            None
        }
    }
}

/// Resolve and load the catalog configuration
///
/// An explicitly requested file (CLI or env) that cannot be read is an error.
pub fn load_catalog_config(cli_arg: Option<&Path>) -> Result<CatalogConfig> {
    match resolve_config_path(cli_arg) {
        Some(path) => CatalogConfig::load(&path),
        None => Ok(CatalogConfig::default()),
    }
}
