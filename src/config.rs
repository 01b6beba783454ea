use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::node::walker::WalkLimits;

pub const DEFAULT_CONFIG_PATH: &str = "autofill-detection.yaml";

const DEFAULT_DENYLIST: [&str; 2] = ["org.sufficientlysecure.keychain", "com.android.systemui"];

const DEFAULT_BROWSERS: [&str; 14] = [
    "org.mozilla.focus",
    "org.mozilla.klar",
    "org.mozilla.firefox",
    "org.mozilla.firefox_beta",
    "org.mozilla.fenix",
    "com.android.chrome",
    "com.chrome.beta",
    "com.microsoft.emmx",
    "com.brave.browser",
    "com.opera.browser",
    "com.duckduckgo.mobile.android",
    "com.vivaldi.browser",
    "org.bromite.bromite",
    "org.torproject.torbrowser",
];

/// Process-wide settings, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutofillConfig {
    /// Packages that never receive a form. Exact, case-sensitive.
    #[serde(default = "default_denylist")]
    pub denylist: BTreeSet<String>,

    /// Packages whose requests carry web origins.
    #[serde(default = "default_browsers")]
    pub browsers: BTreeSet<String>,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            denylist: default_denylist(),
            browsers: default_browsers(),
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
        }
    }
}

impl AutofillConfig {
    pub fn is_denylisted(&self, package: &str) -> bool {
        self.denylist.contains(package)
    }

    pub fn is_browser(&self, package: &str) -> bool {
        self.browsers.contains(package)
    }

    pub fn walk_limits(&self) -> WalkLimits {
        WalkLimits {
            max_depth: self.max_depth,
            max_nodes: self.max_nodes,
        }
    }
}

// Serde default helpers
fn default_denylist() -> BTreeSet<String> {
    DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect()
}
fn default_browsers() -> BTreeSet<String> {
    DEFAULT_BROWSERS.iter().map(|s| s.to_string()).collect()
}
fn default_max_depth() -> usize {
    WalkLimits::default().max_depth
}
fn default_max_nodes() -> usize {
    WalkLimits::default().max_nodes
}

/// Load config from a YAML file.
///
/// A missing file at the default path yields defaults; an explicitly named
/// file must exist. Malformed YAML is always an error.
pub fn load_config(path: Option<&str>) -> Result<AutofillConfig, ConfigError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if path.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = config_path, "no config file, using defaults");
            return Ok(AutofillConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: config_path.to_string(),
                source,
            });
        }
    };

    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path.to_string(),
        source,
    })
}
