//! Discovery configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default number of directory levels a deep scan looks into below its root.
pub const DEFAULT_DEEP_MAX_DEPTH: usize = 2;

/// Configuration for a discovery pass.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File extensions treated as executables (without the dot).
    #[builder(default = "default_extensions()")]
    pub executable_extensions: Vec<String>,

    /// Deepest directory level, relative to a deep-scan root, whose files are examined.
    #[builder(default = "DEFAULT_DEEP_MAX_DEPTH")]
    pub deep_max_depth: usize,

    /// Path fragments marking user-curated game folders.
    #[builder(default = "default_custom_game_roots()")]
    pub custom_game_roots: Vec<String>,

    /// Additional user-selected roots scanned after the well-known locations.
    #[builder(default)]
    pub extra_roots: Vec<PathBuf>,

    /// Scan the built-in store and publisher install locations.
    #[builder(default = "true")]
    pub include_well_known: bool,

    /// Query the platform inventory provider after all roots.
    #[builder(default = "true")]
    pub include_inventory: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["exe".to_string()]
}

fn default_custom_game_roots() -> Vec<String> {
    vec![
        "downloads/games".to_string(),
        "d:/games".to_string(),
        "c:/games".to_string(),
    ]
}

impl DiscoveryConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref extensions) = self.executable_extensions {
            if extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
                return Err("At least one executable extension is required".to_string());
            }
        }
        if self.deep_max_depth == Some(0) {
            return Err("Deep scan depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl DiscoveryConfig {
    /// Create a new config builder.
    pub fn builder() -> DiscoveryConfigBuilder {
        DiscoveryConfigBuilder::default()
    }

    /// Config that scans only `roots`, with no built-in locations or inventory.
    pub fn only_roots(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            extra_roots: roots.into_iter().map(Into::into).collect(),
            include_well_known: false,
            include_inventory: false,
            ..Self::default()
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            executable_extensions: default_extensions(),
            deep_max_depth: DEFAULT_DEEP_MAX_DEPTH,
            custom_game_roots: default_custom_game_roots(),
            extra_roots: Vec::new(),
            include_well_known: true,
            include_inventory: true,
        }
    }
}
