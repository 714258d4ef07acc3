//! Core types and rules for gameshelf.
//!
//! This crate provides the fundamental data structures used throughout
//! the gameshelf ecosystem: the [`GameEntry`] record, the key normalization
//! used for comparisons, the display-name resolver, the executable
//! classifier, and the discovery configuration.

mod classify;
mod config;
mod entry;
mod error;
mod name;
mod normalize;

pub use classify::{Classifier, is_likely_game_directory};
pub use config::{DiscoveryConfig, DiscoveryConfigBuilder, DEFAULT_DEEP_MAX_DEPTH};
pub use entry::GameEntry;
pub use error::{ScanError, ScanWarning, WarningKind};
pub use name::{is_generic_dir_name, resolve_name};
pub use normalize::{name_key, normalize, normalize_path};
