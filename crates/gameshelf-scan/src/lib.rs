//! Discovery engine for gameshelf.
//!
//! This crate finds candidate games on disk. It does not deduplicate or
//! apply user overrides; that happens in `gameshelf-library`.
//!
//! # Overview
//!
//! - **Root enumeration** - built-in install locations, the desktop and
//!   user-selected folders, each tagged deep or shallow
//! - **Traversal** - depth-bounded recursive walks via jwalk, or a
//!   single-level pass taking one executable per child folder
//! - **Inventory** - optional installed-software sources such as Steam
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use gameshelf_scan::{DiscoveryConfig, GameScanner};
//!
//! let scanner = GameScanner::new(DiscoveryConfig::default());
//! let report = scanner.scan();
//!
//! for game in &report.candidates {
//!     println!("{} -> {}", game.name, game.path.display());
//! }
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use gameshelf_scan::GameScanner;
//!
//! let scanner = GameScanner::default();
//! let mut progress_rx = scanner.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("{}", progress.status_line());
//!     }
//! });
//! ```

mod inventory;
mod progress;
mod roots;
mod scanner;
mod walk;

pub use inventory::{
    InventoryError, InventoryProvider, InventoryRecord, NoInventory, SteamInventory,
    resolve_inventory,
};
pub use progress::{ScanPhase, ScanProgress};
pub use roots::{
    ScanRoot, TraversalMode, desktop_dir, enumerate_roots, existing_roots, well_known_locations,
};
pub use scanner::{GameScanner, ScanReport};
pub use walk::{RootScan, Traversal};

// Re-export core types for convenience
pub use gameshelf_core::{
    Classifier, DiscoveryConfig, GameEntry, ScanError, ScanWarning, WarningKind,
};
