//! Reconciliation, user overrides and scan orchestration for gameshelf.
//!
//! This crate turns raw discovery output into the game list a front end
//! shows, and owns the two user-maintained collections:
//!
//! - **Favorites** - games the user starred
//! - **Deleted** - games the user hid; they stay hidden across rescans
//!   until restored
//!
//! Both collections are JSON documents rewritten whole after every change.
//!
//! # Reconciliation
//!
//! A full pass produces candidates in source order (roots, then inventory).
//! The game list is built in three steps:
//!
//! 1. Keep the first candidate per name (case- and whitespace-insensitive)
//! 2. Drop candidates whose path is hidden
//! 3. Sort by name
//!
//! # Background scanning
//!
//! ```rust,no_run
//! use gameshelf_library::{Library, ScanEvent, ScanOrchestrator, Settings};
//!
//! # async fn run() {
//! let settings = Settings::load();
//! let mut library = Library::from_settings(&settings);
//! let orchestrator = ScanOrchestrator::new(settings.discovery.clone());
//!
//! if let Some(mut events) = orchestrator.start_scan(library.deleted().to_vec()) {
//!     while let Some(event) = events.recv().await {
//!         match event {
//!             ScanEvent::Progress(p) => println!("{}", p.status_line()),
//!             ScanEvent::Completed(outcome) => library.apply_outcome(&outcome),
//!             ScanEvent::Failed(message) => eprintln!("{message}"),
//!         }
//!     }
//! }
//! # }
//! ```

mod error;
mod launch;
mod library;
mod orchestrator;
pub mod reconcile;
mod settings;
mod store;

pub use error::{Collection, LaunchError, LibraryError, StoreError};
pub use launch::launch;
pub use library::{FavoriteToggle, Library, LibraryStats};
pub use orchestrator::{SCAN_CHANNEL_SIZE, ScanEvent, ScanOrchestrator, ScanOutcome, ScanState};
pub use reconcile::{ReconcileStats, reconcile};
pub use settings::{DELETED_FILE, FAVORITES_FILE, Settings};
pub use store::OverrideStore;

// Re-export core types
pub use gameshelf_core::{DiscoveryConfig, GameEntry};
pub use gameshelf_scan::{ScanProgress, ScanReport, ScanWarning};
