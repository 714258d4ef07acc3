//! Sequential discovery pass over all roots and the inventory provider.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::broadcast;

use gameshelf_core::{Classifier, DiscoveryConfig, GameEntry, ScanError, ScanWarning};

use crate::inventory::{InventoryProvider, NoInventory, resolve_inventory};
use crate::progress::{ScanPhase, ScanProgress};
use crate::roots::{ScanRoot, enumerate_roots};
use crate::walk::{RootScan, Traversal};

/// Raw output of a discovery pass, before deduplication.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Candidates in source-priority order: roots first, inventory last.
    pub candidates: Vec<GameEntry>,
    /// Number of roots visited.
    pub roots_scanned: usize,
    /// How many of `candidates` came from the inventory provider.
    pub inventory_candidates: usize,
    /// Non-fatal problems encountered.
    pub warnings: Vec<ScanWarning>,
    /// Wall-clock duration of the pass.
    pub duration: Duration,
}

/// Runs discovery passes and broadcasts their progress.
///
/// Roots are processed one after another in enumeration order, so the
/// order of [`ScanReport::candidates`] is stable for an unchanged filesystem.
pub struct GameScanner {
    config: DiscoveryConfig,
    classifier: Classifier,
    inventory: Arc<dyn InventoryProvider>,
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl GameScanner {
    /// Create a scanner with no inventory provider.
    pub fn new(config: DiscoveryConfig) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            classifier: Classifier::new(&config),
            config,
            inventory: Arc::new(NoInventory),
            progress_tx,
        }
    }

    /// Use `provider` for the inventory stage.
    pub fn with_inventory(mut self, provider: Arc<dyn InventoryProvider>) -> Self {
        self.inventory = provider;
        self
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// The configuration this scanner runs with.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// The roots a full pass would visit right now.
    pub fn roots(&self) -> Vec<ScanRoot> {
        enumerate_roots(&self.config)
    }

    fn traversal(&self) -> Traversal<'_> {
        Traversal::new(&self.classifier, self.config.deep_max_depth)
    }

    /// Perform a full discovery pass.
    ///
    /// A root that fails, or panics, is recorded as a warning and the pass
    /// continues with the next one.
    pub fn scan(&self) -> ScanReport {
        let start = Instant::now();
        let roots = self.roots();
        let total = roots.len();
        let mut report = ScanReport::default();

        tracing::info!(roots = total, "starting discovery pass");

        for (i, root) in roots.iter().enumerate() {
            self.emit(ScanProgress {
                phase: ScanPhase::Roots,
                root_index: i + 1,
                root_total: total,
                current_label: root.label(),
                current_path: Some(root.path.clone()),
                candidates_found: report.candidates.len(),
                elapsed: start.elapsed(),
            });

            match self.scan_root(root) {
                Ok(found) => {
                    tracing::debug!(
                        root = %root.path.display(),
                        mode = %root.mode,
                        found = found.candidates.len(),
                        "root scanned"
                    );
                    report.candidates.extend(found.candidates);
                    report.warnings.extend(found.warnings);
                }
                Err(err) => {
                    tracing::warn!(root = %root.path.display(), error = %err, "root failed");
                    report.warnings.push(ScanWarning::root_failed(&root.path, &err));
                }
            }
            report.roots_scanned += 1;
        }

        if self.config.include_inventory {
            self.emit(ScanProgress {
                phase: ScanPhase::Inventory,
                root_index: 0,
                root_total: total,
                current_label: self.inventory.name().to_string(),
                current_path: None,
                candidates_found: report.candidates.len(),
                elapsed: start.elapsed(),
            });
            let found = resolve_inventory(
                self.inventory.as_ref(),
                &self.traversal(),
                &mut report.warnings,
            );
            report.inventory_candidates = found.len();
            report.candidates.extend(found);
        }

        report.duration = start.elapsed();
        tracing::info!(
            candidates = report.candidates.len(),
            warnings = report.warnings.len(),
            elapsed_ms = report.duration.as_millis() as u64,
            "discovery pass finished"
        );
        report
    }

    /// Scan one root per its traversal hint, containing any panic.
    pub fn scan_root(&self, root: &ScanRoot) -> Result<RootScan, ScanError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.traversal().run(root))).unwrap_or_else(
            |_| {
                Err(ScanError::Other {
                    message: format!("Scanner panicked in {}", root.path.display()),
                })
            },
        )
    }

    /// Deep-scan a single user-selected directory.
    pub fn scan_directory(&self, dir: &Path) -> Result<RootScan, ScanError> {
        self.traversal().deep(dir)
    }

    fn emit(&self, progress: ScanProgress) {
        // No subscribers is fine.
        let _ = self.progress_tx.send(progress);
    }
}

impl Default for GameScanner {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}
