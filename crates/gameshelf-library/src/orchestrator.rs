//! Background discovery passes with a single-scan-at-a-time guard.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use strum::Display;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

use gameshelf_core::{DiscoveryConfig, GameEntry, ScanError};
use gameshelf_scan::{
    GameScanner, InventoryProvider, RootScan, ScanProgress, ScanReport, SteamInventory,
};

use crate::reconcile::{ReconcileStats, reconcile};

/// Capacity of the event channel handed to the caller.
pub const SCAN_CHANNEL_SIZE: usize = 100;

/// Whether a full pass is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScanState {
    /// No pass running; `start_scan` will begin one.
    Idle,
    /// A pass is running; `start_scan` is ignored.
    Scanning,
}

/// Result of a completed full pass.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The reconciled game list, ready to replace the current one.
    pub games: Vec<GameEntry>,
    /// Dedup and suppression counts.
    pub stats: ReconcileStats,
    /// Raw discovery report, including warnings.
    pub report: ScanReport,
}

/// Messages delivered on the caller's side of a background pass.
#[derive(Debug)]
pub enum ScanEvent {
    /// A root or the inventory stage is starting.
    Progress(ScanProgress),
    /// The pass finished. The orchestrator is already idle again.
    Completed(ScanOutcome),
    /// The worker died before producing a result.
    Failed(String),
}

/// Resets the shared flag to idle when dropped, whatever path the worker takes.
struct ScanGuard(Arc<AtomicBool>);

impl ScanGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs discovery off the caller's task and reports back over a channel.
#[derive(Clone)]
pub struct ScanOrchestrator {
    config: DiscoveryConfig,
    inventory: Arc<dyn InventoryProvider>,
    scanning: Arc<AtomicBool>,
}

impl ScanOrchestrator {
    /// Create an orchestrator using the local Steam library as inventory.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            inventory: Arc::new(SteamInventory::new()),
            scanning: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use `provider` for the inventory stage.
    pub fn with_inventory(mut self, provider: Arc<dyn InventoryProvider>) -> Self {
        self.inventory = provider;
        self
    }

    /// The configuration each pass runs with.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Current state of the single-pass guard.
    pub fn state(&self) -> ScanState {
        if self.scanning.load(Ordering::Acquire) {
            ScanState::Scanning
        } else {
            ScanState::Idle
        }
    }

    /// Check whether a full pass is in flight.
    pub fn is_scanning(&self) -> bool {
        self.state() == ScanState::Scanning
    }

    /// Start a full pass in the background.
    ///
    /// `deleted` is the hidden set at the time of the call; candidates at
    /// those paths are left out of the outcome. Returns `None`, and does
    /// nothing else, if a pass is already running.
    pub fn start_scan(&self, deleted: Vec<GameEntry>) -> Option<mpsc::Receiver<ScanEvent>> {
        let Some(guard) = ScanGuard::acquire(&self.scanning) else {
            tracing::debug!("scan already in progress, ignoring request");
            return None;
        };

        let (tx, rx) = mpsc::channel(SCAN_CHANNEL_SIZE);
        let scanner =
            GameScanner::new(self.config.clone()).with_inventory(Arc::clone(&self.inventory));

        tokio::spawn(async move {
            let mut progress_rx = scanner.subscribe();

            // Forward progress until the scanner (and its sender) is dropped
            let tx_progress = tx.clone();
            let forward_task = tokio::spawn(async move {
                loop {
                    match progress_rx.recv().await {
                        Ok(progress) => {
                            if tx_progress.send(ScanEvent::Progress(progress)).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "progress updates dropped");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            // Discovery is blocking filesystem work
            let result = tokio::task::spawn_blocking(move || {
                let report = scanner.scan();
                let (games, stats) = reconcile(report.candidates.clone(), &deleted);
                ScanOutcome {
                    games,
                    stats,
                    report,
                }
            })
            .await;

            let _ = forward_task.await;

            let event = match result {
                Ok(outcome) => ScanEvent::Completed(outcome),
                Err(err) => {
                    tracing::error!(error = %err, "scan worker failed");
                    ScanEvent::Failed(err.to_string())
                }
            };

            drop(guard);
            let _ = tx.send(event).await;
        });

        Some(rx)
    }

    /// Deep-scan one directory in the background.
    ///
    /// Independent of the full-pass guard; the result is meant to be merged
    /// into the existing list rather than replace it.
    pub async fn scan_directory(&self, dir: PathBuf) -> Result<RootScan, ScanError> {
        let scanner = GameScanner::new(self.config.clone());
        tokio::task::spawn_blocking(move || scanner.scan_directory(&dir))
            .await
            .unwrap_or_else(|e| {
                Err(ScanError::Other {
                    message: e.to_string(),
                })
            })
    }
}
