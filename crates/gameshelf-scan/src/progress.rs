//! Scan progress reporting.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Stage of a discovery pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ScanPhase {
    /// Walking enumerated roots.
    #[strum(to_string = "Scanning")]
    Roots,
    /// Querying the inventory provider.
    #[strum(to_string = "Checking installed software")]
    Inventory,
}

/// Progress information during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Current stage.
    pub phase: ScanPhase,
    /// 1-based index of the root being scanned (0 outside the roots stage).
    pub root_index: usize,
    /// Total number of roots in this pass.
    pub root_total: usize,
    /// Short label of what is being scanned.
    pub current_label: String,
    /// Path being scanned, if any.
    pub current_path: Option<PathBuf>,
    /// Raw candidates collected so far.
    pub candidates_found: usize,
    /// Time elapsed since the pass started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Fraction of roots started, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.phase == ScanPhase::Inventory || self.root_total == 0 {
            return 1.0;
        }
        self.root_index as f64 / self.root_total as f64
    }

    /// One-line status text, e.g. `Scanning common... (3/21)`.
    pub fn status_line(&self) -> String {
        match self.phase {
            ScanPhase::Roots => format!(
                "{} {}... ({}/{})",
                self.phase, self.current_label, self.root_index, self.root_total
            ),
            ScanPhase::Inventory => format!("{}...", self.phase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(phase: ScanPhase, index: usize, total: usize) -> ScanProgress {
        ScanProgress {
            phase,
            root_index: index,
            root_total: total,
            current_label: "common".to_string(),
            current_path: None,
            candidates_found: 0,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            progress(ScanPhase::Roots, 3, 21).status_line(),
            "Scanning common... (3/21)"
        );
        assert_eq!(
            progress(ScanPhase::Inventory, 0, 21).status_line(),
            "Checking installed software..."
        );
    }

    #[test]
    fn test_fraction() {
        assert_eq!(progress(ScanPhase::Roots, 1, 4).fraction(), 0.25);
        assert_eq!(progress(ScanPhase::Roots, 0, 0).fraction(), 1.0);
    }
}
