//! Platform software-inventory providers.
//!
//! An inventory provider lists installed applications as
//! (name, install directory) records. The scanner then looks for a
//! qualifying executable inside each directory. Providers are optional:
//! the default [`NoInventory`] contributes nothing, and any failure a
//! provider reports is treated the same way.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use gameshelf_core::{GameEntry, ScanWarning, WarningKind};

use crate::walk::Traversal;

/// An installed application reported by an inventory source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    /// Display name reported by the source.
    pub name: String,
    /// Installation directory.
    pub install_dir: PathBuf,
}

impl InventoryRecord {
    /// Create a new record.
    pub fn new(name: impl Into<String>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            install_dir: install_dir.into(),
        }
    }
}

/// Errors an inventory source can report.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The platform facility does not exist here.
    #[error("{source_name} inventory is not available")]
    Unavailable { source_name: &'static str },

    /// The inventory could not be read.
    #[error("Failed to read {source_name} inventory at {path}: {source}")]
    Io {
        source_name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of installed-application records.
pub trait InventoryProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// List installed applications.
    fn installed(&self) -> Result<Vec<InventoryRecord>, InventoryError>;
}

/// Provider for platforms without an inventory facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInventory;

impl InventoryProvider for NoInventory {
    fn name(&self) -> &'static str {
        "none"
    }

    fn installed(&self) -> Result<Vec<InventoryRecord>, InventoryError> {
        Ok(Vec::new())
    }
}

/// Steam library inventory: every folder under `steamapps/common`.
#[derive(Debug, Clone, Default)]
pub struct SteamInventory {
    base_dir: Option<PathBuf>,
}

impl SteamInventory {
    /// Locate the Steam installation when queried.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed Steam installation directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

impl InventoryProvider for SteamInventory {
    fn name(&self) -> &'static str {
        "steam"
    }

    fn installed(&self) -> Result<Vec<InventoryRecord>, InventoryError> {
        let base = self
            .base_dir
            .clone()
            .or_else(steam_base_dir)
            .ok_or(InventoryError::Unavailable { source_name: "steam" })?;
        let common = base.join("steamapps").join("common");

        let io_err = |source| InventoryError::Io {
            source_name: "steam",
            path: common.clone(),
            source,
        };
        let mut records: Vec<InventoryRecord> = fs::read_dir(&common)
            .map_err(io_err)?
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .map(|e| InventoryRecord::new(e.file_name().to_string_lossy(), e.path()))
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}

/// Resolve inventory records to candidates.
///
/// Each record contributes the first qualifying executable directly inside
/// its install directory, named after the record. Records without one are
/// skipped; a provider failure yields no candidates and one warning.
pub fn resolve_inventory(
    provider: &dyn InventoryProvider,
    traversal: &Traversal<'_>,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<GameEntry> {
    let records = match provider.installed() {
        Ok(records) => records,
        Err(err) => {
            tracing::debug!(provider = provider.name(), error = %err, "inventory unavailable");
            warnings.push(ScanWarning::new(
                PathBuf::new(),
                err.to_string(),
                WarningKind::InventoryUnavailable,
            ));
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| {
            let exe = traversal.first_executable(&record.install_dir)?;
            Some(GameEntry::new(record.name, exe))
        })
        .collect()
}

#[cfg(windows)]
fn steam_base_dir() -> Option<PathBuf> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    [r"SOFTWARE\Wow6432Node\Valve\Steam", r"SOFTWARE\Valve\Steam"]
        .into_iter()
        .find_map(|subkey| {
            let key = hklm.open_subkey(subkey).ok()?;
            let install_path: String = key.get_value("InstallPath").ok()?;
            Some(PathBuf::from(install_path))
        })
}

#[cfg(not(windows))]
fn steam_base_dir() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    [
        home.join(".steam").join("steam"),
        home.join(".local").join("share").join("Steam"),
        home.join(".var/app/com.valvesoftware.Steam/.steam/steam"),
    ]
    .into_iter()
    .find(|dir| dir.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameshelf_core::Classifier;
    use tempfile::TempDir;

    struct Failing;

    impl InventoryProvider for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn installed(&self) -> Result<Vec<InventoryRecord>, InventoryError> {
            Err(InventoryError::Unavailable { source_name: "failing" })
        }
    }

    #[test]
    fn test_no_inventory_is_empty() {
        assert!(NoInventory.installed().unwrap().is_empty());
    }

    #[test]
    fn test_steam_inventory_lists_common() {
        let temp = TempDir::new().unwrap();
        let common = temp.path().join("steamapps/common");
        fs::create_dir_all(common.join("Portal 2")).unwrap();
        fs::create_dir_all(common.join("Celeste")).unwrap();
        fs::write(common.join("stray.txt"), b"").unwrap();

        let records = SteamInventory::with_base_dir(temp.path()).installed().unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Celeste", "Portal 2"]);
    }

    #[test]
    fn test_steam_inventory_missing_library() {
        let temp = TempDir::new().unwrap();
        let result = SteamInventory::with_base_dir(temp.path()).installed();
        assert!(matches!(result, Err(InventoryError::Io { .. })));
    }

    #[test]
    fn test_resolve_skips_records_without_executable() {
        let temp = TempDir::new().unwrap();
        let common = temp.path().join("steamapps/common");
        fs::create_dir_all(common.join("Celeste")).unwrap();
        fs::write(common.join("Celeste/Celeste.exe"), b"MZ").unwrap();
        fs::create_dir_all(common.join("Empty")).unwrap();

        let classifier = Classifier::default();
        let traversal = Traversal::new(&classifier, 2);
        let mut warnings = Vec::new();
        let provider = SteamInventory::with_base_dir(temp.path());
        let found = resolve_inventory(&provider, &traversal, &mut warnings);

        assert_eq!(found, vec![GameEntry::new("Celeste", common.join("Celeste/Celeste.exe"))]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_resolve_degrades_to_empty() {
        let classifier = Classifier::default();
        let traversal = Traversal::new(&classifier, 2);
        let mut warnings = Vec::new();
        let found = resolve_inventory(&Failing, &traversal, &mut warnings);

        assert!(found.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::InventoryUnavailable);
    }
}
