//! In-memory station catalog with optional JSON persistence.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{NewStation, Station, StationStore};
use crate::error::{RadiodialError, RadiodialResult};

const STATIONS_FILE: &str = "stations.json";
const STATIONS_TEMP_FILE: &str = "stations.json.tmp";

/// On-disk layout of the catalog.
#[derive(Debug, Serialize, Deserialize, Default)]
struct StationsFile {
    stations: Vec<Station>,
}

#[derive(Debug)]
struct CatalogInner {
    stations: Vec<Station>,
    next_id: i64,
}

/// The station catalog.
///
/// Reads are served from memory. When a data directory is configured every
/// insert is written through to `stations.json` before it becomes visible.
#[derive(Debug)]
pub struct StationCatalog {
    inner: RwLock<CatalogInner>,
    data_dir: Option<PathBuf>,
}

impl StationCatalog {
    /// Creates an empty catalog that lives only in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                stations: Vec::new(),
                next_id: 1,
            }),
            data_dir: None,
        }
    }

    /// Opens the catalog persisted in `data_dir`.
    ///
    /// A missing file yields an empty catalog. An unreadable or corrupt file
    /// is an error: overwriting it on the next insert would lose stations.
    pub fn open(data_dir: &Path) -> RadiodialResult<Self> {
        let path = data_dir.join(STATIONS_FILE);
        let stations = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let file: StationsFile = serde_json::from_str(&contents).map_err(|e| {
                    RadiodialError::Storage(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                file.stations
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(RadiodialError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let next_id = stations.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        log::info!(
            "[Catalog] Loaded {} station(s) from {}",
            stations.len(),
            path.display()
        );

        Ok(Self {
            inner: RwLock::new(CatalogInner { stations, next_id }),
            data_dir: Some(data_dir.to_path_buf()),
        })
    }

    /// Saves the stations to the data directory, if one is configured.
    ///
    /// Uses atomic write (temp file + rename) to prevent corruption on crash.
    fn persist(&self, stations: &[Station]) -> std::io::Result<()> {
        let Some(data_dir) = &self.data_dir else {
            return Ok(());
        };

        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STATIONS_FILE);
        let temp_path = data_dir.join(STATIONS_TEMP_FILE);
        let contents = serde_json::to_string_pretty(&StationsFile {
            stations: stations.to_vec(),
        })?;

        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &path)
    }
}

impl StationStore for StationCatalog {
    fn list(&self) -> Vec<Station> {
        self.inner.read().stations.clone()
    }

    fn get(&self, id: i64) -> Option<Station> {
        self.inner
            .read()
            .stations
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    fn create(&self, new: NewStation) -> RadiodialResult<Station> {
        let mut inner = self.inner.write();

        let station = Station {
            id: inner.next_id,
            name: new.name,
            url: new.url,
            icon: new.icon,
            country: new.country,
        };
        inner.stations.push(station.clone());

        if let Err(e) = self.persist(&inner.stations) {
            inner.stations.pop();
            log::error!("[Catalog] Failed to persist station '{}': {}", station.name, e);
            return Err(RadiodialError::Storage(e.to_string()));
        }

        inner.next_id += 1;
        log::debug!("[Catalog] Created station {} ({})", station.id, station.name);
        Ok(station)
    }

    fn count(&self) -> usize {
        self.inner.read().stations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_station(name: &str) -> NewStation {
        NewStation {
            name: name.to_string(),
            url: format!("http://example.com/{}.mp3", name),
            icon: None,
            country: Some("USA".to_string()),
        }
    }

    #[test]
    fn ids_are_assigned_in_order() {
        let catalog = StationCatalog::in_memory();
        let a = catalog.create(new_station("a")).unwrap();
        let b = catalog.create(new_station("b")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.get(2), Some(b));
        assert_eq!(catalog.get(3), None);
    }

    #[test]
    fn stations_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let catalog = StationCatalog::open(temp_dir.path()).unwrap();
        catalog.create(new_station("a")).unwrap();
        catalog.create(new_station("b")).unwrap();
        drop(catalog);

        let reopened = StationCatalog::open(temp_dir.path()).unwrap();
        let names: Vec<_> = reopened.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "b"]);

        // Ids continue after the highest persisted id
        let c = reopened.create(new_station("c")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn missing_file_opens_empty() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = StationCatalog::open(temp_dir.path()).unwrap();
        assert_eq!(catalog.count(), 0);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(STATIONS_FILE), b"not json").unwrap();
        let result = StationCatalog::open(temp_dir.path());
        assert!(matches!(result, Err(RadiodialError::Storage(_))));
    }

    #[test]
    fn failed_write_rolls_back_insert() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = StationCatalog::open(temp_dir.path()).unwrap();

        // A directory in place of the temp file makes the write fail
        std::fs::create_dir(temp_dir.path().join(STATIONS_TEMP_FILE)).unwrap();

        let result = catalog.create(new_station("a"));
        assert!(matches!(result, Err(RadiodialError::Storage(_))));
        assert_eq!(catalog.count(), 0);

        std::fs::remove_dir(temp_dir.path().join(STATIONS_TEMP_FILE)).unwrap();
        let station = catalog.create(new_station("a")).unwrap();
        assert_eq!(station.id, 1);
    }
}
