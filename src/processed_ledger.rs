use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

pub const DEFAULT_LEDGER_FILE: &str = "processed_files_record.json";

/// Identity of one source bill file: its path plus the modification time in
/// unix milliseconds. Re-reading an unchanged file produces the same key;
/// editing the file changes the key and makes it eligible for reprocessing.
///
/// Serializes as a two-element array `[path, mtime_ms]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessedFileKey(pub String, pub i64);

impl ProcessedFileKey {
    pub fn for_file(path: &Path) -> Result<Self, String> {
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| {
                format!(
                    "failed to read modification time of {}: {e}",
                    path.display()
                )
            })?;
        let millis = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Ok(Self(path.to_string_lossy().to_string(), millis))
    }

    pub fn modified_ms(&self) -> i64 {
        self.1
    }
}

/// Durable record of which bill files have already been merged. Loaded once
/// per run, mutated in memory as files are attempted, rewritten whole on
/// save. Entries are never removed automatically.
#[derive(Debug)]
pub struct ProcessedFileLedger {
    store_path: PathBuf,
    entries: HashSet<ProcessedFileKey>,
}

impl ProcessedFileLedger {
    /// Reads the store, creating an empty one if it does not exist yet.
    pub fn load(store_path: impl Into<PathBuf>) -> Result<Self, String> {
        let store_path = store_path.into();
        if !store_path.exists() {
            fs::write(&store_path, "[]")
                .map_err(|e| format!("failed to create ledger {}: {e}", store_path.display()))?;
            return Ok(Self {
                store_path,
                entries: HashSet::new(),
            });
        }
        let raw = fs::read_to_string(&store_path)
            .map_err(|e| format!("failed to read ledger {}: {e}", store_path.display()))?;
        let entries: HashSet<ProcessedFileKey> = serde_json::from_str(&raw)
            .map_err(|e| format!("ledger {} is not a valid record: {e}", store_path.display()))?;
        Ok(Self {
            store_path,
            entries,
        })
    }

    pub fn contains(&self, key: &ProcessedFileKey) -> bool {
        self.entries.contains(key)
    }

    pub fn insert(&mut self, key: ProcessedFileKey) {
        self.entries.insert(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whole-set rewrite of the store file.
    pub fn save(&self) -> Result<(), String> {
        let mut entries: Vec<&ProcessedFileKey> = self.entries.iter().collect();
        entries.sort(); // stable on-disk order across runs
        let json = serde_json::to_string(&entries)
            .map_err(|e| format!("failed to serialize ledger: {e}"))?;
        fs::write(&self.store_path, json)
            .map_err(|e| format!("failed to write ledger {}: {e}", self.store_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use uuid::Uuid;

    fn create_temp_path(prefix: &str, ext: &str) -> PathBuf {
        let unique = format!("{prefix}_{}_{}.{}", std::process::id(), Uuid::new_v4(), ext);
        std::env::temp_dir().join(unique)
    }

    #[test]
    fn missing_store_is_created_empty() {
        let store = create_temp_path("billmerge_ledger_test", "json");
        let ledger = ProcessedFileLedger::load(&store).expect("load fresh ledger");
        assert!(ledger.is_empty());
        assert_eq!(
            fs::read_to_string(&store).expect("store file exists"),
            "[]"
        );
        let _ = fs::remove_file(&store);
    }

    #[test]
    fn entries_survive_save_and_reload() {
        let store = create_temp_path("billmerge_ledger_test", "json");
        let mut ledger = ProcessedFileLedger::load(&store).expect("load fresh ledger");
        let key_a = ProcessedFileKey("/bills/ABC12305.xlsx".to_string(), 1_700_000_000_123);
        let key_b = ProcessedFileKey("/bills/XYZ99901.xlsx".to_string(), 1_700_000_111_456);
        ledger.insert(key_a.clone());
        ledger.insert(key_b.clone());
        ledger.insert(key_a.clone()); // set semantics
        ledger.save().expect("save ledger");

        let reloaded = ProcessedFileLedger::load(&store).expect("reload ledger");
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains(&key_a));
        assert!(reloaded.contains(&key_b));

        // different mtime means a different key
        let edited = ProcessedFileKey(key_a.0.clone(), key_a.1 + 1);
        assert!(!reloaded.contains(&edited));
        let _ = fs::remove_file(&store);
    }

    #[test]
    fn store_format_is_an_array_of_pairs() {
        let store = create_temp_path("billmerge_ledger_test", "json");
        let mut ledger = ProcessedFileLedger::load(&store).expect("load fresh ledger");
        ledger.insert(ProcessedFileKey("/bills/ABC12305.xlsx".to_string(), 42));
        ledger.save().expect("save ledger");

        let raw = fs::read_to_string(&store).expect("read store");
        let value: Value = serde_json::from_str(&raw).expect("valid json");
        let pairs = value.as_array().expect("top-level array");
        assert_eq!(pairs.len(), 1);
        let pair = pairs[0].as_array().expect("pair array");
        assert_eq!(pair[0].as_str(), Some("/bills/ABC12305.xlsx"));
        assert_eq!(pair[1].as_i64(), Some(42));
        let _ = fs::remove_file(&store);
    }
}
