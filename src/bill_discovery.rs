use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bill_filename::parse_bill_filename;
use crate::processed_ledger::{ProcessedFileKey, ProcessedFileLedger};

/// One not-yet-processed candidate file, the freshest export seen for its
/// bill id.
#[derive(Debug, Clone)]
pub struct BillCandidate {
    pub path: PathBuf,
    pub key: ProcessedFileKey,
    pub bill_id: String,
    pub box_count: u32,
}

/// Scans one day folder for bill files.
///
/// Non-bill names are skipped silently; files whose `(path, mtime)` key is
/// already in the ledger were merged on an earlier run and are skipped too.
/// When several exports share a bill id only the one with the greatest
/// modification time survives (a bill may be re-exported after a
/// correction). Candidates keep the order in which their bill id was first
/// seen. Ties on modification time go to the file encountered later in
/// directory order, which is platform dependent.
///
/// Superseded older exports are not ledgered here; one left on disk after
/// the freshest export was merged becomes the sole candidate on a later run
/// and merges as a duplicate row. A re-export is expected to replace its
/// predecessor file.
pub fn discover_bills(
    folder: &Path,
    ledger: &ProcessedFileLedger,
) -> Result<Vec<BillCandidate>, String> {
    let mut candidates: Vec<BillCandidate> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    let entries = fs::read_dir(folder)
        .map_err(|e| format!("failed to list bill folder {}: {e}", folder.display()))?;
    for entry in entries {
        let entry = entry
            .map_err(|e| format!("failed to list bill folder {}: {e}", folder.display()))?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some((bill_id, box_count)) = parse_bill_filename(&file_name) else {
            continue;
        };

        let path = entry.path();
        let key = ProcessedFileKey::for_file(&path)?;
        if ledger.contains(&key) {
            continue;
        }

        let candidate = BillCandidate {
            path,
            key,
            bill_id: bill_id.clone(),
            box_count,
        };
        match index_by_id.get(&bill_id) {
            Some(&i) if candidates[i].key.modified_ms() > candidate.key.modified_ms() => {}
            Some(&i) => candidates[i] = candidate,
            None => {
                index_by_id.insert(bill_id, candidates.len());
                candidates.push(candidate);
            }
        }
    }
    Ok(candidates)
}
