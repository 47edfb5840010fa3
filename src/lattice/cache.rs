use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::index::{LatticeIndex, StateIndex};

const ROW_FILE: &str = "row2index.json";
const COLUMN_FILE: &str = "column2index.json";

/// Working-directory mirror of the two index maps, one JSON object per
/// role, keys encoded as `<position>\t<label>`.
///
/// Index assignment is deterministic, so the mirror is purely additive: a
/// file that matches the freshly built index is left alone, anything
/// stale, partial, or unreadable is rewritten. The cache never feeds back
/// into index construction and cannot perturb results. One cache instance
/// is scoped to one directory and one caller.
pub(super) struct IndexCache {
    dir: PathBuf,
}

impl IndexCache {
    /// Open the cache directory, creating it if needed. A directory that
    /// cannot be created is a configuration error for the caller.
    pub fn open(dir: &Path) -> Result<Self, io::Error> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Bring both role files in line with `index`.
    pub fn sync(&self, index: &LatticeIndex) -> Result<(), io::Error> {
        self.sync_role(ROW_FILE, &index.rows)?;
        self.sync_role(COLUMN_FILE, &index.columns)
    }

    fn sync_role(&self, file: &str, index: &StateIndex) -> Result<(), io::Error> {
        let path = self.dir.join(file);
        let fresh = encode(index);
        match read_map(&path) {
            Some(existing) if existing == fresh => {
                debug!(file, "index cache up to date");
                return Ok(());
            }
            Some(_) => warn!(file, "stale index cache, rewriting"),
            None => {}
        }
        write_map(&path, &fresh)
    }
}

fn encode(index: &StateIndex) -> BTreeMap<String, usize> {
    index
        .iter()
        .map(|(key, idx)| (format!("{}\t{}", key.position, key.label), idx))
        .collect()
}

fn read_map(path: &Path) -> Option<BTreeMap<String, usize>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable index cache, rewriting");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(map) => Some(map),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt index cache, rewriting");
            None
        }
    }
}

/// Atomic write: tmp file in the same directory, then rename.
fn write_map(path: &Path, map: &BTreeMap<String, usize>) -> Result<(), io::Error> {
    let body = serde_json::to_vec(map).map_err(io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &body)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), entries = map.len(), "index cache written");
    Ok(())
}
