use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::codec::{deserialize, serialize, Codec};
use crate::error::PersistenceError;
use crate::Record;

/// Write `records` to `path`, replacing any previous artifact.
///
/// The text goes to a sibling temp file first and is renamed into place, so a
/// reader never sees a half-written artifact.
pub fn save_to_file<R: Record>(
    path: &Path,
    records: &[R],
    codec: Codec,
) -> Result<(), PersistenceError> {
    let text = serialize(records, codec)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, text).map_err(|e| PersistenceError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistenceError::io(path, e))?;

    info!(
        collection = R::COLLECTION,
        count = records.len(),
        path = %path.display(),
        "records saved"
    );
    Ok(())
}

/// Read the records stored at `path`. A missing file yields an empty sequence.
pub fn load_from_file<R: Record>(path: &Path, codec: Codec) -> Result<Vec<R>, PersistenceError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(
                collection = R::COLLECTION,
                path = %path.display(),
                "no persisted records, starting empty"
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(PersistenceError::io(path, e)),
    };

    let records = deserialize(&text, codec)?;
    info!(
        collection = R::COLLECTION,
        count = records.len(),
        path = %path.display(),
        "records loaded"
    );
    Ok(records)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
