// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::error::StoreError;
use crate::store::SeriesStore;

/// Load the store file. A missing file is an empty store.
pub fn load_store(path: &Path) -> Result<SeriesStore, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logd!("Store: {} missing, starting empty", path.display());
            return Ok(SeriesStore::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    SeriesStore::from_json(&text).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the store file. Readers see either the old or the new file.
pub fn save_store(path: &Path, store: &SeriesStore) -> Result<(), StoreError> {
    let json = store.to_json()?;
    write_atomic(path, json.as_bytes())?;
    logd!("Store: saved {} series → {}", store.len(), path.display());
    Ok(())
}

/// Write `contents` to `dir/filename`, replacing any earlier file.
pub fn save_report(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf, StoreError> {
    let path = dir.join(filename);
    write_atomic(&path, contents.as_bytes())?;
    Ok(path)
}

/// Write to a sibling temp file, then rename over the target.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let tmp = sibling_path(path, ".tmp");
    let write = || -> io::Result<()> {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(contents)?;
        f.sync_all()
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::io(&tmp, e));
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, e)
    })
}

/// Move an unreadable store file aside to `<name>.corrupt`, replacing any
/// earlier backup. `None` if there was nothing to move.
pub fn backup_corrupt(path: &Path) -> Result<Option<PathBuf>, StoreError> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = sibling_path(path, ".corrupt");
    fs::rename(path, &backup).map_err(|e| StoreError::io(path, e))?;
    logw!("Store: moved unreadable {} to {}", path.display(), backup.display());
    Ok(Some(backup))
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

pub fn ensure_directory(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() && !dir.is_dir() {
        return Err(StoreError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    }
    Ok(())
}
