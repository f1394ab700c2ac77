//! Whole-file text reads and crash-safe replacement writes

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{FinanceError, FinanceResult};

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> FinanceError {
    FinanceError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Contents of `path`, or `None` when there is no such file
pub fn read_text(path: impl AsRef<Path>) -> FinanceResult<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(storage_error("read", path, e)),
    }
}

/// Replace `path` with `contents`.
///
/// The text goes to a sibling `.tmp` file which is synced and renamed over
/// the target, so readers see either the old or the new contents.
pub fn write_text_atomic(path: impl AsRef<Path>, contents: &str) -> FinanceResult<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create", dir, e))?;
    }

    let tmp = path.with_extension("json.tmp");
    let write = || -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(&tmp)?);
        out.write_all(contents.as_bytes())?;
        out.flush()?;
        out.get_ref().sync_all()
    };
    write().map_err(|e| storage_error("write", &tmp, e))?;

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        storage_error("replace", path, e)
    })
}
