//! Append-only JSONL audit log

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{FinanceError, FinanceResult};

use super::entry::AuditEntry;

/// An audit log file with one JSON entry per line
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file and its directory on first use
    pub fn append(&self, entry: &AuditEntry) -> FinanceResult<()> {
        let line = serde_json::to_string(entry)?;

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| FinanceError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| FinanceError::Io(format!("Failed to open audit log: {}", e)))?;
        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| FinanceError::Io(format!("Failed to append to audit log: {}", e)))
    }

    /// Every entry, oldest first. A missing log is empty.
    pub fn entries(&self) -> FinanceResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn tail(&self, count: usize) -> FinanceResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count);
        self.for_each_entry(|entry| {
            if count == 0 {
                return;
            }
            if window.len() == count {
                window.pop_front();
            }
            window.push_back(entry);
        })?;
        Ok(window.into())
    }

    /// Number of entries in the log
    pub fn len(&self) -> FinanceResult<usize> {
        let Some(reader) = self.open_reader()? else {
            return Ok(0);
        };
        Ok(reader
            .lines()
            .map_while(Result::ok)
            .filter(|line| !line.trim().is_empty())
            .count())
    }

    pub fn is_empty(&self) -> FinanceResult<bool> {
        Ok(self.len()? == 0)
    }

    fn open_reader(&self) -> FinanceResult<Option<BufReader<File>>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FinanceError::Io(format!("Failed to open audit log: {}", e))),
        }
    }

    fn for_each_entry(&self, mut visit: impl FnMut(AuditEntry)) -> FinanceResult<()> {
        let Some(reader) = self.open_reader()? else {
            return Ok(());
        };

        for (index, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|e| FinanceError::Io(format!("Failed to read audit log: {}", e)))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                FinanceError::Json(format!("Bad audit entry on line {}: {}", index + 1, e))
            })?;
            visit(entry);
        }
        Ok(())
    }
}
