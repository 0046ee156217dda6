//! File I/O utilities with atomic writes
//!
//! Ledger and settings files are read whole and written through a temp file
//! plus rename, so a failed save never leaves a half-written file behind.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Read a whole text file, failing with `NotFound` if it does not exist
pub fn read_text_required<P: AsRef<Path>>(path: P) -> TrackerResult<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TrackerError::file_not_found(path.display().to_string()));
    }

    let mut file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| TrackerError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

    Ok(contents)
}

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> TrackerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let contents = read_text_required(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| TrackerError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a file atomically (write to temp, then rename)
///
/// `fill` receives a buffered writer for the temp file. The target is only
/// replaced once `fill` succeeded and the data was synced to disk.
pub fn write_atomic<P, F>(path: P, fill: F) -> TrackerResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> TrackerResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let result = (|| {
        let file = File::create(temp_path)
            .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        fill(&mut writer)?;

        writer
            .flush()
            .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(temp_path, path)
            .map_err(|e| TrackerError::Storage(format!("Failed to rename temp file: {}", e)))
    })();

    if result.is_err() {
        let _ = fs::remove_file(temp_path);
    }
    result
}

/// Append one line to a text file, creating the file if needed
///
/// A newline is inserted first when the existing file does not end with one.
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> TrackerResult<()> {
    let path = path.as_ref();
    let storage_err = |e: std::io::Error| {
        TrackerError::Storage(format!("Failed to append to {}: {}", path.display(), e))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(storage_err)?;
    }

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(storage_err)?;

    let len = file.metadata().map_err(storage_err)?.len();
    if len > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1)).map_err(storage_err)?;
        file.read_exact(&mut last).map_err(storage_err)?;
        if last[0] != b'\n' {
            file.write_all(b"\n").map_err(storage_err)?;
        }
    }

    writeln!(file, "{}", line).map_err(storage_err)?;
    file.sync_all().map_err(storage_err)
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> TrackerResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| TrackerError::Storage(format!("Failed to serialize data: {}", e)))
    })
}
