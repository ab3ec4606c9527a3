//! `.sbf` file helpers
//!
//! Saves go through write-fsync-rename, so a crash mid-save leaves either
//! the old file or the new one, never a torn envelope.

use crate::serializer::Serializer;
use sbf_core::{Result, Value};
use sbf_format::Envelope;
use sbf_mapper::Mappable;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let temp = temp_path(path);
    if let Err(e) = replace_with_temp(&temp, path, write) {
        let _ = std::fs::remove_file(&temp);
        return Err(e);
    }

    #[cfg(unix)]
    {
        if let Some(parent) = path.parent().filter(|p| p.exists()) {
            File::open(parent)?.sync_all()?;
        }
    }

    debug!(target: "sbf::envelope", path = %path.display(), "Saved file");
    Ok(())
}

/// Write, flush and fsync `temp`, then rename it over `path`.
/// The caller removes `temp` when any step fails.
fn replace_with_temp<F>(temp: &Path, path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(temp)?;

    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(temp, path)?;
    Ok(())
}

impl Serializer {
    /// Serialize `record` into the file at `path`, replacing it
    pub fn save<T: Mappable>(&self, path: impl AsRef<Path>, record: &T, compress: bool) -> Result<()> {
        write_atomic(path.as_ref(), |writer| self.write(writer, record, compress))
    }

    /// Deserialize a `T` from the file at `path`
    pub fn load<T: Mappable>(&self, path: impl AsRef<Path>) -> Result<T> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }
}

/// Save a record to `path` with the default configuration.
pub fn save<T: Mappable>(path: impl AsRef<Path>, record: &T, compress: bool) -> Result<()> {
    Serializer::default().save(path, record, compress)
}

/// Load a record from `path` with the default configuration.
pub fn load<T: Mappable>(path: impl AsRef<Path>) -> Result<T> {
    Serializer::default().load(path)
}

/// Save a native value to `path`, bypassing the mapper.
pub fn save_raw(path: impl AsRef<Path>, value: &Value, compress: bool) -> Result<()> {
    let envelope = Envelope::default();
    write_atomic(path.as_ref(), |writer| envelope.write(writer, value, compress))
}

/// Load a native value from `path`, bypassing the mapper.
pub fn load_raw(path: impl AsRef<Path>) -> Result<Value> {
    let file = File::open(path.as_ref())?;
    Envelope::default().read(BufReader::new(file))
}
