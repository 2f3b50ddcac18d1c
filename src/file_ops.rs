use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;
use crate::errors::CertError;
use crate::hashers;

/// BLAKE3 digest of the file at path using streaming read.
pub fn compute_file_hash(path: &Path) -> Result<String, CertError> {
    let f = File::open(path).map_err(|e| CertError::io(path, e))?;
    let reader = BufReader::new(f);
    hashers::compute_hash_for_reader(reader).map_err(|e| CertError::io(path, e))
}

/// Pretty JSON (2-space indent, non-ASCII kept literal) written to a sibling
/// temp file and renamed over `path`. The old content survives any failure.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CertError> {
    let body = serde_json::to_string_pretty(value).map_err(|e| CertError::json(path, e))?;
    let tmp = temp_path_for(path);
    debug!(target = %path.display(), tmp = %tmp.display(), bytes = body.len(), "writing json");

    let written = write_and_sync(&tmp, body.as_bytes()).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(CertError::io(path, e));
    }
    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("data.json");
    let tmp_name = format!(".{}.{}.tmp", name, Uuid::new_v4());
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(tmp_name),
        _ => PathBuf::from(tmp_name),
    }
}
