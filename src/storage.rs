use crate::errors::CertError;
use crate::file_ops;
use crate::models::Certificate;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DB_FILE: &str = "certificates_verification_data.json";

/// Outcome of [`upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// The certificate list persisted as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct CertificateStore {
    path: PathBuf,
}

impl Default for CertificateStore {
    fn default() -> Self {
        CertificateStore::new(DB_FILE)
    }
}

impl CertificateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CertificateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<Vec<Certificate>>, CertError> {
        let s = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file absent");
                return Ok(None);
            }
            Err(e) => return Err(CertError::io(&self.path, e)),
        };
        let certs: Vec<Certificate> =
            serde_json::from_str(&s).map_err(|e| CertError::json(&self.path, e))?;
        debug!(path = %self.path.display(), count = certs.len(), "store loaded");
        Ok(Some(certs))
    }

    pub fn load_all(&self) -> Result<Vec<Certificate>, CertError> {
        Ok(self.load()?.unwrap_or_default())
    }

    pub fn save_all(&self, certs: &[Certificate]) -> Result<(), CertError> {
        file_ops::write_json_atomic(&self.path, certs)?;
        debug!(path = %self.path.display(), count = certs.len(), "store saved");
        Ok(())
    }
}

/// Exact (case-sensitive) id match, used for the duplicate check on add.
pub fn find_exact<'a>(certs: &'a [Certificate], cert_id: &str) -> Option<&'a Certificate> {
    certs.iter().find(|c| c.cert_id == cert_id)
}

/// Case-insensitive lookup, first match wins.
pub fn search<'a>(certs: &'a [Certificate], cert_id: &str) -> Option<&'a Certificate> {
    certs.iter().find(|c| c.matches_id(cert_id))
}

/// Drops any record with the same `Cert_ID` and appends `cert`, so an
/// update moves the record to the end.
pub fn upsert(certs: &mut Vec<Certificate>, cert: Certificate) -> Upsert {
    let before = certs.len();
    certs.retain(|c| c.cert_id != cert.cert_id);
    let outcome = if certs.len() < before { Upsert::Replaced } else { Upsert::Inserted };
    certs.push(cert);
    outcome
}
