//! On-disk cache of the last acquired credential.
//!
//! The cache file holds a single entry keyed by a digest of
//! `(keycloak url, realm, username)`. Every store replaces the whole file, so
//! only the most recently cached identity is ever found.
//!
//! The cache is an optimization: [`CredentialCache::store`] and
//! [`CredentialCache::lookup`] never fail, errors are logged and reported as a
//! miss. The `try_*` variants expose the underlying error for callers that
//! want it.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::Credential;

/// File name of the cache inside the config folder
pub const CACHE_FILE_NAME: &str = "saved-user.json";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cache file {path} is malformed: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
    #[serde(default)]
    cached_data: Option<HashMap<String, Credential>>,
}

/// Derive the cache key for an identity.
///
/// This is an index, not a secret: the md5 digest only keeps the raw username
/// out of the file structure.
pub fn derive_key(service_url: &str, realm: &str, username: &str) -> String {
    let digest = Md5::digest(format!("{service_url}:{realm}:{username}"));
    hex::encode(digest)
}

#[derive(Debug, Clone)]
pub struct CredentialCache {
    path: PathBuf,
}

impl CredentialCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache stored as `saved-user.json` inside `folder`
    pub fn in_folder(folder: &Path) -> Self {
        Self::new(folder.join(CACHE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `credential`, replacing any previous cache content.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn store(&self, service_url: &str, realm: &str, username: &str, credential: &Credential) {
        if let Err(err) = self.try_store(service_url, realm, username, credential) {
            warn!("Failed to cache credential: {err}");
        }
    }

    /// Look up a cached credential, treating any failure as a miss
    pub fn lookup(&self, service_url: &str, realm: &str, username: &str) -> Option<Credential> {
        self.try_lookup(service_url, realm, username)
            .unwrap_or_else(|err| {
                warn!("Ignoring credential cache: {err}");
                None
            })
    }

    pub fn try_store(
        &self,
        service_url: &str,
        realm: &str,
        username: &str,
        credential: &Credential,
    ) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                debug!("Creating config folder {}", parent.display());
                fs::create_dir_all(parent).map_err(|source| self.io(source))?;
            }
        }

        debug!("Writing credential to cache file {}", self.path.display());

        let key = derive_key(service_url, realm, username);
        let file = CacheFile {
            cached_data: Some(HashMap::from([(key, credential.clone())])),
        };
        let json = serde_json::to_vec(&file).map_err(|source| CacheError::Format {
            path: self.path.clone(),
            source,
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut out = options.open(&self.path).map_err(|source| self.io(source))?;
        out.write_all(&json).map_err(|source| self.io(source))?;

        self.restrict_permissions()
    }

    pub fn try_lookup(
        &self,
        service_url: &str,
        realm: &str,
        username: &str,
    ) -> Result<Option<Credential>, CacheError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read(&self.path).map_err(|source| self.io(source))?;
        let file: CacheFile =
            serde_json::from_slice(&content).map_err(|source| CacheError::Format {
                path: self.path.clone(),
                source,
            })?;

        let key = derive_key(service_url, realm, username);
        Ok(file.cached_data.and_then(|mut data| data.remove(&key)))
    }

    /// A pre-existing file keeps its mode on truncate, so tighten it explicitly
    #[cfg(unix)]
    fn restrict_permissions(&self) -> Result<(), CacheError> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
            .map_err(|source| self.io(source))
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
