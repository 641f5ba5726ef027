//! Directory loading with a last-good cache.
//!
//! A successful load rewrites the cache file with the document text. When
//! the source later fails to read or parse, the cache is used instead so
//! the user still sees the last directory that worked.

use bsn_core::error::DocumentError;
use bsn_core::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the cached document inside the state directory.
pub const CACHE_FILE: &str = "directory-cache.json";

/// Read and parse a directory document.
pub fn load_directory(path: &Path) -> Result<Directory> {
    let text = read_document(path)?;
    Directory::from_json_str(&text)
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BsnError::document_not_found(path.display().to_string()),
        _ => BsnError::Io(e),
    })
}

/// A directory document with an optional fallback copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    pub path: PathBuf,
    pub cache_path: Option<PathBuf>,
}

impl DirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache_path: None,
        }
    }

    pub fn with_cache(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(cache_path.into());
        self
    }

    /// Load the document, falling back to the cache on failure.
    ///
    /// Returns [`DocumentError::Unavailable`] when both fail.
    pub fn load(&self) -> Result<Directory> {
        let loaded = read_document(&self.path)
            .and_then(|text| Directory::from_json_str(&text).map(|dir| (dir, text)));

        match loaded {
            Ok((directory, text)) => {
                info!(
                    path = %self.path.display(),
                    accounts = directory.len(),
                    "loaded directory"
                );
                if let Some(cache) = &self.cache_path {
                    if let Err(e) = write_cache(cache, &text) {
                        warn!(cache = %cache.display(), error = %e, "could not update directory cache");
                    }
                }
                Ok(directory)
            }
            Err(err) => self.fall_back(err),
        }
    }

    fn fall_back(&self, err: BsnError) -> Result<Directory> {
        let Some(cache) = &self.cache_path else {
            return Err(err);
        };
        if !err.is_recoverable() {
            return Err(err);
        }

        warn!(
            path = %self.path.display(),
            cache = %cache.display(),
            error = %err,
            "directory source failed, using cached copy"
        );
        load_directory(cache).map_err(|cache_err| {
            DocumentError::Unavailable {
                source_error: err.to_string(),
                cache_error: cache_err.to_string(),
            }
            .into()
        })
    }
}

fn write_cache(cache: &Path, text: &str) -> Result<()> {
    if let Some(parent) = cache.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(cache, text)?;
    Ok(())
}
