//! Static tree on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{mime_for_extension, FetchFault, FetchResponse, Fetcher};
use crate::address::ConcretePath;

#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fetcher for FsFetcher {
    /// Missing files and directories are a 404 response, not a fault.
    fn fetch(&self, path: &ConcretePath) -> Result<FetchResponse, FetchFault> {
        let full = path.under(&self.root);
        match std::fs::metadata(&full) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(FetchResponse::not_found()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FetchResponse::not_found()),
            Err(e) => {
                return Err(FetchFault::Io {
                    path: full.display().to_string(),
                    source: e,
                })
            }
        }

        let body = std::fs::read(&full).map_err(|e| FetchFault::Io {
            path: full.display().to_string(),
            source: e,
        })?;
        let content_type = path.extension().map(|ext| mime_for_extension(&ext).to_string());
        Ok(FetchResponse::ok(body, content_type))
    }

    fn describe(&self) -> String {
        format!("dir {}", self.root.display())
    }
}
