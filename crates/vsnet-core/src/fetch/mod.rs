//! Fetch collaborators.
//!
//! The load pipeline only depends on the [`Fetcher`] trait and does not know
//! whether the static tree lives on disk or behind a web server.

mod fs;
mod http;
mod mime;

pub use fs::FsFetcher;
pub use http::HttpFetcher;
pub use mime::{is_html_type, mime_for_extension};

use thiserror::Error;

use crate::address::ConcretePath;

/// Raw response for one concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status, or 200/404 for filesystem reads.
    pub status: u32,
    pub body: Vec<u8>,
    /// `Content-Type` as reported by the source.
    pub content_type: Option<String>,
}

impl FetchResponse {
    pub fn ok(body: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            status: 200,
            body,
            content_type,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: Vec::new(),
            content_type: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The fetch could not produce any response at all.
#[derive(Debug, Error)]
pub enum FetchFault {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fetch URL for {path}: {detail}")]
    InvalidUrl { path: String, detail: String },
    #[error("GET {url} failed: {detail}")]
    Transport { url: String, detail: String },
}

/// GET-only access to the static site tree.
///
/// Implementations block; async callers run them on the blocking pool.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, path: &ConcretePath) -> Result<FetchResponse, FetchFault>;

    /// Short description for logs.
    fn describe(&self) -> String;
}
