//! Load pipeline: address → locator → concrete path → fetch → rewrite.
//!
//! Parsing and rewriting are synchronous; the fetch runs on the blocking
//! pool because both fetchers do blocking I/O.

mod error;

pub use error::LoadError;

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;

use crate::address::{ConcretePath, Resolver};
use crate::fetch::{is_html_type, FetchResponse, Fetcher};
use crate::rewrite::{RewriteContext, Rewriter};
use crate::search::SearchSite;

/// A loaded document.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Address as requested (trimmed).
    pub address: String,
    pub storage_path: ConcretePath,
    pub content_type: Option<String>,
    /// True if the content is HTML and was rewritten.
    pub html: bool,
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl Page {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

pub struct Navigator {
    fetcher: Arc<dyn Fetcher>,
    rewriter: Rewriter,
    search: Option<SearchSite>,
}

impl Navigator {
    pub fn new(fetcher: Arc<dyn Fetcher>, rewriter: Rewriter) -> Self {
        Self {
            fetcher,
            rewriter,
            search: None,
        }
    }

    /// Serve `site`'s search route dynamically.
    pub fn with_search(mut self, site: SearchSite) -> Self {
        self.search = Some(site);
        self
    }

    pub fn resolver(&self) -> &Resolver {
        self.rewriter.resolver()
    }

    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    pub fn fetcher(&self) -> &Arc<dyn Fetcher> {
        &self.fetcher
    }

    /// Loads `address`. An invalid address never reaches the fetcher; non-2xx
    /// responses and transport failures are `NotFound`.
    pub async fn load(&self, address: &str) -> Result<Page, LoadError> {
        let address = address.trim();
        let (locator, storage_path) = match self.resolver().resolve(address) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::info!(address, reason = e.reason(), "rejected address");
                return Err(e.into());
            }
        };

        let search = self
            .search
            .as_ref()
            .and_then(|site| site.request_for(&locator).map(|req| (site.clone(), req)));

        let (content, content_type) = match search {
            Some((site, request)) => {
                let html = self
                    .run_blocking(&storage_path, move |fetcher| {
                        site.serve(fetcher.as_ref(), &request)
                    })
                    .await?;
                (html.into_bytes(), Some("text/html; charset=utf-8".to_string()))
            }
            None => {
                let response = self.fetch(&storage_path).await?;
                (response.body, response.content_type)
            }
        };

        let html = match content_type.as_deref() {
            Some(ct) => is_html_type(ct),
            None => matches!(storage_path.extension().as_deref(), Some("html" | "htm")),
        };
        let content = if html {
            let ctx = RewriteContext::new(address).with_fragment(locator.fragment.clone());
            self.rewriter
                .rewrite(&String::from_utf8_lossy(&content), &ctx)
                .into_bytes()
        } else {
            content
        };

        tracing::info!(
            address,
            path = %storage_path,
            html,
            bytes = content.len(),
            "loaded"
        );
        Ok(Page {
            address: address.to_string(),
            storage_path,
            content_type,
            html,
            content,
        })
    }

    async fn fetch(&self, path: &ConcretePath) -> Result<FetchResponse, LoadError> {
        let target = path.clone();
        let result = self
            .run_blocking(path, move |fetcher| fetcher.fetch(&target))
            .await?;
        match result {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => {
                tracing::info!(path = %path, status = response.status, "not found");
                Err(LoadError::NotFound {
                    path: path.to_string(),
                    status: Some(response.status),
                    detail: None,
                })
            }
            Err(fault) => {
                tracing::warn!(path = %path, source = %self.fetcher.describe(), error = %fault, "fetch failed");
                Err(LoadError::NotFound {
                    path: path.to_string(),
                    status: None,
                    detail: Some(fault.to_string()),
                })
            }
        }
    }

    async fn run_blocking<T, F>(&self, path: &ConcretePath, f: F) -> Result<T, LoadError>
    where
        F: FnOnce(Arc<dyn Fetcher>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::task::spawn_blocking(move || f(fetcher))
            .await
            .map_err(|e| {
                tracing::error!(path = %path, error = %e, "fetch task failed");
                LoadError::Fault {
                    path: path.to_string(),
                    detail: e.to_string(),
                }
            })
    }
}
