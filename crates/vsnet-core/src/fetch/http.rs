//! Static tree behind a web server, fetched with libcurl.

use std::str;
use std::time::Duration;

use url::Url;

use super::{FetchFault, FetchResponse, Fetcher};
use crate::address::ConcretePath;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl HttpFetcher {
    /// `base` is the URL the tree root is served at, e.g.
    /// `http://localhost:8080/sites/`. A missing trailing slash is added.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        })
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Full URL for a concrete path.
    pub fn url_for(&self, path: &ConcretePath) -> Result<Url, FetchFault> {
        self.base
            .join(path.as_str())
            .map_err(|e| FetchFault::InvalidUrl {
                path: path.to_string(),
                detail: e.to_string(),
            })
    }
}

impl Fetcher for HttpFetcher {
    /// Any HTTP status is a response; only transport failures are faults.
    /// Runs in the current thread; call from `spawn_blocking` in async code.
    fn fetch(&self, path: &ConcretePath) -> Result<FetchResponse, FetchFault> {
        let url = self.url_for(path)?;
        let transport = |e: curl::Error| FetchFault::Transport {
            url: url.to_string(),
            detail: e.to_string(),
        };

        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).map_err(transport)?;
        easy.get(true).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.max_redirections(10).map_err(transport)?;
        easy.connect_timeout(self.connect_timeout).map_err(transport)?;
        easy.timeout(self.timeout).map_err(transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        let line = s.trim_end();
                        // a redirect starts a new header block
                        if line.starts_with("HTTP/") {
                            headers.clear();
                        }
                        headers.push(line.to_string());
                    }
                    true
                })
                .map_err(transport)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let status = easy.response_code().map_err(transport)?;
        tracing::debug!(%url, status, bytes = body.len(), "fetched");
        Ok(FetchResponse {
            status,
            body,
            content_type: content_type(&headers),
        })
    }

    fn describe(&self) -> String {
        format!("url {}", self.base)
    }
}

fn content_type(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case("content-type")
            .then(|| value.trim().to_string())
    })
}
