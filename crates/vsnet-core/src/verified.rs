//! List of verified sandbox sites.
//!
//! Plain text, one site per line (`mail.vs` or `mail`), `#` starts a
//! comment line. The list only decorates search results, so a missing or
//! unreadable file degrades to an empty list.

use std::collections::BTreeSet;

use crate::address::{ConcretePath, VS_SUFFIX};
use crate::fetch::Fetcher;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifiedList {
    sites: BTreeSet<String>,
}

impl VerifiedList {
    pub fn parse(text: &str) -> Self {
        let sites = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(normalize)
            .filter(|s| !s.is_empty())
            .collect();
        Self { sites }
    }

    /// Fetches and parses the list at `path`; failures are logged and yield
    /// an empty list.
    pub fn load(fetcher: &dyn Fetcher, path: &ConcretePath) -> Self {
        match fetcher.fetch(path) {
            Ok(r) if r.is_success() => Self::parse(&String::from_utf8_lossy(&r.body)),
            Ok(r) => {
                tracing::warn!(%path, status = r.status, "verified list unavailable; using empty list");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(%path, error = %e, "verified list unavailable; using empty list");
                Self::default()
            }
        }
    }

    /// True if `site` (with or without the `.vs` suffix) is listed.
    pub fn contains(&self, site: &str) -> bool {
        self.sites.contains(&normalize(site))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sites.iter().map(String::as_str)
    }
}

fn normalize(site: &str) -> String {
    let s = site.trim().to_lowercase();
    s.strip_suffix(VS_SUFFIX).map(str::to_string).unwrap_or(s)
}
