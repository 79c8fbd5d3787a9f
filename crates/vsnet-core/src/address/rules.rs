//! Updomain / downdomain allow-lists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::parse::is_site_name;

/// Routing policy consulted by the parser.
///
/// `updomains` lists first-level path segments that get their own
/// `<name>.updomain/` folder. `downdomains`, when non-empty, restricts which
/// `sub.site.vs` names are accepted; an empty set accepts any subdomain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRules {
    #[serde(default)]
    updomains: BTreeSet<String>,
    #[serde(default)]
    downdomains: BTreeSet<String>,
}

impl RoutingRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_updomains<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::default();
        for name in names {
            rules.add_updomain(name.as_ref());
        }
        rules
    }

    /// Adds an updomain. Returns false if the name is invalid or already present.
    pub fn add_updomain(&mut self, name: &str) -> bool {
        match normalize_name(name) {
            Some(n) => self.updomains.insert(n),
            None => false,
        }
    }

    pub fn remove_updomain(&mut self, name: &str) -> bool {
        normalize_name(name).is_some_and(|n| self.updomains.remove(&n))
    }

    pub fn is_updomain(&self, segment: &str) -> bool {
        self.updomains.contains(segment)
    }

    pub fn updomains(&self) -> impl Iterator<Item = &str> {
        self.updomains.iter().map(String::as_str)
    }

    pub fn add_downdomain(&mut self, name: &str) -> bool {
        match normalize_name(name) {
            Some(n) => self.downdomains.insert(n),
            None => false,
        }
    }

    pub fn remove_downdomain(&mut self, name: &str) -> bool {
        normalize_name(name).is_some_and(|n| self.downdomains.remove(&n))
    }

    /// True if `name` may be used as a downdomain under these rules.
    pub fn accepts_downdomain(&self, name: &str) -> bool {
        self.downdomains.is_empty() || self.downdomains.contains(name)
    }

    pub fn downdomains(&self) -> impl Iterator<Item = &str> {
        self.downdomains.iter().map(String::as_str)
    }
}

/// Lower-cased name, or `None` if it is not a valid site label.
pub fn normalize_name(name: &str) -> Option<String> {
    let n = name.trim().trim_matches('/').to_lowercase();
    is_site_name(&n).then_some(n)
}
