use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::address::{Resolver, RoutingRules, DEFAULT_ENTRY_FILE};
use crate::fetch::{Fetcher, FsFetcher, HttpFetcher};
use crate::navigator::Navigator;
use crate::rewrite::{RewriteOptions, Rewriter};
use crate::search::{SearchSite, DEFAULT_SEARCH_ROUTE, DEFAULT_SEARCH_SITE};

/// Search site section (optional in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Site serving the dynamic search route.
    pub site: String,
    /// First path segment of the route (`<site>.vs/<route>/<query>`).
    pub route: String,
    /// Catalog JSON path in the tree; defaults to `<site>/catalog.json`.
    #[serde(default)]
    pub catalog: Option<String>,
    /// Verified list path in the tree; defaults to `<site>/verified.txt`.
    #[serde(default)]
    pub verified_list: Option<String>,
    /// Results page template; defaults to `<site>/results.html`.
    #[serde(default)]
    pub template: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            site: DEFAULT_SEARCH_SITE.to_string(),
            route: DEFAULT_SEARCH_ROUTE.to_string(),
            catalog: None,
            verified_list: None,
            template: None,
        }
    }
}

impl SearchConfig {
    pub fn site(&self) -> SearchSite {
        let mut site = SearchSite::new(self.site.as_str()).with_route(&self.route);
        if let Some(path) = &self.catalog {
            site = site.with_catalog_path(path);
        }
        if let Some(path) = &self.verified_list {
            site = site.with_verified_path(path);
        }
        if let Some(path) = &self.template {
            site = site.with_template_path(path);
        }
        site
    }
}

/// Where the static tree comes from for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    Dir(PathBuf),
    Url(String),
}

/// Global configuration loaded from `~/.config/vsnet/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VsConfig {
    /// Directory holding the static site tree.
    pub sites_root: PathBuf,
    /// Base URL the tree is served at; used instead of `sites_root` when set.
    #[serde(default)]
    pub sites_url: Option<String>,
    /// Public path prefix the host serves the tree under.
    pub public_prefix: String,
    /// Document loaded for directory addresses.
    pub entry_file: String,
    /// First path segments routed to `<name>.updomain/`.
    #[serde(default)]
    pub updomains: Vec<String>,
    /// Accepted downdomains; empty accepts any.
    #[serde(default)]
    pub downdomains: Vec<String>,
    /// Shadow the location surface in rewritten documents.
    pub shadow_location: bool,
    /// Optional search site; if missing, built-in defaults are used.
    #[serde(default)]
    pub search: Option<SearchConfig>,
}

impl Default for VsConfig {
    fn default() -> Self {
        Self {
            sites_root: PathBuf::from("sites"),
            sites_url: None,
            public_prefix: "/sites".to_string(),
            entry_file: DEFAULT_ENTRY_FILE.to_string(),
            updomains: vec!["imagining".to_string()],
            downdomains: Vec::new(),
            shadow_location: true,
            search: None,
        }
    }
}

impl VsConfig {
    pub fn routing_rules(&self) -> RoutingRules {
        let mut rules = RoutingRules::with_updomains(&self.updomains);
        for d in &self.downdomains {
            rules.add_downdomain(d);
        }
        rules
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.routing_rules()).with_entry_file(self.entry_file.clone())
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            public_prefix: self.public_prefix.clone(),
            shadow_location: self.shadow_location,
            ..RewriteOptions::default()
        }
    }

    pub fn search_site(&self) -> SearchSite {
        self.search.clone().unwrap_or_default().site()
    }

    /// Tree source: an explicit override, else `sites_url`, else `sites_root`.
    pub fn tree_source(&self, override_source: Option<TreeSource>) -> TreeSource {
        override_source.unwrap_or_else(|| match &self.sites_url {
            Some(url) => TreeSource::Url(url.clone()),
            None => TreeSource::Dir(self.sites_root.clone()),
        })
    }

    pub fn fetcher(&self, source: &TreeSource) -> Result<Arc<dyn Fetcher>> {
        let fetcher: Arc<dyn Fetcher> = match source {
            TreeSource::Dir(dir) => Arc::new(FsFetcher::new(dir)),
            TreeSource::Url(url) => Arc::new(
                HttpFetcher::new(url).with_context(|| format!("invalid sites URL {}", url))?,
            ),
        };
        Ok(fetcher)
    }

    /// Load pipeline wired from this configuration.
    pub fn navigator(&self, source: &TreeSource) -> Result<Navigator> {
        let rewriter = Rewriter::new(self.resolver(), self.rewrite_options());
        Ok(Navigator::new(self.fetcher(source)?, rewriter).with_search(self.search_site()))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vsnet")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VsConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<VsConfig> {
    if !path.exists() {
        let default_cfg = VsConfig::default();
        save_at(path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: VsConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

pub fn save(cfg: &VsConfig) -> Result<()> {
    save_at(&config_path()?, cfg)
}

pub fn save_at(path: &Path, cfg: &VsConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("writing config {}", path.display()))?;
    Ok(())
}
