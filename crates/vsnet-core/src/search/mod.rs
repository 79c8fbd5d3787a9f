//! The search site's dynamic route.
//!
//! `searchit.vs/search/<query>` (or `searchit.vs/search?q=<query>`) does not
//! map to a file. The page is generated from the site catalog, decorated
//! with the verified list, and rendered through the site's template.

mod catalog;
mod engine;
mod render;

pub use catalog::{Catalog, CatalogEntry};
pub use engine::{relevance, search, transliterate, SearchHit, SearchOptions};
pub use render::{render_page, render_results};

use std::borrow::Cow;

use crate::address::{ConcretePath, Locator};
use crate::fetch::Fetcher;
use crate::verified::VerifiedList;

pub const DEFAULT_SEARCH_SITE: &str = "searchit";
pub const DEFAULT_SEARCH_ROUTE: &str = "search";

/// A query extracted from a search route address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub options: SearchOptions,
}

#[derive(Debug, Clone)]
pub struct SearchSite {
    site: String,
    route: String,
    catalog_path: ConcretePath,
    verified_path: ConcretePath,
    template_path: ConcretePath,
}

impl Default for SearchSite {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_SITE)
    }
}

impl SearchSite {
    /// Search site named `site`, with its data files at the site root.
    pub fn new(site: impl Into<String>) -> Self {
        let site = site.into().trim().to_lowercase();
        Self {
            route: DEFAULT_SEARCH_ROUTE.to_string(),
            catalog_path: ConcretePath::from_tree(&format!("{}/catalog.json", site)),
            verified_path: ConcretePath::from_tree(&format!("{}/verified.txt", site)),
            template_path: ConcretePath::from_tree(&format!("{}/results.html", site)),
            site,
        }
    }

    pub fn with_route(mut self, route: &str) -> Self {
        self.route = route.trim_matches('/').to_lowercase();
        self
    }

    pub fn with_catalog_path(mut self, path: &str) -> Self {
        self.catalog_path = ConcretePath::from_tree(path);
        self
    }

    pub fn with_verified_path(mut self, path: &str) -> Self {
        self.verified_path = ConcretePath::from_tree(path);
        self
    }

    pub fn with_template_path(mut self, path: &str) -> Self {
        self.template_path = ConcretePath::from_tree(path);
        self
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn template_path(&self) -> &ConcretePath {
        &self.template_path
    }

    /// Address of the results page for `query`.
    pub fn address_for(&self, query: &str) -> String {
        format!(
            "{}.vs/{}/{}",
            self.site,
            self.route,
            urlencoding::encode(query.trim())
        )
    }

    /// The search request `locator` addresses, if it is this site's route
    /// with a non-empty query. Anything else loads as a normal document.
    pub fn request_for(&self, locator: &Locator) -> Option<SearchRequest> {
        if locator.site != self.site || locator.subdomain.is_some() || locator.updomain.is_some() {
            return None;
        }
        let path = locator.resource_path.trim_end_matches('/');
        let params = locator.query.as_deref().unwrap_or("");

        let query = if path == self.route {
            query_param(params, "q")?
        } else {
            let rest = path.strip_prefix(self.route.as_str())?.strip_prefix('/')?;
            percent_decode(rest).into_owned()
        };
        let query = query.trim().to_string();
        if query.is_empty() {
            return None;
        }

        let mut options = SearchOptions::default();
        if let Some(v) = query_param(params, "verified") {
            options.only_verified = is_truthy(&v);
        }
        if let Some(v) = query_param(params, "translit") {
            options.transliterate = is_truthy(&v);
        }
        Some(SearchRequest { query, options })
    }

    /// Site catalog from the tree, or the built-in one when the tree has
    /// none or it does not parse. Verified-list entries are applied.
    pub fn load_catalog(&self, fetcher: &dyn Fetcher) -> Catalog {
        let mut catalog = match fetcher.fetch(&self.catalog_path) {
            Ok(r) if r.is_success() => match Catalog::from_json(&r.body) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(path = %self.catalog_path, error = %e, "invalid catalog; using built-in");
                    Catalog::builtin()
                }
            },
            Ok(_) => {
                tracing::debug!(path = %self.catalog_path, "no catalog in tree; using built-in");
                Catalog::builtin()
            }
            Err(e) => {
                tracing::warn!(path = %self.catalog_path, error = %e, "catalog unavailable; using built-in");
                Catalog::builtin()
            }
        };
        catalog.apply_verified(&VerifiedList::load(fetcher, &self.verified_path));
        catalog
    }

    pub fn search(&self, fetcher: &dyn Fetcher, request: &SearchRequest) -> Vec<SearchHit> {
        search(&self.load_catalog(fetcher), &request.query, &request.options)
    }

    /// Runs the search and renders the results page. Blocking.
    pub fn serve(&self, fetcher: &dyn Fetcher, request: &SearchRequest) -> String {
        let hits = self.search(fetcher, request);
        let template = match fetcher.fetch(&self.template_path) {
            Ok(r) if r.is_success() => String::from_utf8(r.body).ok(),
            _ => None,
        };
        tracing::info!(
            site = %self.site,
            query = %request.query,
            hits = hits.len(),
            templated = template.is_some(),
            "served search results"
        );
        render_page(&hits, &request.query, template.as_deref())
    }
}

fn percent_decode(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or(Cow::Borrowed(s))
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| percent_decode(&v.replace('+', " ")).into_owned())
}

fn is_truthy(v: &str) -> bool {
    matches!(v.trim(), "1" | "true" | "on" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Resolver;
    use crate::fetch::FsFetcher;

    fn request(address: &str) -> Option<SearchRequest> {
        let locator = Resolver::default().parse(address).unwrap();
        SearchSite::default().request_for(&locator)
    }

    #[test]
    fn path_and_query_forms() {
        assert_eq!(request("searchit.vs/search/mail").unwrap().query, "mail");
        assert_eq!(request("searchit.vs/search/new%20mail").unwrap().query, "new mail");
        assert_eq!(request("searchit.vs/search?q=a+b").unwrap().query, "a b");
        assert_eq!(
            request("searchit.vs/search/%D0%BF%D0%BE%D1%87%D1%82%D0%B0").unwrap().query,
            "почта"
        );
    }

    #[test]
    fn address_for_round_trips() {
        let site = SearchSite::default();
        let address = site.address_for(" new mail ");
        assert_eq!(address, "searchit.vs/search/new%20mail");
        assert_eq!(request(&address).unwrap().query, "new mail");
    }

    #[test]
    fn options_from_query_string() {
        let r = request("searchit.vs/search/mail?verified=1&translit=0").unwrap();
        assert!(r.options.only_verified);
        assert!(!r.options.transliterate);
    }

    #[test]
    fn other_addresses_are_not_search() {
        assert!(request("searchit.vs").is_none());
        assert!(request("searchit.vs/search/").is_none());
        assert!(request("searchit.vs/searching/x").is_none());
        assert!(request("mail.vs/search/x").is_none());
        assert!(request("blog.searchit.vs/search/x").is_none());
    }

    #[test]
    fn serve_uses_tree_catalog_and_template() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("searchit");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(
            root.join("catalog.json"),
            r#"[{"name":"mailbox.vs","description":"Boxes","category":"mail"},
                {"name":"post.vs","description":"Send mail","category":"office"}]"#,
        )
        .unwrap();
        std::fs::write(root.join("verified.txt"), "post.vs\n").unwrap();
        std::fs::write(root.join("results.html"), "<main>{{count}}:{{results}}</main>").unwrap();

        let fetcher = FsFetcher::new(dir.path());
        let req = request("searchit.vs/search/mail").unwrap();
        let site = SearchSite::default();
        let hits = site.search(&fetcher, &req);
        assert_eq!(hits[0].entry.name, "post.vs");
        assert!(hits[0].entry.verified);

        let page = site.serve(&fetcher, &req);
        assert!(page.starts_with("<main>2:"));
        assert!(page.find("post.vs").unwrap() < page.find("mailbox.vs").unwrap());
    }

    #[test]
    fn broken_catalog_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("searchit")).unwrap();
        std::fs::write(dir.path().join("searchit/catalog.json"), "not json").unwrap();
        let catalog = SearchSite::default().load_catalog(&FsFetcher::new(dir.path()));
        assert_eq!(catalog, Catalog::builtin());
    }
}
