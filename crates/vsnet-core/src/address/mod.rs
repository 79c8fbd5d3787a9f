//! Virtual address resolution.
//!
//! Turns free-form `.vs` addresses into a structured [`Locator`] and maps
//! locators onto concrete paths inside the static site tree. Parsing and path
//! construction are separate steps so routing policy (what is an updomain,
//! what is a downdomain) stays in one place and can be tested without any
//! storage behind it.

mod error;
mod parse;
mod relative;
mod rules;
mod storage;

pub use error::AddressError;
pub use rules::{normalize_name, RoutingRules};
pub use storage::{is_file_like, ConcretePath};

use serde::Serialize;

/// Default document served when a locator names a directory.
pub const DEFAULT_ENTRY_FILE: &str = "start.html";

/// Suffix every sandbox host carries.
pub const VS_SUFFIX: &str = ".vs";

/// Structured form of a virtual address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locator {
    /// Top-level sandbox site, `[a-z0-9_-]+`.
    pub site: String,
    /// Downdomain name for `sub.site.vs` addresses.
    pub subdomain: Option<String>,
    /// Allow-listed first path segment routed to `<name>.updomain/`.
    pub updomain: Option<String>,
    /// Normalized path below the site (or downdomain/updomain) root.
    /// A trailing `/` marks an explicit directory.
    pub resource_path: String,
    /// Text after `?`, kept for form GET submissions and dynamic routes.
    pub query: Option<String>,
    /// In-page anchor; never used for storage resolution.
    pub fragment: Option<String>,
}

impl Locator {
    /// Host form of the locator root: `site.vs` or `sub.site.vs`.
    pub fn host(&self) -> String {
        match &self.subdomain {
            Some(sub) => format!("{}.{}{}", sub, self.site, VS_SUFFIX),
            None => format!("{}{}", self.site, VS_SUFFIX),
        }
    }

    /// Canonical address for this locator (without query or fragment).
    pub fn address(&self) -> String {
        let mut out = self.host();
        if let Some(up) = &self.updomain {
            out.push('/');
            out.push_str(up);
        }
        if !self.resource_path.is_empty() {
            out.push('/');
            out.push_str(&self.resource_path);
        }
        out
    }

    /// Canonical address with query and fragment, as handed to the host's
    /// navigation sink.
    pub fn full_address(&self) -> String {
        let mut out = self.address();
        if let Some(q) = &self.query {
            out.push('?');
            out.push_str(q);
        }
        if let Some(f) = &self.fragment {
            out.push('#');
            out.push_str(f);
        }
        out
    }

    /// Path segments of `resource_path`, without empty segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.resource_path.split('/').filter(|s| !s.is_empty())
    }
}

/// Resolver bound to a set of routing rules and an entry file name.
#[derive(Debug, Clone)]
pub struct Resolver {
    rules: RoutingRules,
    entry_file: String,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(RoutingRules::default())
    }
}

impl Resolver {
    pub fn new(rules: RoutingRules) -> Self {
        Self {
            rules,
            entry_file: DEFAULT_ENTRY_FILE.to_string(),
        }
    }

    /// Override the entry document name (default `start.html`).
    pub fn with_entry_file(mut self, entry_file: impl Into<String>) -> Self {
        self.entry_file = entry_file.into();
        self
    }

    pub fn rules(&self) -> &RoutingRules {
        &self.rules
    }

    pub fn entry_file(&self) -> &str {
        &self.entry_file
    }

    /// Parses a virtual address into a [`Locator`].
    pub fn parse(&self, address: &str) -> Result<Locator, AddressError> {
        let locator = parse::parse_address(&self.rules, address)?;
        tracing::debug!(address, site = %locator.site, "parsed virtual address");
        Ok(locator)
    }

    /// Maps a locator to its concrete storage path. Pure; no I/O.
    pub fn to_storage_path(&self, locator: &Locator) -> ConcretePath {
        storage::storage_path(locator, &self.entry_file)
    }

    /// Parse then map in one step.
    pub fn resolve(&self, address: &str) -> Result<(Locator, ConcretePath), AddressError> {
        let locator = self.parse(address)?;
        let path = self.to_storage_path(&locator);
        Ok((locator, path))
    }

    /// Re-parses `address` and returns its `.vs` form, so bare-site results
    /// of [`Resolver::resolve_relative`] become absolute.
    pub fn canonicalize(&self, address: &str) -> Result<String, AddressError> {
        Ok(self.parse(address)?.full_address())
    }

    /// Resolves `reference` against the document at `base`, returning a
    /// virtual address that re-parses with [`Resolver::parse`].
    pub fn resolve_relative(&self, base: &str, reference: &str) -> Result<String, AddressError> {
        let base = self.parse(base)?;
        Ok(relative::resolve_against(&base, reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        Resolver::new(RoutingRules::with_updomains(["imagining"]))
    }

    fn storage(address: &str) -> String {
        let r = resolver();
        let loc = r.parse(address).unwrap();
        r.to_storage_path(&loc).to_string()
    }

    #[test]
    fn bare_site_maps_to_entry_file() {
        assert_eq!(storage("mail.vs"), "mail/start.html");
    }

    #[test]
    fn downdomain_maps_to_downdomain_folder() {
        assert_eq!(
            storage("imagining.mail.vs"),
            "mail/imagining.downdomain/start.html"
        );
    }

    #[test]
    fn updomain_maps_to_updomain_folder() {
        assert_eq!(storage("mail.vs/imagining"), "mail/imagining.updomain/start.html");
        assert_eq!(
            storage("mail.vs/imagining/post.html"),
            "mail/imagining.updomain/post.html"
        );
    }

    #[test]
    fn file_path_maps_directly() {
        assert_eq!(storage("mail.vs/page.html"), "mail/page.html");
        assert_eq!(storage("mail.vs/folder/page.html"), "mail/folder/page.html");
    }

    #[test]
    fn directory_paths_get_entry_file() {
        assert_eq!(storage("mail.vs/folder"), "mail/folder/start.html");
        assert_eq!(storage("mail.vs/folder/"), "mail/folder/start.html");
    }

    #[test]
    fn custom_entry_file() {
        let r = resolver().with_entry_file("index.html");
        let loc = r.parse("news.vs").unwrap();
        assert_eq!(r.to_storage_path(&loc).as_str(), "news/index.html");
    }

    #[test]
    fn parse_is_deterministic() {
        let r = resolver();
        for a in [
            "mail.vs",
            "blog.mail.vs/imagining/page.html#section",
            "https://Mail.VS/imagining/x/",
            "news.vs/a/b?q=1",
        ] {
            assert_eq!(r.parse(a).unwrap(), r.parse(a).unwrap());
        }
    }

    #[test]
    fn relative_one_level_up() {
        let r = resolver();
        assert_eq!(
            r.resolve_relative("mail.vs/folder/page.html", "../other.html").unwrap(),
            "mail/other.html"
        );
    }

    #[test]
    fn relative_never_escapes_site_root() {
        let r = resolver();
        let out = r.resolve_relative("mail.vs", "../../x.html").unwrap();
        assert_eq!(out, "mail/x.html");
        let (loc, path) = r.resolve(&out).unwrap();
        assert_eq!(loc.site, "mail");
        assert!(path.as_str().starts_with("mail/"));
    }

    #[test]
    fn relative_result_reparses_to_same_storage_path() {
        let r = resolver();
        let out = r.resolve_relative("mail.vs/imagining", "post.html").unwrap();
        let loc = r.parse(&out).unwrap();
        assert_eq!(r.to_storage_path(&loc).as_str(), "mail/imagining.updomain/post.html");

        let out = r.resolve_relative("imagining.mail.vs/a/b.html", "c.html").unwrap();
        let loc = r.parse(&out).unwrap();
        assert_eq!(
            r.to_storage_path(&loc).as_str(),
            "mail/imagining.downdomain/a/c.html"
        );
    }

    #[test]
    fn round_trip_file_locators() {
        let r = resolver();
        let locators = [
            Locator {
                site: "mail".into(),
                subdomain: None,
                updomain: None,
                resource_path: "a/b/page.html".into(),
                query: None,
                fragment: None,
            },
            Locator {
                site: "mail".into(),
                subdomain: Some("blog".into()),
                updomain: None,
                resource_path: "post.html".into(),
                query: None,
                fragment: None,
            },
            Locator {
                site: "mail".into(),
                subdomain: None,
                updomain: Some("imagining".into()),
                resource_path: "x/y.txt".into(),
                query: None,
                fragment: None,
            },
        ];
        for loc in locators {
            let direct = r.to_storage_path(&loc);
            let reparsed = r.parse(&loc.address()).unwrap();
            assert_eq!(reparsed, loc);
            assert_eq!(r.to_storage_path(&reparsed), direct);
        }
    }

    #[test]
    fn locator_host_and_address() {
        let r = resolver();
        let loc = r.parse("blog.mail.vs/a/b.html").unwrap();
        assert_eq!(loc.host(), "blog.mail.vs");
        assert_eq!(loc.address(), "blog.mail.vs/a/b.html");
        assert_eq!(loc.segments().collect::<Vec<_>>(), vec!["a", "b.html"]);
    }

    #[test]
    fn canonicalize_makes_relative_results_absolute() {
        let r = resolver();
        let plain = r.resolve_relative("mail.vs/folder/page.html", "../other.html").unwrap();
        assert_eq!(r.canonicalize(&plain).unwrap(), "mail.vs/other.html");

        let up = r.resolve_relative("mail.vs/imagining/a.html", "x.html?y=1#z").unwrap();
        assert_eq!(r.canonicalize(&up).unwrap(), "mail.vs/imagining/x.html?y=1#z");

        let down = r.resolve_relative("blog.mail.vs/post.html", "about.html").unwrap();
        assert_eq!(r.canonicalize(&down).unwrap(), "blog.mail.vs/about.html");

        let dir = r.resolve_relative("mail.vs/folder/page.html", "./").unwrap();
        assert_eq!(r.canonicalize(&dir).unwrap(), "mail.vs/folder/");
        assert_eq!(r.canonicalize("mail").unwrap(), "mail.vs");
    }

    #[test]
    fn canonical_form_is_a_fixed_point() {
        let r = resolver();
        for a in ["mail.vs/other.html", "mail.vs/imagining/x.html#z", "blog.mail.vs/a/", "news.vs?q=1"] {
            let once = r.canonicalize(a).unwrap();
            assert_eq!(once, a);
            assert_eq!(r.canonicalize(&once).unwrap(), once);
        }
    }
}
