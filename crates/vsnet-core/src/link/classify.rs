//! Reference → [`LinkKind`].

use crate::address::VS_SUFFIX;

/// Extensions that mark a static resource rather than a navigable page.
const RESOURCE_EXTENSIONS: &[&str] = &[
    // styles & scripts
    "css", "js", "mjs", "map", "wasm",
    // images
    "png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "bmp", "avif",
    // media
    "mp3", "mp4", "webm", "ogg", "ogv", "wav", "m4a", "mov",
    // fonts
    "woff", "woff2", "ttf", "otf", "eot",
    // documents & data
    "pdf", "txt", "json", "xml", "csv", "zip",
];

/// What a link-bearing attribute value refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Empty value or a bare `#`.
    Empty,
    /// `#name`: an anchor in the current document.
    Fragment(String),
    /// `javascript:` pseudo reference.
    Script,
    /// `mailto:` / `tel:`.
    Mail,
    /// An absolute virtual address (`site.vs/...` or `http://site.vs/...`).
    Sandbox(String),
    /// Anything absolute that is not a `.vs` host.
    External(String),
    /// Relative reference to a static resource; loads through the base tag.
    Resource,
    /// `/path` to a static resource from the site root.
    RootResource(String),
    /// `/path` to a page from the site root.
    RootRelative(String),
    /// Any other relative reference.
    Relative(String),
}

impl LinkKind {
    /// True for kinds that must never be followed inside the sandbox.
    pub fn is_external(&self) -> bool {
        matches!(self, LinkKind::External(_))
    }
}

/// Classifies an attribute value.
pub fn classify(reference: &str) -> LinkKind {
    let r = reference.trim();
    if r.is_empty() || r == "#" {
        return LinkKind::Empty;
    }
    if let Some(name) = r.strip_prefix('#') {
        return LinkKind::Fragment(name.to_string());
    }

    let lower = r.to_ascii_lowercase();
    if lower.starts_with("javascript:") {
        return LinkKind::Script;
    }
    if lower.starts_with("mailto:") || lower.starts_with("tel:") {
        return LinkKind::Mail;
    }
    if r.starts_with("//") {
        return classify_absolute(&format!("http:{}", r), r);
    }
    if scheme_of(r).is_some() {
        return classify_absolute(r, r);
    }

    let head = r.split(['/', '?', '#']).next().unwrap_or_default();
    if head.to_ascii_lowercase().ends_with(VS_SUFFIX) {
        return LinkKind::Sandbox(r.to_string());
    }

    if r.starts_with('/') {
        if is_resource_path(r) {
            return LinkKind::RootResource(r.to_string());
        }
        return LinkKind::RootRelative(r.to_string());
    }
    if is_resource_path(r) {
        return LinkKind::Resource;
    }
    LinkKind::Relative(r.to_string())
}

/// True if the final path segment carries a static-resource extension.
pub fn is_resource_path(reference: &str) -> bool {
    let path = reference.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    match last.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            RESOURCE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Scheme name if `s` starts with `scheme:` (RFC 3986 scheme characters).
fn scheme_of(s: &str) -> Option<&str> {
    let (scheme, _) = s.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(scheme)
    } else {
        None
    }
}

/// `http(s)` URLs whose host is a `.vs` name are sandbox addresses.
fn classify_absolute(url_text: &str, original: &str) -> LinkKind {
    let Ok(url) = url::Url::parse(url_text) else {
        return LinkKind::External(original.to_string());
    };
    if !matches!(url.scheme(), "http" | "https") {
        return LinkKind::External(original.to_string());
    }
    match url.host_str() {
        Some(host) if host.ends_with(VS_SUFFIX) => {
            let mut address = host.to_string();
            if url.path() != "/" {
                address.push_str(url.path());
            }
            if let Some(q) = url.query() {
                address.push('?');
                address.push_str(q);
            }
            if let Some(f) = url.fragment() {
                address.push('#');
                address.push_str(f);
            }
            LinkKind::Sandbox(address)
        }
        _ => LinkKind::External(original.to_string()),
    }
}
