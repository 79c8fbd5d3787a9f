//! Address string → [`Locator`].

use super::relative::push_segments;
use super::{AddressError, Locator, RoutingRules, VS_SUFFIX};

const SCHEMES: [&str; 2] = ["https://", "http://"];

pub(super) fn parse_address(rules: &RoutingRules, input: &str) -> Result<Locator, AddressError> {
    let stripped = strip_scheme(input.trim()).trim_start_matches('/');
    let lowered = stripped.to_lowercase();

    let (rest, fragment) = split_tail(&lowered, '#');
    let (rest, query) = split_tail(rest, '?');
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));

    if host.is_empty() {
        return Err(AddressError::Empty);
    }
    if !host.chars().all(is_host_char) {
        return Err(AddressError::InvalidCharacters {
            host: host.to_string(),
        });
    }

    let stem = match host.strip_suffix(VS_SUFFIX) {
        Some(stem) => stem,
        // Legacy input: a bare site name is accepted without the suffix.
        None if !host.contains('.') => host,
        None => {
            return Err(AddressError::MissingSuffix {
                host: host.to_string(),
            })
        }
    };

    let (subdomain, site) = match stem.split_once('.') {
        Some((sub, site)) => (Some(sub), site),
        None => (None, stem),
    };
    if !is_site_name(site) {
        return Err(AddressError::InvalidSite {
            site: site.to_string(),
        });
    }
    if let Some(sub) = subdomain {
        if !is_site_name(sub) {
            return Err(AddressError::InvalidSite {
                site: stem.to_string(),
            });
        }
        if !rules.accepts_downdomain(sub) {
            return Err(AddressError::UnknownDowndomain {
                subdomain: sub.to_string(),
                site: site.to_string(),
            });
        }
    }

    let mut segments = Vec::new();
    push_segments(&mut segments, path);
    let directory = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");

    let updomain = if subdomain.is_none() && segments.first().is_some_and(|s| rules.is_updomain(s))
    {
        Some(segments.remove(0).to_string())
    } else {
        None
    };

    let mut resource_path = segments.join("/");
    if directory && !resource_path.is_empty() {
        resource_path.push('/');
    }

    Ok(Locator {
        site: site.to_string(),
        subdomain: subdomain.map(str::to_string),
        updomain,
        resource_path,
        query: query.map(str::to_string),
        fragment: fragment.map(str::to_string),
    })
}

fn strip_scheme(s: &str) -> &str {
    for scheme in SCHEMES {
        if let Some(prefix) = s.get(..scheme.len()) {
            if prefix.eq_ignore_ascii_case(scheme) {
                return &s[scheme.len()..];
            }
        }
    }
    s
}

/// Splits at the first `sep`; an empty tail counts as absent.
fn split_tail(s: &str, sep: char) -> (&str, Option<&str>) {
    match s.split_once(sep) {
        Some((head, tail)) if tail.is_empty() => (head, None),
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')
}

pub(crate) fn is_site_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
