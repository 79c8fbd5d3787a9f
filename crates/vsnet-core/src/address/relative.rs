//! Relative reference resolution against a base locator.

use super::{Locator, VS_SUFFIX};

/// Applies `path` to a segment stack: `..` pops (a no-op once the stack is
/// empty), `.` and empty segments are skipped.
pub(super) fn push_segments<'a>(stack: &mut Vec<&'a str>, path: &'a str) {
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            s => stack.push(s),
        }
    }
}

/// Resolves `reference` against the document named by `base`.
///
/// The locator root (site, or `sub.site.vs` for downdomains) is never popped.
/// A reference starting with `/` restarts from that root.
pub(super) fn resolve_against(base: &Locator, reference: &str) -> String {
    let (reference, fragment) = split_tail(reference.trim(), '#');
    let (reference, query) = split_tail(reference, '?');

    let mut stack: Vec<&str> = Vec::new();
    if !reference.starts_with('/') {
        if let Some(up) = &base.updomain {
            stack.push(up.as_str());
        }
        stack.extend(base.segments());
        // Relative to the containing directory unless the base is itself one.
        if !base.resource_path.is_empty() && !base.resource_path.ends_with('/') {
            stack.pop();
        }
    }
    push_segments(&mut stack, reference);

    let mut out = root_token(base);
    for seg in &stack {
        out.push('/');
        out.push_str(seg);
    }
    if reference.ends_with('/') && !stack.is_empty() {
        out.push('/');
    }
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}

/// Leading token of a resolved address. Plain sites use the bare name; a
/// downdomain keeps its full host so the result parses back to it.
fn root_token(base: &Locator) -> String {
    match &base.subdomain {
        Some(sub) => format!("{}.{}{}", sub, base.site, VS_SUFFIX),
        None => base.site.clone(),
    }
}

fn split_tail(s: &str, sep: char) -> (&str, Option<&str>) {
    match s.split_once(sep) {
        Some((head, tail)) => (head, Some(tail).filter(|t| !t.is_empty())),
        None => (s, None),
    }
}
