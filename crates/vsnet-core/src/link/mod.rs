//! Link target classification and interaction-time routing.
//!
//! The rewriter and host-side click interception share one view of what a
//! reference means: stay on the page, leave the sandbox, load as a resource,
//! or navigate to another sandbox address.

mod classify;
mod route;

pub use classify::{classify, is_resource_path, LinkKind};
pub use route::{route_target, NavigationError, Route};

use crate::address::{AddressError, Resolver};

/// Resolves a navigable link kind against the document at `current`.
///
/// The result is always the canonical `.vs` address, which the shim and the
/// host sink treat as absolute. Returns `Ok(None)` for kinds that are not navigation (fragments, script,
/// mail, relative resources, external targets).
pub fn resolve_target(
    resolver: &Resolver,
    current: &str,
    kind: &LinkKind,
) -> Result<Option<String>, AddressError> {
    match kind {
        LinkKind::Sandbox(address) => resolver.canonicalize(address).map(Some),
        LinkKind::RootRelative(path) | LinkKind::Relative(path) => {
            let resolved = resolver.resolve_relative(current, path)?;
            resolver.canonicalize(&resolved).map(Some)
        }
        LinkKind::Empty
        | LinkKind::Fragment(_)
        | LinkKind::Script
        | LinkKind::Mail
        | LinkKind::External(_)
        | LinkKind::Resource
        | LinkKind::RootResource(_) => Ok(None),
    }
}
