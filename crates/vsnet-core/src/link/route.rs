//! Interaction-time routing of in-content navigation intents.

use thiserror::Error;

use super::{classify, resolve_target, LinkKind};
use crate::address::{AddressError, Resolver};

/// What the host should do with a navigation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Load this sandbox address through the navigation sink.
    Navigate(String),
    /// Scroll the current document to this anchor.
    ScrollTo(String),
    /// Leave it to the document (script, mail, resources, empty links).
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The target leaves the sandbox; refused at the point of interaction.
    #[error("navigation to external target `{target}` is blocked inside the sandbox")]
    Blocked { target: String },
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
}

impl NavigationError {
    pub fn reason(&self) -> &'static str {
        match self {
            NavigationError::Blocked { .. } => "blocked-navigation",
            NavigationError::InvalidAddress(e) => e.reason(),
        }
    }
}

/// Routes `target`, activated inside the document at `current`.
///
/// External targets are refused before any resolution happens, so they can
/// never produce a storage path or a fetch.
pub fn route_target(resolver: &Resolver, current: &str, target: &str) -> Result<Route, NavigationError> {
    let kind = classify(target);
    match &kind {
        LinkKind::External(url) => {
            tracing::info!(current, target = %url, "blocked external navigation");
            Err(NavigationError::Blocked {
                target: url.clone(),
            })
        }
        LinkKind::Fragment(name) => Ok(Route::ScrollTo(name.clone())),
        _ => match resolve_target(resolver, current, &kind)? {
            Some(address) => {
                tracing::debug!(current, target, %address, "routed in-sandbox navigation");
                Ok(Route::Navigate(address))
            }
            None => Ok(Route::Passthrough),
        },
    }
}
