//! Parse failures for virtual addresses.

use thiserror::Error;

/// Why an address could not be turned into a locator.
///
/// Every variant maps to the `invalid-address` condition; no fetch is ever
/// attempted for an address that fails here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty address")]
    Empty,
    #[error("host `{host}` contains characters outside [a-z0-9-_.]")]
    InvalidCharacters { host: String },
    #[error("host `{host}` is missing the .vs suffix")]
    MissingSuffix { host: String },
    #[error("`{site}` is not a valid site name")]
    InvalidSite { site: String },
    #[error("`{subdomain}` is not a registered downdomain of `{site}`")]
    UnknownDowndomain { subdomain: String, site: String },
}

impl AddressError {
    /// Stable machine-readable tag for this failure class.
    pub fn reason(&self) -> &'static str {
        "invalid-address"
    }
}
