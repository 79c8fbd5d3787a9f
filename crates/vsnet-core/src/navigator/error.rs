use thiserror::Error;

use crate::address::AddressError;

/// Why a load produced no page.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The address did not parse; nothing was fetched.
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    /// Non-2xx response, or the source could not be reached at all.
    #[error("{path} not found{}", describe(.status, .detail))]
    NotFound {
        path: String,
        status: Option<u32>,
        detail: Option<String>,
    },
    /// The fetch task itself failed (panicked or was cancelled).
    #[error("loading {path} failed unexpectedly: {detail}")]
    Fault { path: String, detail: String },
}

impl LoadError {
    pub fn reason(&self) -> &'static str {
        match self {
            LoadError::InvalidAddress(e) => e.reason(),
            LoadError::NotFound { .. } => "not-found",
            LoadError::Fault { .. } => "fault",
        }
    }

    /// Faults are shown to users the same way as a missing page.
    pub fn user_reason(&self) -> &'static str {
        match self {
            LoadError::Fault { .. } => "not-found",
            other => other.reason(),
        }
    }
}

fn describe(status: &Option<u32>, detail: &Option<String>) -> String {
    match (status, detail) {
        (Some(s), Some(d)) => format!(" (HTTP {}: {})", s, d),
        (Some(s), None) => format!(" (HTTP {})", s),
        (None, Some(d)) => format!(" ({})", d),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_and_messages() {
        let e = LoadError::NotFound {
            path: "mail/x.html".into(),
            status: Some(404),
            detail: None,
        };
        assert_eq!(e.reason(), "not-found");
        assert_eq!(e.to_string(), "mail/x.html not found (HTTP 404)");

        let e = LoadError::Fault {
            path: "mail/start.html".into(),
            detail: "task panicked".into(),
        };
        assert_eq!(e.reason(), "fault");
        assert_eq!(e.user_reason(), "not-found");

        let e = LoadError::from(AddressError::Empty);
        assert_eq!(e.reason(), "invalid-address");
    }
}
