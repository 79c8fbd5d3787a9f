pub mod config;
pub mod logging;

pub mod address;
pub mod fetch;
pub mod link;
pub mod navigator;
pub mod rewrite;
pub mod search;
pub mod verified;

pub use address::{AddressError, ConcretePath, Locator, Resolver, RoutingRules};
pub use navigator::{LoadError, Navigator, Page};
pub use rewrite::{RewriteContext, RewriteOptions, Rewriter};
