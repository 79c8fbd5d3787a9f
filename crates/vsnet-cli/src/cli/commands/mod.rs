//! CLI command handlers. Each command is in its own file.

mod completions;
mod follow;
mod load;
mod relative;
mod resolve;
mod rules;
mod search;

pub use completions::{run_completions, run_man};
pub use follow::run_follow;
pub use load::run_load;
pub use relative::run_relative;
pub use resolve::run_resolve;
pub use rules::{run_rules, RuleKind};
pub use search::run_search;

#[cfg(test)]
pub(crate) use follow::describe_route;
#[cfg(test)]
pub(crate) use rules::apply as apply_rule;
