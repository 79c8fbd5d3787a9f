//! `vsnet updomain` / `vsnet downdomain` – edit routing rules in the config file.

use anyhow::{bail, Result};
use vsnet_core::address::normalize_name;
use vsnet_core::config::{self, VsConfig};

use crate::cli::RuleAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Updomain,
    Downdomain,
}

impl RuleKind {
    fn label(self) -> &'static str {
        match self {
            RuleKind::Updomain => "updomain",
            RuleKind::Downdomain => "downdomain",
        }
    }
}

pub fn run_rules(mut cfg: VsConfig, kind: RuleKind, action: RuleAction) -> Result<()> {
    match &action {
        RuleAction::List => {
            let names = names(&cfg, kind);
            if names.is_empty() && kind == RuleKind::Downdomain {
                println!("(any downdomain accepted)");
            }
            for n in names {
                println!("{}", n);
            }
        }
        RuleAction::Add { name } | RuleAction::Remove { name } => {
            if apply(&mut cfg, kind, &action)? {
                config::save(&cfg)?;
                tracing::info!(kind = kind.label(), %name, "routing rules updated");
            } else {
                println!("{} {} unchanged", kind.label(), name);
            }
        }
    }
    Ok(())
}

/// Applies `action` to the config's lists. Returns true if they changed.
pub(crate) fn apply(cfg: &mut VsConfig, kind: RuleKind, action: &RuleAction) -> Result<bool> {
    let (name, add) = match action {
        RuleAction::List => return Ok(false),
        RuleAction::Add { name } => (name, true),
        RuleAction::Remove { name } => (name, false),
    };
    let Some(name) = normalize_name(name) else {
        bail!("invalid {} name `{}`", kind.label(), name);
    };

    let mut rules = cfg.routing_rules();
    let changed = match (kind, add) {
        (RuleKind::Updomain, true) => rules.add_updomain(&name),
        (RuleKind::Updomain, false) => rules.remove_updomain(&name),
        (RuleKind::Downdomain, true) => rules.add_downdomain(&name),
        (RuleKind::Downdomain, false) => rules.remove_downdomain(&name),
    };
    cfg.updomains = rules.updomains().map(str::to_string).collect();
    cfg.downdomains = rules.downdomains().map(str::to_string).collect();
    Ok(changed)
}

fn names(cfg: &VsConfig, kind: RuleKind) -> Vec<String> {
    let rules = cfg.routing_rules();
    match kind {
        RuleKind::Updomain => rules.updomains().map(str::to_string).collect(),
        RuleKind::Downdomain => rules.downdomains().map(str::to_string).collect(),
    }
}
