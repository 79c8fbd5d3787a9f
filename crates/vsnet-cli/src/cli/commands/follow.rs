//! `vsnet follow` – route a click the way the injected shim does.

use anyhow::{Context, Result};
use vsnet_core::config::VsConfig;
use vsnet_core::link::{route_target, Route};

pub fn run_follow(cfg: &VsConfig, current: &str, target: &str) -> Result<()> {
    let route = route_target(&cfg.resolver(), current, target)
        .with_context(|| format!("following `{}` from {}", target, current))?;
    println!("{}", describe_route(&route));
    Ok(())
}

pub(crate) fn describe_route(route: &Route) -> String {
    match route {
        Route::Navigate(address) => format!("navigate {}", address),
        Route::ScrollTo(name) => format!("scroll #{}", name),
        Route::Passthrough => "passthrough".to_string(),
    }
}
