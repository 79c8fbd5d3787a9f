//! `vsnet relative` – resolve a reference against a base address.

use anyhow::Result;
use vsnet_core::config::VsConfig;

pub fn run_relative(cfg: &VsConfig, base: &str, reference: &str) -> Result<()> {
    let address = cfg.resolver().resolve_relative(base, reference)?;
    println!("{}", address);
    Ok(())
}
