//! `vsnet resolve` – address → locator and storage path.

use anyhow::Result;
use vsnet_core::config::VsConfig;

pub fn run_resolve(cfg: &VsConfig, address: &str, json: bool) -> Result<()> {
    let (locator, path) = cfg.resolver().resolve(address)?;
    if json {
        let out = serde_json::json!({
            "address": locator.address(),
            "locator": locator,
            "storage_path": path,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:<14} {}", "address", locator.address());
    println!("{:<14} {}", "site", locator.site);
    if let Some(sub) = &locator.subdomain {
        println!("{:<14} {}", "downdomain", sub);
    }
    if let Some(up) = &locator.updomain {
        println!("{:<14} {}", "updomain", up);
    }
    if !locator.resource_path.is_empty() {
        println!("{:<14} {}", "resource", locator.resource_path);
    }
    if let Some(q) = &locator.query {
        println!("{:<14} {}", "query", q);
    }
    if let Some(f) = &locator.fragment {
        println!("{:<14} {}", "fragment", f);
    }
    println!("{:<14} {}", "storage path", path);
    Ok(())
}
