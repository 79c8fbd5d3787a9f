//! `vsnet load` – run the load pipeline for one address.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use vsnet_core::config::{TreeSource, VsConfig};

pub async fn run_load(
    cfg: &VsConfig,
    address: &str,
    source: Option<TreeSource>,
    output: Option<&Path>,
) -> Result<()> {
    let source = cfg.tree_source(source);
    let navigator = cfg.navigator(&source)?;
    let page = navigator
        .load(address)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", e.user_reason(), e))?;

    match output {
        Some(path) => {
            std::fs::write(path, &page.content)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} -> {} ({} bytes{})",
                page.address,
                path.display(),
                page.content.len(),
                if page.html { ", rewritten" } else { "" }
            );
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(&page.content)?;
            out.flush()?;
        }
    }
    Ok(())
}
