//! `vsnet search` – query the site catalog.

use anyhow::Result;
use vsnet_core::config::{TreeSource, VsConfig};
use vsnet_core::search::{SearchOptions, SearchRequest};

pub async fn run_search(
    cfg: &VsConfig,
    query: &str,
    options: SearchOptions,
    source: Option<TreeSource>,
    json: bool,
) -> Result<()> {
    let fetcher = cfg.fetcher(&cfg.tree_source(source))?;
    let site = cfg.search_site();
    let request = SearchRequest {
        query: query.to_string(),
        options,
    };
    let hits = tokio::task::spawn_blocking(move || site.search(fetcher.as_ref(), &request)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!("No sites found.");
        return Ok(());
    }
    println!("{:<24} {:<14} {:>5}  {}", "SITE", "CATEGORY", "SCORE", "DESCRIPTION");
    for hit in hits {
        let e = &hit.entry;
        let name = if e.verified {
            format!("{} \u{2713}", e.name)
        } else {
            e.name.clone()
        };
        println!(
            "{:<24} {:<14} {:>5}  {}",
            name, e.category, hit.score, e.description
        );
    }
    Ok(())
}
