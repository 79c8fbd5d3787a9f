//! CLI for the vsnet sandboxed virtual-site engine.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use vsnet_core::config::{self, TreeSource};

use commands::{
    run_completions, run_follow, run_load, run_man, run_relative, run_resolve, run_rules,
    run_search, RuleKind,
};

/// Top-level CLI for vsnet.
#[derive(Debug, Parser)]
#[command(name = "vsnet")]
#[command(about = "vsnet: resolve, load and rewrite sandboxed .vs sites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where to read the static site tree from; defaults to the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Static tree directory.
    #[arg(long, value_name = "DIR", conflicts_with = "url")]
    pub root: Option<PathBuf>,
    /// Base URL the static tree is served at.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

impl SourceArgs {
    pub fn tree_source(&self) -> Option<TreeSource> {
        match (&self.root, &self.url) {
            (Some(dir), _) => Some(TreeSource::Dir(dir.clone())),
            (None, Some(url)) => Some(TreeSource::Url(url.clone())),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum RuleAction {
    /// Add a name to the list.
    Add { name: String },
    /// Remove a name from the list.
    Remove { name: String },
    /// Print the list.
    List,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Parse a virtual address and print its locator and storage path.
    Resolve {
        /// Virtual address, e.g. `blog.mail.vs/page.html#top`.
        address: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a relative reference against a base address.
    Relative {
        /// Address of the document containing the reference.
        base: String,
        /// Reference as written in the document.
        reference: String,
    },

    /// Route a navigation intent from inside a document. Exits non-zero when blocked.
    Follow {
        /// Address of the current document.
        current: String,
        /// Link target as written in the document.
        target: String,
    },

    /// Load an address through the full pipeline and print the content.
    Load {
        address: String,
        #[command(flatten)]
        source: SourceArgs,
        /// Write the content to a file instead of stdout.
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Search the site catalog the way the search site does.
    Search {
        query: String,
        /// Only list verified sites.
        #[arg(long)]
        only_verified: bool,
        /// Do not transliterate Cyrillic queries.
        #[arg(long)]
        no_transliterate: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage the updomain allow-list.
    Updomain {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Manage the downdomain allow-list (empty accepts any downdomain).
    Downdomain {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Print shell completions.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print the man page.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(Cli::command(), shell),
            CliCommand::Man => return run_man(Cli::command()),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve { address, json } => run_resolve(&cfg, &address, json)?,
            CliCommand::Relative { base, reference } => run_relative(&cfg, &base, &reference)?,
            CliCommand::Follow { current, target } => run_follow(&cfg, &current, &target)?,
            CliCommand::Load {
                address,
                source,
                output,
            } => run_load(&cfg, &address, source.tree_source(), output.as_deref()).await?,
            CliCommand::Search {
                query,
                only_verified,
                no_transliterate,
                json,
                source,
            } => {
                let options = vsnet_core::search::SearchOptions {
                    only_verified,
                    transliterate: !no_transliterate,
                };
                run_search(&cfg, &query, options, source.tree_source(), json).await?;
            }
            CliCommand::Updomain { action } => run_rules(cfg, RuleKind::Updomain, action)?,
            CliCommand::Downdomain { action } => run_rules(cfg, RuleKind::Downdomain, action)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
