//! Content rewriting.
//!
//! Fetched HTML is rewritten so every in-content navigation is routed back
//! through the sandbox: link targets become calls into the injected shim,
//! forms submit through it, and a `<base>` makes relative resources load
//! from the page's own directory in the public tree.

mod inject;
mod scan;
mod tag;

use crate::address::{Locator, Resolver};
use crate::link::{classify, resolve_target, LinkKind};
use tag::StartTag;

const SHIM_TEMPLATE: &str = include_str!("shim.js");

/// Attribute value used for neutralized links and form actions.
pub const NOOP_TARGET: &str = "javascript:void(0)";

const SHIM_MARKER: &str = "data-vs-shim";
const ANCHOR_MARKER: &str = "data-vs-anchor";

/// Host-facing knobs of the rewriter and the injected shim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Public URL prefix the static tree is served under.
    pub public_prefix: String,
    /// Host function receiving sandbox addresses.
    pub sink: String,
    /// Host function called for refused external targets.
    pub external_action: String,
    /// Host function performing out-of-band POST submissions.
    pub post_handler: String,
    /// Shadow the location surface for script-driven navigation.
    pub shadow_location: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            public_prefix: "/sites".to_string(),
            sink: "parent.navigateTo".to_string(),
            external_action: "parent.vsBlockedNavigation".to_string(),
            post_handler: "parent.vsSubmitPost".to_string(),
            shadow_location: true,
        }
    }
}

/// The address a document was fetched for, plus its fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteContext {
    pub address: String,
    pub fragment: Option<String>,
}

impl RewriteContext {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            fragment: None,
        }
    }

    pub fn with_fragment(mut self, fragment: Option<String>) -> Self {
        self.fragment = fragment.filter(|f| !f.is_empty());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Rewriter {
    resolver: Resolver,
    options: RewriteOptions,
}

impl Rewriter {
    pub fn new(resolver: Resolver, options: RewriteOptions) -> Self {
        Self { resolver, options }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrites `html` fetched for `ctx.address`.
    ///
    /// A context address that does not parse leaves the document untouched.
    pub fn rewrite(&self, html: &str, ctx: &RewriteContext) -> String {
        let locator = match self.resolver.parse(&ctx.address) {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!(address = %ctx.address, error = %e, "not rewriting document with invalid context address");
                return html.to_string();
            }
        };
        let current = ctx.address.as_str();
        let site_root = self.public_site_root(&locator);

        let mut out = scan::rewrite_tags(html, |tag| {
            if tag.name == "form" {
                self.rewrite_form(tag, current);
            }
            if tag.name != "base" {
                self.rewrite_href(tag, current, &site_root);
                self.rewrite_src(tag, &site_root);
            }
        });

        if !html.contains(SHIM_MARKER) {
            let base = self.public_directory(&locator);
            let directory = self
                .resolver
                .resolve_relative(current, "./")
                .and_then(|dir| self.resolver.canonicalize(&dir))
                .unwrap_or_else(|_| locator.host());
            let block = format!(
                "<base data-vs-base href=\"{}\">{}",
                tag::escape_attr(&base),
                self.shim_script(current, &directory)
            );
            out = inject::into_head(&out, &block);
        }

        if let Some(fragment) = &ctx.fragment {
            if !html.contains(ANCHOR_MARKER) {
                out = inject::before_body_end(&out, &anchor_script(fragment));
            }
        }

        tracing::debug!(address = current, "rewrote document");
        out
    }

    fn rewrite_href(&self, tag: &mut StartTag, current: &str, site_root: &str) {
        let Some(href) = tag.get("href").map(str::to_string) else {
            return;
        };
        let kind = classify(&href);
        match &kind {
            LinkKind::Fragment(name) => {
                tag.set("href", NOOP_TARGET);
                add_handler(tag, "onclick", &format!("return __vsScrollTo({})", js_arg(name)));
            }
            LinkKind::RootResource(path) => {
                if let Some(public) = self.public_resource(site_root, path) {
                    tag.set("href", public);
                }
            }
            _ => match resolve_target(&self.resolver, current, &kind) {
                Ok(Some(address)) => {
                    tag.set("href", NOOP_TARGET);
                    tag.set("data-vs-href", address.as_str());
                    add_handler(tag, "onclick", &format!("return __vsNavigate({})", js_arg(&address)));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(current, href = %href, error = %e, "left unresolvable link untouched");
                }
            },
        }
    }

    /// Root-relative `src` attributes would escape to the server root.
    fn rewrite_src(&self, tag: &mut StartTag, site_root: &str) {
        let Some(src) = tag.get("src") else {
            return;
        };
        if let LinkKind::RootResource(path) | LinkKind::RootRelative(path) = classify(src) {
            if let Some(public) = self.public_resource(site_root, &path) {
                tag.set("src", public);
            }
        }
    }

    fn rewrite_form(&self, tag: &mut StartTag, current: &str) {
        let action = tag.get("action").unwrap_or("").trim().to_string();
        if action.is_empty() {
            return;
        }
        let kind = classify(&action);
        match resolve_target(&self.resolver, current, &kind) {
            Ok(Some(address)) => {
                tag.set("action", NOOP_TARGET);
                tag.set("data-vs-action", address.as_str());
                add_handler(
                    tag,
                    "onsubmit",
                    &format!("return __vsSubmit(this,{})", js_arg(&address)),
                );
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(current, action = %action, error = %e, "left unresolvable form action untouched");
            }
        }
    }

    fn public_directory(&self, locator: &Locator) -> String {
        let path = self.resolver.to_storage_path(locator);
        format!("{}/{}", self.prefix(), path.directory())
    }

    fn public_site_root(&self, locator: &Locator) -> String {
        let root = Locator {
            site: locator.site.clone(),
            subdomain: locator.subdomain.clone(),
            updomain: None,
            resource_path: String::new(),
            query: None,
            fragment: None,
        };
        self.public_directory(&root)
    }

    /// Public path of a root-relative resource, or `None` if it already
    /// points into the public tree. With an empty prefix the tree is the
    /// server root, so only paths under this site's root count as mapped.
    fn public_resource(&self, site_root: &str, path: &str) -> Option<String> {
        let prefix = self.prefix();
        let mapped = if prefix.is_empty() {
            path.starts_with(site_root)
        } else {
            path.starts_with(&format!("{}/", prefix))
        };
        if mapped {
            return None;
        }
        Some(format!("{}{}", site_root, path.trim_start_matches('/')))
    }

    fn prefix(&self) -> &str {
        self.options.public_prefix.trim_end_matches('/')
    }

    fn shim_script(&self, current: &str, directory: &str) -> String {
        let js = SHIM_TEMPLATE
            .replace("__VS_ADDRESS__", &js_literal(current))
            .replace("__VS_DIRECTORY__", &js_literal(directory))
            .replace("__VS_SINK__", &js_literal(&self.options.sink))
            .replace("__VS_EXTERNAL__", &js_literal(&self.options.external_action))
            .replace("__VS_POST__", &js_literal(&self.options.post_handler))
            .replace(
                "__VS_SHADOW__",
                if self.options.shadow_location { "true" } else { "false" },
            );
        format!("<script {}>\n{}</script>", SHIM_MARKER, js)
    }
}

fn anchor_script(fragment: &str) -> String {
    format!(
        "<script {}>window.addEventListener('load',function(){{var n={};\
         var el=document.getElementById(n)||document.getElementsByName(n)[0];\
         if(el)el.scrollIntoView({{behavior:'smooth',block:'start'}});}},{{once:true}});</script>",
        ANCHOR_MARKER,
        js_literal(fragment)
    )
}

/// Appends `code` to an event handler attribute; existing handlers run first.
fn add_handler(tag: &mut StartTag, attr: &str, code: &str) {
    let value = match tag.get(attr).map(str::trim) {
        Some(existing) if !existing.is_empty() => {
            format!("{};{}", existing.trim_end_matches(';'), code)
        }
        _ => code.to_string(),
    };
    tag.set(attr, value);
}

/// Single-quoted JS string for use inside an attribute value.
fn js_arg(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// JSON string literal safe to embed in a `<script>` body.
fn js_literal(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| String::from("\"\""))
        .replace("</", "<\\/")
}
