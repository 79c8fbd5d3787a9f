//! Start-tag parsing and re-serialization.

use std::sync::OnceLock;

use regex::Regex;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^<([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(/?)>"#)
            .expect("start tag pattern")
    })
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("attribute pattern")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Attr {
    pub name: String,
    pub value: Option<String>,
}

/// A parsed start tag. Untouched tags are re-emitted from their source
/// text; only tags modified through [`StartTag::set`] are re-serialized.
#[derive(Debug, Clone)]
pub(super) struct StartTag {
    pub name: String,
    attrs: Vec<Attr>,
    self_closing: bool,
    dirty: bool,
}

impl StartTag {
    /// Parses a start tag at the beginning of `src`. Returns the tag and the
    /// number of bytes it spans, or `None` if `src` does not open with one.
    pub fn parse(src: &str) -> Option<(Self, usize)> {
        let caps = tag_re().captures(src)?;
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str().to_ascii_lowercase();
        let body = caps.get(2).map_or("", |m| m.as_str());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        let attrs = attr_re()
            .captures_iter(body)
            .filter_map(|c| {
                let name = c.get(1)?.as_str().to_ascii_lowercase();
                let value = c
                    .get(2)
                    .or_else(|| c.get(3))
                    .or_else(|| c.get(4))
                    .map(|m| decode_entities(m.as_str()));
                Some(Attr { name, value })
            })
            .collect();

        Some((
            Self {
                name,
                attrs,
                self_closing,
                dirty: false,
            },
            whole.end(),
        ))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Sets (or appends) an attribute and marks the tag modified.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attr {
                name: name.to_string(),
                value,
            }),
        }
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(16 + self.attrs.len() * 24);
        out.push('<');
        out.push_str(&self.name);
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(v) = &attr.value {
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }
        }
        if self.self_closing {
            out.push_str(" /");
        }
        out.push('>');
        out
    }
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub(super) fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}
