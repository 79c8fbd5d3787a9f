//! Walks start tags in a document, leaving everything else byte-for-byte.

use super::tag::StartTag;

/// Elements whose content is raw text and must not be scanned for tags.
const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title"];

/// Calls `visit` for every start tag outside comments and raw-text bodies.
/// Tags the visitor modifies are re-serialized; all other input is copied
/// through unchanged, including malformed markup.
pub(super) fn rewrite_tags<F>(html: &str, mut visit: F) -> String
where
    F: FnMut(&mut StartTag),
{
    let mut out = String::with_capacity(html.len() + html.len() / 8);
    let mut i = 0;

    while let Some(offset) = html[i..].find('<') {
        let at = i + offset;
        out.push_str(&html[i..at]);
        let tail = &html[at..];

        if tail.starts_with("<!--") {
            let end = tail.find("-->").map_or(tail.len(), |e| e + 3);
            out.push_str(&tail[..end]);
            i = at + end;
            continue;
        }

        let Some((mut tag, len)) = StartTag::parse(tail) else {
            out.push('<');
            i = at + 1;
            continue;
        };

        visit(&mut tag);
        if tag.is_dirty() {
            out.push_str(&tag.to_html());
        } else {
            out.push_str(&tail[..len]);
        }
        i = at + len;

        if RAW_TEXT.contains(&tag.name.as_str()) && !tag.is_self_closing() {
            let close = format!("</{}", tag.name);
            let body_len = html[i..]
                .to_ascii_lowercase()
                .find(&close)
                .unwrap_or(html.len() - i);
            out.push_str(&html[i..i + body_len]);
            i += body_len;
        }
    }

    out.push_str(&html[i..]);
    out
}
