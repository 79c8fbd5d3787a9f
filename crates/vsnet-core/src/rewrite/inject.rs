//! Insertion points for injected markup.

/// Byte offset just past the `>` of the first `<name ...>` start tag.
fn open_tag_end(lower: &str, name: &str) -> Option<usize> {
    let pat = format!("<{}", name);
    let mut from = 0;
    while let Some(p) = lower[from..].find(&pat) {
        let after = from + p + pat.len();
        match lower[after..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => {
                return lower[after..].find('>').map(|e| after + e + 1);
            }
            _ => from = after,
        }
    }
    None
}

/// Inserts `block` at the start of `<head>`, creating a head element when
/// the document has none.
pub(super) fn into_head(html: &str, block: &str) -> String {
    let lower = html.to_ascii_lowercase();
    if let Some(at) = open_tag_end(&lower, "head") {
        return splice(html, at, block);
    }
    let wrapped = format!("<head>{}</head>", block);
    if let Some(at) = open_tag_end(&lower, "html") {
        return splice(html, at, &wrapped);
    }
    if lower.trim_start().starts_with("<!doctype") {
        if let Some(end) = lower.find('>') {
            return splice(html, end + 1, &wrapped);
        }
    }
    splice(html, 0, &wrapped)
}

/// Inserts `block` before the last `</body>`, or appends it.
pub(super) fn before_body_end(html: &str, block: &str) -> String {
    let lower = html.to_ascii_lowercase();
    match lower.rfind("</body") {
        Some(at) => splice(html, at, block),
        None => format!("{}{}", html, block),
    }
}

fn splice(html: &str, at: usize, block: &str) -> String {
    let mut out = String::with_capacity(html.len() + block.len());
    out.push_str(&html[..at]);
    out.push_str(block);
    out.push_str(&html[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_is_preferred_over_header() {
        let html = "<html><body><header>h</header></body></html>";
        assert_eq!(
            into_head(html, "X"),
            "<html><head>X</head><body><header>h</header></body></html>"
        );
        let html = "<HTML><HEAD lang=en><title>t</title></HEAD></HTML>";
        assert_eq!(
            into_head(html, "X"),
            "<HTML><HEAD lang=en>X<title>t</title></HEAD></HTML>"
        );
    }

    #[test]
    fn fragments_without_html_element() {
        assert_eq!(into_head("<p>hi</p>", "X"), "<head>X</head><p>hi</p>");
        assert_eq!(
            into_head("<!DOCTYPE html><p>hi</p>", "X"),
            "<!DOCTYPE html><head>X</head><p>hi</p>"
        );
    }

    #[test]
    fn body_end() {
        assert_eq!(before_body_end("<body>a</BODY>", "X"), "<body>aX</BODY>");
        assert_eq!(before_body_end("<p>a</p>", "X"), "<p>a</p>X");
    }
}
