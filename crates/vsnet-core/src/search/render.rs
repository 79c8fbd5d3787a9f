//! Results page.

use super::engine::SearchHit;

const QUERY_SLOT: &str = "{{query}}";
const COUNT_SLOT: &str = "{{count}}";
const RESULTS_SLOT: &str = "{{results}}";

/// Renders the results page, through `template` when the site provides one.
pub fn render_page(hits: &[SearchHit], query: &str, template: Option<&str>) -> String {
    let query = escape_html(query);
    let results = render_results(hits);
    match template {
        Some(t) => t
            .replace(QUERY_SLOT, &query)
            .replace(COUNT_SLOT, &hits.len().to_string())
            .replace(RESULTS_SLOT, &results),
        None => format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>SearchIt: {query}</title>\n</head>\n<body>\n\
             <h1 id=\"resultsTitle\">Search results: \"{query}\" ({count})</h1>\n\
             <div id=\"searchResults\">\n{results}</div>\n</body>\n</html>\n",
            query = query,
            count = hits.len(),
            results = results,
        ),
    }
}

/// Result list markup. Links are plain `.vs` hrefs; the rewriter routes them.
pub fn render_results(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "<p id=\"noResults\">Nothing found.</p>\n".to_string();
    }
    let mut out = String::new();
    for hit in hits {
        let e = &hit.entry;
        let name = escape_html(&e.name);
        out.push_str(&format!(
            "<div class=\"result-item{}\">\n\
             <div class=\"result-title\"><a href=\"{name}\">{name}</a>{}</div>\n\
             <div class=\"result-url\">{name}</div>\n\
             <div class=\"result-description\">{}</div>\n\
             <div class=\"result-category\">Category: {}</div>\n\
             </div>\n",
            if e.verified { " verified" } else { "" },
            if e.verified {
                "<span class=\"verified-badge\">\u{2713} Verified</span>"
            } else {
                ""
            },
            escape_html(&e.description),
            escape_html(&e.category),
            name = name,
        ));
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
