//! Catalog filtering and ordering.

use serde::Serialize;

use super::catalog::{Catalog, CatalogEntry};

/// Category synonym groups. A query containing any keyword of a group is
/// expanded with the whole group.
const SYNONYMS: &[&[&str]] = &[
    &["mail", "email", "letters", "pochta", "pisma"],
    &["youtube", "video", "films", "movies"],
    &["google", "search", "poisk"],
    &["games", "game", "gaming", "igry"],
    &["news", "novosti"],
    &["social", "friends", "sotsseti"],
    &["music", "audio", "muzyka"],
    &["weather", "forecast", "pogoda"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub only_verified: bool,
    pub transliterate: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            only_verified: false,
            transliterate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub score: u32,
}

/// Cyrillic to Latin, letter by letter. Other characters are kept.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        let latin = match c {
            'а' => "a",
            'б' => "b",
            'в' => "v",
            'г' => "g",
            'д' => "d",
            'е' | 'ё' | 'э' => "e",
            'ж' => "zh",
            'з' => "z",
            'и' => "i",
            'й' | 'ы' => "y",
            'к' => "k",
            'л' => "l",
            'м' => "m",
            'н' => "n",
            'о' => "o",
            'п' => "p",
            'р' => "r",
            'с' => "s",
            'т' => "t",
            'у' => "u",
            'ф' => "f",
            'х' => "kh",
            'ц' => "ts",
            'ч' => "ch",
            'ш' => "sh",
            'щ' => "shch",
            'ъ' | 'ь' => "",
            'ю' => "yu",
            'я' => "ya",
            other => {
                out.push(other);
                continue;
            }
        };
        out.push_str(latin);
    }
    out
}

/// Relevance of `entry` for an already normalized query.
pub fn relevance(entry: &CatalogEntry, query: &str) -> u32 {
    let mut score = 0;
    if entry.bare_name().to_lowercase().contains(query) {
        score += 10;
    }
    if entry.description.to_lowercase().contains(query) {
        score += 5;
    }
    if entry.category.to_lowercase().contains(query) {
        score += 8;
    }
    if entry.verified {
        score += 3;
    }
    score
}

fn expand(query: &str) -> Vec<&str> {
    let mut out = vec![query];
    for group in SYNONYMS {
        if group.iter().any(|k| query.contains(k)) {
            out.extend(group.iter().copied());
        }
    }
    out
}

/// Filters `catalog` for `query`. Verified entries come first, then higher
/// relevance; ties keep catalog order.
pub fn search(catalog: &Catalog, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
    let raw = query.trim().to_lowercase();
    let normalized = if options.transliterate {
        transliterate(&raw)
    } else {
        raw.clone()
    };
    let expanded = expand(&normalized);

    let mut hits: Vec<SearchHit> = catalog
        .entries()
        .iter()
        .filter(|e| !options.only_verified || e.verified)
        .filter(|e| {
            let name = e.bare_name().to_lowercase();
            let category = e.category.to_lowercase();
            let text = format!("{} {} {}", name, e.description.to_lowercase(), category);
            expanded.iter().any(|q| text.contains(q))
                || name.contains(&normalized)
                || category.contains(&raw)
        })
        .map(|e| SearchHit {
            entry: e.clone(),
            score: relevance(e, &normalized),
        })
        .collect();

    hits.sort_by(|a, b| {
        b.entry
            .verified
            .cmp(&a.entry.verified)
            .then(b.score.cmp(&a.score))
    });
    tracing::debug!(query, normalized = %normalized, hits = hits.len(), "searched catalog");
    hits
}
