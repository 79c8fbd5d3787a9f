//! Site catalog searched by the search site.

use serde::{Deserialize, Serialize};

use crate::address::VS_SUFFIX;
use crate::verified::VerifiedList;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Sandbox host, e.g. `mail.vs`.
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub verified: bool,
}

impl CatalogEntry {
    /// Name without the `.vs` suffix.
    pub fn bare_name(&self) -> &str {
        self.name.strip_suffix(VS_SUFFIX).unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

const BUILTIN: &[(&str, &str, &str, bool)] = &[
    ("mail.vs", "Mail service of Vestalia", "mail", true),
    ("youtube.vs", "Video hosting platform", "video", true),
    ("google.vs", "Search engine and services", "search", true),
    ("welcome.vs", "Welcome to the .vs internet", "information", true),
    ("admin.goverment.vs", "Government administrative portal", "government", true),
    ("imagining.mail.vs", "Mail service blog", "blog", true),
    ("drive.google.vs", "Cloud file storage", "storage", true),
    ("games.vs", "Gaming platform", "games", false),
    ("social.vs", "Social network", "social", false),
    ("news.vs", "News portal", "news", false),
    ("music.vs", "Music service", "music", false),
    ("weather.vs", "Weather service", "weather", false),
];

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Catalog used when the tree does not provide one.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(name, description, category, verified)| CatalogEntry {
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                verified,
            })
            .collect();
        Self { entries }
    }

    /// Parses a JSON array of entries.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        let entries: Vec<CatalogEntry> = serde_json::from_slice(data)?;
        Ok(Self { entries })
    }

    /// Marks every entry on `list` as verified.
    pub fn apply_verified(&mut self, list: &VerifiedList) {
        for entry in &mut self.entries {
            if list.contains(&entry.name) {
                entry.verified = true;
            }
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn verified_count(&self) -> usize {
        self.entries.iter().filter(|e| e.verified).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog() {
        let c = Catalog::builtin();
        assert_eq!(c.len(), 12);
        assert_eq!(c.verified_count(), 7);
        assert_eq!(c.entries()[5].bare_name(), "imagining.mail");
    }

    #[test]
    fn json_with_default_verified_flag() {
        let c = Catalog::from_json(
            br#"[{"name":"a.vs","description":"A","category":"x"},
                 {"name":"b.vs","description":"B","category":"y","verified":true}]"#,
        )
        .unwrap();
        assert_eq!(c.len(), 2);
        assert!(!c.entries()[0].verified);
        assert!(c.entries()[1].verified);
        assert!(Catalog::from_json(b"{}").is_err());
    }

    #[test]
    fn verified_list_marks_entries() {
        let mut c = Catalog::builtin();
        c.apply_verified(&VerifiedList::parse("games.vs\nweather\n"));
        assert_eq!(c.verified_count(), 9);
    }
}
