//! [`Locator`] → concrete storage path.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::Locator;

/// Path of a resource inside the static site tree, relative to its root.
///
/// Shape: `<site>/[<sub>.downdomain/|<up>.updomain/]<resource-or-entry>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConcretePath(String);

impl ConcretePath {
    /// A path given directly relative to the tree root, such as
    /// `searchit/catalog.json`. Empty, `.` and `..` segments are dropped.
    pub fn from_tree(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|s| !matches!(*s, "" | "." | ".."))
            .collect();
        ConcretePath(segments.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part including the trailing `/` (e.g. `mail/folder/`).
    pub fn directory(&self) -> &str {
        match self.0.rfind('/') {
            Some(i) => &self.0[..=i],
            None => "",
        }
    }

    /// Lower-cased extension of the final segment, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.0.rsplit('/').next()?;
        let (_, ext) = name.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }

    /// Joins this path under a filesystem root.
    pub fn under(&self, root: &Path) -> PathBuf {
        self.0.split('/').fold(root.to_path_buf(), |acc, seg| acc.join(seg))
    }
}

impl fmt::Display for ConcretePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConcretePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// True if `path` names a file: the final segment contains `.` and there
/// is no trailing slash.
pub fn is_file_like(path: &str) -> bool {
    if path.is_empty() || path.ends_with('/') {
        return false;
    }
    path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

pub(super) fn storage_path(locator: &Locator, entry_file: &str) -> ConcretePath {
    let mut out = String::with_capacity(locator.site.len() + locator.resource_path.len() + 32);
    out.push_str(&locator.site);
    out.push('/');
    if let Some(sub) = &locator.subdomain {
        out.push_str(sub);
        out.push_str(".downdomain/");
    } else if let Some(up) = &locator.updomain {
        out.push_str(up);
        out.push_str(".updomain/");
    }

    if is_file_like(&locator.resource_path) {
        out.push_str(&locator.resource_path);
    } else {
        let dir = locator.resource_path.trim_end_matches('/');
        if !dir.is_empty() {
            out.push_str(dir);
            out.push('/');
        }
        out.push_str(entry_file);
    }
    ConcretePath(out)
}
