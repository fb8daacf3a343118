//! Named path tree: a filesystem root, an API base URL, and derived
//! entries built by joining ordered segments onto one of the two bases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{SchemaError, SchemaResult};

/// Which base an entry derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathBase {
    /// Joined onto the filesystem root.
    #[default]
    Root,
    /// Joined onto the API base URL.
    Api,
}

/// One derived path: ordered segments joined onto a base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    #[serde(default)]
    pub base: PathBase,
    pub segments: Vec<String>,
}

/// The declared path tree. Relocating `root` relocates every non-API
/// entry with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSchema {
    /// Filesystem root every non-API entry derives from.
    pub root: String,
    /// Base URL for API-backed entries.
    pub api_url: String,
    #[serde(default)]
    pub entries: BTreeMap<String, PathEntry>,
}

impl PathSchema {
    /// Pure join of a base and ordered segments.
    fn join(base: &str, segments: &[String]) -> String {
        let mut out = base.trim_end_matches('/').to_string();
        for segment in segments {
            out.push('/');
            out.push_str(segment.trim_matches('/'));
        }
        if out.is_empty() {
            "/".to_string()
        } else {
            out
        }
    }

    /// Resolve a named entry against the declared bases.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.resolve_with_root(&self.root, name)
    }

    /// Resolve with a substituted filesystem root; API entries are
    /// unaffected. Lets tests point the whole tree at a temp directory.
    pub fn resolve_with_root(&self, root: &str, name: &str) -> Option<String> {
        let entry = self.entries.get(name)?;
        let base = match entry.base {
            PathBase::Root => root,
            PathBase::Api => self.api_url.as_str(),
        };
        Some(Self::join(base, &entry.segments))
    }

    /// Names of all declared entries.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every root-based entry must resolve under the declared root.
    pub fn validate(&self) -> SchemaResult<()> {
        let prefix = if self.root == "/" {
            "/"
        } else {
            self.root.trim_end_matches('/')
        };

        for (name, entry) in &self.entries {
            if entry.base != PathBase::Root {
                continue;
            }
            let resolved = Self::join(&self.root, &entry.segments);
            let escapes = entry.segments.iter().any(|s| s == "..")
                || !resolved.starts_with(prefix);
            if escapes {
                return Err(SchemaError::PathEscapesRoot {
                    name: name.clone(),
                    resolved,
                });
            }
        }
        Ok(())
    }
}
