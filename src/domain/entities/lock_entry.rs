//! LockEntry entity - one node of a dependency lock tree
//!
//! A lock artifact is a tree of entries keyed by package name. Sanitizing
//! strips the `from`/`resolved` noise that differs between machines and
//! registries, leaving only what a reproducible install needs.
//!
//! This is a pure data structure - reading and writing the artifact is done by
//! the shrinkwrap use case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of the lock tree.
///
/// Fields that the sanitizer does not care about (`integrity`, `dev`,
/// `requires`, `lockfileVersion`, ...) are carried through in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LockEntry {
    /// Package name (present on the root node only; children are keyed by name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Resolved version. Entries without a version are metadata, never filtered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Declared-from reference (`name@range`, a git URL, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Resolution source (registry tarball URL or VCS reference)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// Nested dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, LockEntry>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl LockEntry {
    /// Create a versioned entry
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_resolved(mut self, resolved: impl Into<String>) -> Self {
        self.resolved = Some(resolved.into());
        self
    }

    /// Add a child entry
    pub fn with_dependency(mut self, name: impl Into<String>, entry: LockEntry) -> Self {
        self.dependencies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), entry);
        self
    }

    /// Whether this node is a real dependency entry (has a version)
    pub fn is_versioned(&self) -> bool {
        self.version.is_some()
    }

    /// Iterate over direct children
    pub fn children(&self) -> impl Iterator<Item = (&str, &LockEntry)> {
        self.dependencies
            .iter()
            .flat_map(|deps| deps.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Total number of entries in this subtree, including `self`
    pub fn entry_count(&self) -> usize {
        1 + self
            .children()
            .map(|(_, child)| child.entry_count())
            .sum::<usize>()
    }
}

/// Which of the noisy fields of a node survive sanitizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetainedFields {
    pub from: bool,
    pub resolved: bool,
}

impl RetainedFields {
    const ALL: RetainedFields = RetainedFields {
        from: true,
        resolved: true,
    };
}

/// Whether a resolution source points at a version-control checkout.
pub fn is_vcs_reference(reference: Option<&str>) -> bool {
    reference.is_some_and(|r| r.starts_with("git"))
}

/// Decide which fields of `entry` to keep.
///
/// Unversioned nodes keep everything. For versioned nodes `from` is kept only
/// for VCS resolutions, and `resolved` only when it is a VCS reference or
/// carries information beyond `from`.
pub fn retained_fields(entry: &LockEntry) -> RetainedFields {
    if !entry.is_versioned() {
        return RetainedFields::ALL;
    }

    let resolved = entry.resolved.as_deref();
    let vcs = is_vcs_reference(resolved);

    RetainedFields {
        from: vcs,
        resolved: vcs || resolved != entry.from.as_deref(),
    }
}

/// Sanitize a whole tree.
pub fn sanitize(entry: &LockEntry) -> LockEntry {
    let keep = retained_fields(entry);

    LockEntry {
        name: entry.name.clone(),
        version: entry.version.clone(),
        from: entry.from.clone().filter(|_| keep.from),
        resolved: entry.resolved.clone().filter(|_| keep.resolved),
        dependencies: entry.dependencies.as_ref().map(|deps| {
            deps.iter()
                .map(|(name, child)| (name.clone(), sanitize(child)))
                .collect()
        }),
        extra: entry.extra.clone(),
    }
}
