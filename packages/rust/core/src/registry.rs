//! Doc registry: the optional collaborator that knows which doc ids have content.
//!
//! The validator only asks [`DocRegistry::exists`]; how the registry is
//! populated belongs to the surrounding build.

use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path, PathBuf};

use tracing::trace;

/// Answers whether content exists for a doc id.
///
/// Implementations must be side-effect free; the validator may call `exists`
/// once per doc node.
pub trait DocRegistry: Send + Sync {
    fn exists(&self, id: &str) -> bool;
}

impl DocRegistry for HashSet<String> {
    fn exists(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl DocRegistry for BTreeSet<String> {
    fn exists(&self, id: &str) -> bool {
        self.contains(id)
    }
}

// ---------------------------------------------------------------------------
// DirRegistry
// ---------------------------------------------------------------------------

/// Registry backed by a docs directory: `id` exists if `<root>/<id>.<ext>` is a
/// file for any configured extension.
#[derive(Debug, Clone)]
pub struct DirRegistry {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirRegistry {
    /// Registry over `root` trying `.md` then `.mdx`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["md".into(), "mdx".into()],
        }
    }

    /// Replace the extensions tried for each id (leading dots are ignored).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .collect();
        self
    }

    fn candidates<'a>(&'a self, id: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.extensions
            .iter()
            .map(move |ext| self.root.join(format!("{id}.{ext}")))
    }
}

impl DocRegistry for DirRegistry {
    fn exists(&self, id: &str) -> bool {
        // Ids resolve strictly below the docs root: no absolute paths, `..` or `.`.
        let contained = Path::new(id)
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !contained {
            return false;
        }

        let found = self.candidates(id).any(|path| path.is_file());
        trace!(id, found, "registry lookup");
        found
    }
}
