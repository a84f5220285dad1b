//! Core domain types for SideNav sidebar trees.

use std::fmt;

use serde::{Serialize, Serializer};

/// Name of the group used when none is configured.
pub const DEFAULT_GROUP: &str = "docs";

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A leaf referencing a single document by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocNode {
    /// Document id (e.g., `guides/getting-started`), unique across the tree.
    pub id: String,
    /// Explicit display label, if the source provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DocNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn with_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }

    /// Display label: the explicit one, or one derived from the id's last segment.
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => default_label(&self.id),
        }
    }
}

/// A labeled grouping of child nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    /// Display label.
    pub label: String,
    /// Children in authored order.
    pub items: Vec<SidebarItem>,
    /// Rendering hint; not interpreted here.
    pub collapsed: bool,
}

impl CategoryNode {
    pub fn new(label: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self {
            label: label.into(),
            items,
            collapsed: true,
        }
    }
}

/// One entry in a sidebar sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Doc(DocNode),
    Category(CategoryNode),
}

impl SidebarItem {
    /// Label used when this item appears in a [`NodePath`].
    pub fn path_label(&self) -> Option<&str> {
        match self {
            SidebarItem::Doc(_) => None,
            SidebarItem::Category(category) => Some(&category.label),
        }
    }
}

impl From<DocNode> for SidebarItem {
    fn from(doc: DocNode) -> Self {
        SidebarItem::Doc(doc)
    }
}

impl From<CategoryNode> for SidebarItem {
    fn from(category: CategoryNode) -> Self {
        SidebarItem::Category(category)
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A named top-level sequence (e.g., `docs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    pub name: String,
    pub items: Vec<SidebarItem>,
}

/// The full sidebar: every named group, in source order.
///
/// Children are owned by exactly one parent `Vec`, so a node can never appear
/// under two parents and the structure cannot contain cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidebarTree {
    pub groups: Vec<SidebarGroup>,
}

impl SidebarTree {
    /// Look up a group by name.
    pub fn group(&self, name: &str) -> Option<&SidebarGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Number of doc nodes across all groups.
    pub fn doc_count(&self) -> usize {
        fn count(items: &[SidebarItem]) -> usize {
            items
                .iter()
                .map(|item| match item {
                    SidebarItem::Doc(_) => 1,
                    SidebarItem::Category(c) => count(&c.items),
                })
                .sum()
        }
        self.groups.iter().map(|g| count(&g.items)).sum()
    }
}

// ---------------------------------------------------------------------------
// NodePath
// ---------------------------------------------------------------------------

/// One step in a [`NodePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    /// The top-level group name.
    Group(String),
    /// Position within a sequence, with the category label when the item is one.
    Item { index: usize, label: Option<String> },
}

/// Position of a node from the root, e.g. `docs[1:Key Concepts][0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    /// The path of a top-level group.
    pub fn group(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Group(name.into())])
    }

    /// The path of the item at `index` below `self`.
    pub fn child(&self, index: usize, label: Option<&str>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Item {
            index,
            label: label.map(str::to_owned),
        });
        Self(segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for segment in &self.0 {
            match segment {
                PathSegment::Group(name) => f.write_str(name)?,
                PathSegment::Item {
                    index,
                    label: Some(label),
                } => write!(f, "[{index}:{label}]")?,
                PathSegment::Item { index, label: None } => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// What a validation violation is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ViolationKind {
    /// A doc id already used elsewhere in the tree.
    DuplicateId { id: String, first_seen: NodePath },
    /// A category with no items.
    EmptyCategory { label: String },
    /// A doc id the registry has no content for.
    UnknownDocReference { id: String },
}

impl ViolationKind {
    /// Stable kind name (`DuplicateId`, `EmptyCategory`, `UnknownDocReference`).
    pub fn name(&self) -> &'static str {
        match self {
            ViolationKind::DuplicateId { .. } => "DuplicateId",
            ViolationKind::EmptyCategory { .. } => "EmptyCategory",
            ViolationKind::UnknownDocReference { .. } => "UnknownDocReference",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::DuplicateId { id, first_seen } => {
                write!(f, "doc id `{id}` already used at {first_seen}")
            }
            ViolationKind::EmptyCategory { label } => {
                write!(f, "category `{label}` has no items")
            }
            ViolationKind::UnknownDocReference { id } => {
                write!(f, "doc id `{id}` has no matching content")
            }
        }
    }
}

/// A single invariant violation found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(flatten)]
    pub kind: ViolationKind,
    pub path: NodePath,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path, self.kind.name(), self.kind)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Derive a human-readable label from a doc id's last path segment.
///
/// `guides/getting-started` becomes `Getting Started`; `index` becomes `Overview`.
pub fn default_label(id: &str) -> String {
    let segment = id
        .rsplit('/')
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or(id);

    if segment == "index" {
        return "Overview".to_string();
    }

    segment
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.as_str())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
