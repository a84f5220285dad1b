//! Cross-tree validation: parsed [`SidebarTree`] → [`ValidatedTree`].
//!
//! One depth-first walk collects every violation before failing, so a broken
//! sidebar is reported in full rather than one problem per run.

use std::collections::HashMap;
use std::ops::Deref;

use tracing::{debug, instrument};

use sidenav_shared::{
    NodePath, Result, SidebarItem, SidebarTree, SidenavError, Violation, ViolationKind,
};

use crate::registry::DocRegistry;

// ---------------------------------------------------------------------------
// ValidatedTree
// ---------------------------------------------------------------------------

/// A sidebar that passed validation.
///
/// Only [`Validator::validate`] constructs one, and it hands out shared
/// references only, so the tree stays exactly as validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTree {
    tree: SidebarTree,
}

impl ValidatedTree {
    pub fn tree(&self) -> &SidebarTree {
        &self.tree
    }
}

impl Deref for ValidatedTree {
    type Target = SidebarTree;

    fn deref(&self) -> &SidebarTree {
        &self.tree
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Checks unique doc ids, non-empty categories and, with a registry,
/// that every doc id has content.
#[derive(Default, Clone, Copy)]
pub struct Validator<'r> {
    registry: Option<&'r dyn DocRegistry>,
}

impl<'r> Validator<'r> {
    pub fn new() -> Self {
        Self { registry: None }
    }

    /// Also report doc ids the registry has no content for.
    pub fn with_registry(mut self, registry: &'r dyn DocRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Validate `tree`, returning every violation at once on failure.
    #[instrument(skip_all, fields(groups = tree.groups.len(), registry = self.registry.is_some()))]
    pub fn validate(&self, tree: SidebarTree) -> Result<ValidatedTree> {
        let violations = {
            let mut ctx = WalkContext {
                seen: HashMap::new(),
                violations: Vec::new(),
                registry: self.registry,
            };
            for group in &tree.groups {
                ctx.walk(&group.items, &NodePath::group(&group.name));
            }
            ctx.violations
        };

        if !violations.is_empty() {
            for violation in &violations {
                debug!(kind = violation.kind.name(), path = %violation.path, "violation");
            }
            return Err(SidenavError::Validation { violations });
        }

        debug!(docs = tree.doc_count(), "sidebar valid");
        Ok(ValidatedTree { tree })
    }
}

/// Validate without a registry.
pub fn validate(tree: SidebarTree) -> Result<ValidatedTree> {
    Validator::new().validate(tree)
}

/// State threaded through one validation walk.
struct WalkContext<'t, 'r> {
    /// Doc id → path where it first appeared.
    seen: HashMap<&'t str, NodePath>,
    violations: Vec<Violation>,
    registry: Option<&'r dyn DocRegistry>,
}

impl<'t> WalkContext<'t, '_> {
    fn walk(&mut self, items: &'t [SidebarItem], parent: &NodePath) {
        for (index, item) in items.iter().enumerate() {
            let path = parent.child(index, item.path_label());
            match item {
                SidebarItem::Doc(doc) => self.visit_doc(&doc.id, path),
                SidebarItem::Category(category) => {
                    if category.items.is_empty() {
                        self.violations.push(Violation {
                            kind: ViolationKind::EmptyCategory {
                                label: category.label.clone(),
                            },
                            path: path.clone(),
                        });
                    }
                    self.walk(&category.items, &path);
                }
            }
        }
    }

    fn visit_doc(&mut self, id: &'t str, path: NodePath) {
        if let Some(first_seen) = self.seen.get(id) {
            self.violations.push(Violation {
                kind: ViolationKind::DuplicateId {
                    id: id.to_string(),
                    first_seen: first_seen.clone(),
                },
                path,
            });
            return;
        }

        if let Some(registry) = self.registry {
            if !registry.exists(id) {
                self.violations.push(Violation {
                    kind: ViolationKind::UnknownDocReference { id: id.to_string() },
                    path: path.clone(),
                });
            }
        }

        self.seen.insert(id, path);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
