//! Navigation queries over a [`ValidatedTree`].
//!
//! The flattened sequence is a pre-order walk of a group in authored order;
//! "previous" and "next" are neighbours in that sequence. Nothing is cached:
//! every query walks the tree again.

use tracing::instrument;

use sidenav_shared::{DocNode, Result, SidebarItem, SidenavError};

use crate::validate::ValidatedTree;

/// The documents before and after a given one in its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'t> {
    pub previous: Option<&'t DocNode>,
    pub next: Option<&'t DocNode>,
}

/// Every doc node in the tree, group by group, in pre-order.
///
/// With a single group this is the navigation sequence. With several groups
/// the groups are concatenated, and next/previous are still taken per group:
/// use [`flatten_group`] or [`neighbors`] for navigation.
pub fn flatten(tree: &ValidatedTree) -> Vec<&DocNode> {
    let mut docs = Vec::with_capacity(tree.doc_count());
    for group in &tree.groups {
        collect_docs(&group.items, &mut docs);
    }
    docs
}

/// Doc nodes of one named group, in pre-order.
pub fn flatten_group<'t>(tree: &'t ValidatedTree, group: &str) -> Result<Vec<&'t DocNode>> {
    let group = tree
        .group(group)
        .ok_or_else(|| SidenavError::not_found(format!("group `{group}`")))?;

    let mut docs = Vec::new();
    collect_docs(&group.items, &mut docs);
    Ok(docs)
}

/// Previous and next documents of `doc_id` within its own group.
#[instrument(skip(tree))]
pub fn neighbors<'t>(tree: &'t ValidatedTree, doc_id: &str) -> Result<Neighbors<'t>> {
    for group in &tree.groups {
        let mut docs = Vec::new();
        collect_docs(&group.items, &mut docs);

        if let Some(pos) = docs.iter().position(|doc| doc.id == doc_id) {
            return Ok(Neighbors {
                previous: pos.checked_sub(1).map(|i| docs[i]),
                next: docs.get(pos + 1).copied(),
            });
        }
    }

    Err(SidenavError::not_found(format!("doc `{doc_id}`")))
}

/// Labels of the categories enclosing `doc_id`, outermost first.
#[instrument(skip(tree))]
pub fn breadcrumb<'t>(tree: &'t ValidatedTree, doc_id: &str) -> Result<Vec<&'t str>> {
    let mut trail = Vec::new();
    for group in &tree.groups {
        if find_trail(&group.items, doc_id, &mut trail) {
            return Ok(trail);
        }
    }

    Err(SidenavError::not_found(format!("doc `{doc_id}`")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn collect_docs<'t>(items: &'t [SidebarItem], out: &mut Vec<&'t DocNode>) {
    for item in items {
        match item {
            SidebarItem::Doc(doc) => out.push(doc),
            SidebarItem::Category(category) => collect_docs(&category.items, out),
        }
    }
}

/// Depth-first search; on success `trail` holds the enclosing labels.
fn find_trail<'t>(items: &'t [SidebarItem], doc_id: &str, trail: &mut Vec<&'t str>) -> bool {
    for item in items {
        match item {
            SidebarItem::Doc(doc) if doc.id == doc_id => return true,
            SidebarItem::Doc(_) => {}
            SidebarItem::Category(category) => {
                trail.push(&category.label);
                if find_trail(&category.items, doc_id, trail) {
                    return true;
                }
                trail.pop();
            }
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::model::parse;
    use crate::validate::validate;

    fn build(raw: serde_json::Value) -> ValidatedTree {
        validate(parse(&raw).expect("parse")).expect("validate")
    }

    fn ids<'a>(docs: &[&'a DocNode]) -> Vec<&'a str> {
        docs.iter().map(|doc| doc.id.as_str()).collect()
    }

    fn load_fixture() -> ValidatedTree {
        let content = std::fs::read_to_string("../../../fixtures/json/sidebars.fixture.json")
            .expect("read fixture");
        build(serde_json::from_str(&content).expect("fixture json"))
    }

    #[test]
    fn flatten_preserves_authored_order() {
        let tree = build(json!({
            "docs": [
                { "type": "doc", "id": "doc-a" },
                {
                    "type": "category",
                    "label": "Cat",
                    "items": [
                        { "type": "doc", "id": "doc-b" },
                        { "type": "doc", "id": "doc-c" }
                    ]
                },
                { "type": "doc", "id": "doc-d" }
            ]
        }));

        assert_eq!(ids(&flatten(&tree)), ["doc-a", "doc-b", "doc-c", "doc-d"]);
    }

    #[test]
    fn breadcrumb_lists_enclosing_categories() {
        let tree = build(json!({
            "docs": [
                { "type": "doc", "id": "welcome" },
                {
                    "type": "category",
                    "label": "Key Concepts",
                    "items": [
                        {
                            "type": "category",
                            "label": "Channels Protocol",
                            "items": [{ "type": "doc", "id": "overview" }]
                        }
                    ]
                }
            ]
        }));

        assert_eq!(
            breadcrumb(&tree, "overview").expect("breadcrumb"),
            ["Key Concepts", "Channels Protocol"]
        );
        assert!(breadcrumb(&tree, "welcome").expect("breadcrumb").is_empty());
    }

    #[test]
    fn breadcrumb_backtracks_out_of_sibling_categories() {
        let tree = build(json!({
            "docs": [
                { "type": "category", "label": "A", "items": [{ "type": "doc", "id": "a1" }] },
                { "type": "category", "label": "B", "items": [{ "type": "doc", "id": "b1" }] }
            ]
        }));
        assert_eq!(breadcrumb(&tree, "b1").expect("breadcrumb"), ["B"]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let tree = build(json!({ "docs": [{ "type": "doc", "id": "a" }] }));

        let err = breadcrumb(&tree, "stale").unwrap_err();
        assert!(matches!(err, SidenavError::NotFound { .. }));
        assert!(neighbors(&tree, "stale").is_err());
        assert!(flatten_group(&tree, "api").is_err());
    }

    #[test]
    fn neighbors_follow_flattened_sequence() {
        let tree = build(json!({
            "docs": [
                { "type": "doc", "id": "doc-a" },
                { "type": "category", "label": "C", "items": [{ "type": "doc", "id": "doc-b" }] },
                { "type": "doc", "id": "doc-c" }
            ]
        }));

        let first = neighbors(&tree, "doc-a").expect("doc-a");
        assert_eq!(first.previous, None);
        assert_eq!(first.next.map(|d| d.id.as_str()), Some("doc-b"));

        let middle = neighbors(&tree, "doc-b").expect("doc-b");
        assert_eq!(middle.previous.map(|d| d.id.as_str()), Some("doc-a"));
        assert_eq!(middle.next.map(|d| d.id.as_str()), Some("doc-c"));

        let last = neighbors(&tree, "doc-c").expect("doc-c");
        assert_eq!(last.previous.map(|d| d.id.as_str()), Some("doc-b"));
        assert_eq!(last.next, None);
    }

    #[test]
    fn neighbors_stay_within_group() {
        let tree = build(json!({
            "api": [{ "type": "doc", "id": "api-intro" }],
            "docs": [{ "type": "doc", "id": "intro" }, { "type": "doc", "id": "setup" }]
        }));

        let api = neighbors(&tree, "api-intro").expect("api-intro");
        assert_eq!((api.previous, api.next), (None, None));
        assert_eq!(ids(&flatten_group(&tree, "docs").expect("docs")), ["intro", "setup"]);
    }

    #[test]
    fn flatten_concatenates_groups_while_neighbors_use_each_group() {
        let tree = build(json!({
            "api": [{ "type": "doc", "id": "api-intro" }, { "type": "doc", "id": "api-auth" }],
            "docs": [{ "type": "doc", "id": "intro" }, { "type": "doc", "id": "setup" }]
        }));

        let mut concatenated = Vec::new();
        for group in &tree.groups {
            concatenated.extend(ids(&flatten_group(&tree, &group.name).expect("group")));
        }
        assert_eq!(ids(&flatten(&tree)), concatenated);

        for group in &tree.groups {
            let docs = flatten_group(&tree, &group.name).expect("group");
            for (pos, doc) in docs.iter().enumerate() {
                let around = neighbors(&tree, &doc.id).expect("neighbors");
                let expected_prev = pos.checked_sub(1).map(|i| docs[i].id.as_str());
                let expected_next = docs.get(pos + 1).map(|d| d.id.as_str());
                assert_eq!(around.previous.map(|d| d.id.as_str()), expected_prev);
                assert_eq!(around.next.map(|d| d.id.as_str()), expected_next);
            }
        }
    }

    #[test]
    fn fixture_traversal() {
        let tree = load_fixture();
        let docs = flatten_group(&tree, "docs").expect("docs group");

        assert_eq!(docs.first().map(|d| d.id.as_str()), Some("welcome"));
        assert_eq!(docs.len(), tree.doc_count());
        assert_eq!(
            breadcrumb(&tree, "channels-protocol/overview").expect("breadcrumb"),
            ["Key Concepts", "Channels Protocol"]
        );
        // Unlabelled docs fall back to the last id segment.
        let getting_started = docs
            .iter()
            .find(|d| d.id == "libraries/rust/getting-started")
            .expect("rust getting started");
        assert_eq!(getting_started.label(), "Getting Started");
    }

    #[test]
    fn reparsing_is_idempotent() {
        let first = load_fixture();
        let second = load_fixture();

        assert_eq!(first, second);
        assert_eq!(ids(&flatten(&first)), ids(&flatten(&second)));
        for doc in flatten(&first) {
            assert_eq!(
                breadcrumb(&first, &doc.id).expect("first"),
                breadcrumb(&second, &doc.id).expect("second")
            );
        }
    }
}
