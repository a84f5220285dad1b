//! Raw sidebar value → typed [`SidebarTree`].
//!
//! Each node is resolved by its `type` discriminator into exactly one of
//! [`SidebarItem::Doc`] or [`SidebarItem::Category`]; nothing downstream
//! inspects raw values again. Unknown keys on a node are ignored so newer
//! sidebar files keep loading.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use sidenav_shared::{
    CategoryNode, DocNode, NodePath, Result, SidebarGroup, SidebarItem, SidebarTree, SidenavError,
};

/// Parse a raw `{ <group>: [node, ...] }` value into a typed tree.
///
/// Fails with [`SidenavError::Schema`] on the first malformed node, naming its
/// position. Structural invariants (unique ids, non-empty categories) are left
/// to the validator.
#[instrument(skip_all)]
pub fn parse(raw: &Value) -> Result<SidebarTree> {
    let root = raw.as_object().ok_or_else(|| {
        SidenavError::schema(
            &NodePath::default(),
            format!("expected a map of groups, found {}", kind_of(raw)),
        )
    })?;

    let mut groups = Vec::with_capacity(root.len());
    for (name, value) in root {
        let path = NodePath::group(name);
        let items = value.as_array().ok_or_else(|| {
            SidenavError::schema(
                &path,
                format!("expected a sequence of items, found {}", kind_of(value)),
            )
        })?;
        groups.push(SidebarGroup {
            name: name.clone(),
            items: parse_items(items, &path)?,
        });
    }

    debug!(groups = groups.len(), "sidebar parsed");
    Ok(SidebarTree { groups })
}

fn parse_items(items: &[Value], parent: &NodePath) -> Result<Vec<SidebarItem>> {
    items
        .iter()
        .enumerate()
        .map(|(index, value)| parse_item(value, parent, index))
        .collect()
}

fn parse_item(value: &Value, parent: &NodePath, index: usize) -> Result<SidebarItem> {
    let path = parent.child(index, category_label_hint(value));

    let node = value.as_object().ok_or_else(|| {
        SidenavError::schema(&path, format!("expected a node map, found {}", kind_of(value)))
    })?;

    let kind = match node.get("type") {
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => {
            return Err(SidenavError::schema(
                &path,
                format!("`type` must be a string, found {}", kind_of(other)),
            ));
        }
        None => return Err(SidenavError::schema(&path, "missing `type` discriminator")),
    };

    match kind {
        "doc" => parse_doc(node, &path).map(SidebarItem::Doc),
        "category" => parse_category(node, &path).map(SidebarItem::Category),
        other => Err(SidenavError::schema(
            &path,
            format!("unknown node type `{other}` (expected `doc` or `category`)"),
        )),
    }
}

fn parse_doc(node: &Map<String, Value>, path: &NodePath) -> Result<DocNode> {
    let id = required_str(node, "id", path)?;
    if id.trim().is_empty() {
        return Err(SidenavError::schema(path, "`id` must not be empty"));
    }
    if id.split('/').any(|segment| segment.trim().is_empty()) {
        return Err(SidenavError::schema(
            path,
            format!("`id` `{id}` has an empty path segment"),
        ));
    }

    Ok(DocNode {
        id: id.to_string(),
        label: optional_str(node, "label", path)?.map(str::to_owned),
    })
}

fn parse_category(node: &Map<String, Value>, path: &NodePath) -> Result<CategoryNode> {
    let label = required_str(node, "label", path)?;

    let items = match node.get("items") {
        Some(Value::Array(items)) => parse_items(items, path)?,
        Some(other) => {
            return Err(SidenavError::schema(
                path,
                format!("`items` must be a sequence, found {}", kind_of(other)),
            ));
        }
        None => return Err(SidenavError::schema(path, "category is missing `items`")),
    };

    let collapsed = match node.get("collapsed") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(collapsed)) => *collapsed,
        Some(other) => {
            return Err(SidenavError::schema(
                path,
                format!("`collapsed` must be a boolean, found {}", kind_of(other)),
            ));
        }
    };

    Ok(CategoryNode {
        label: label.to_string(),
        items,
        collapsed,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Category label to show in error paths, when the node looks like a category.
fn category_label_hint(value: &Value) -> Option<&str> {
    match value.get("type").and_then(Value::as_str) {
        Some("category") => value.get("label").and_then(Value::as_str),
        _ => None,
    }
}

fn required_str<'a>(node: &'a Map<String, Value>, key: &str, path: &NodePath) -> Result<&'a str> {
    optional_str(node, key, path)?
        .ok_or_else(|| SidenavError::schema(path, format!("missing required `{key}`")))
}

fn optional_str<'a>(
    node: &'a Map<String, Value>,
    key: &str,
    path: &NodePath,
) -> Result<Option<&'a str>> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(SidenavError::schema(
            path,
            format!("`{key}` must be a string, found {}", kind_of(other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
