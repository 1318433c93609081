//! Arena-backed ESTree nodes

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

use super::kind::{NodeKind, walk_order};

/// Handle to a node inside an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Contents of a child-bearing field.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(NodeId),
    /// Ordered children; `None` marks a hole such as `[a, , b]`.
    List(Vec<Option<NodeId>>),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    children: BTreeMap<String, Child>,
    props: Map<String, Value>,
    parent: Option<NodeId>,
    synthetic: bool,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: BTreeMap::new(),
            props: Map::new(),
            parent: None,
            synthetic: false,
        }
    }

    pub fn child(&self, field: &str) -> Option<&Child> {
        self.children.get(field)
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    /// Parent recorded by the most recent walk that reached this node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True for the null placeholders a walker creates when walking nulls.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    fn field_slots(&self, field: &str) -> Vec<Option<NodeId>> {
        match self.children.get(field) {
            Some(Child::Node(id)) => vec![Some(*id)],
            Some(Child::List(items)) => items.clone(),
            None => Vec::new(),
        }
    }

    /// Short human-readable description: identifier name, literal text,
    /// operator, or declaration kind.
    pub fn label(&self) -> Option<String> {
        let text = |key: &str| self.props.get(key).and_then(Value::as_str);

        match self.kind {
            NodeKind::Identifier => text("name").map(str::to_string),
            NodeKind::Literal => text("raw")
                .map(str::to_string)
                .or_else(|| self.props.get("value").map(|v| v.to_string())),
            NodeKind::TemplateElement => self
                .props
                .get("value")
                .and_then(|v| v.get("raw").or_else(|| v.get("cooked")))
                .and_then(Value::as_str)
                .map(|raw| format!("`{}`", raw)),
            NodeKind::BinaryExpression
            | NodeKind::LogicalExpression
            | NodeKind::AssignmentExpression
            | NodeKind::UnaryExpression
            | NodeKind::UpdateExpression => text("operator").map(str::to_string),
            NodeKind::VariableDeclaration => text("kind").map(str::to_string),
            NodeKind::Property | NodeKind::MethodDefinition => text("kind")
                .filter(|k| *k != "init" && *k != "method")
                .map(str::to_string),
            _ => None,
        }
    }
}

/// An ESTree document stored as an arena of nodes.
///
/// The arena owns every node; [`NodeId`] handles stay valid for the
/// lifetime of the `Ast`. Parent back-references are written by the
/// walker, not by parsing.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an ESTree document from JSON text. The root is the first node.
    pub fn from_json(text: &str) -> Result<(Self, NodeId)> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::Json {
            path: "<input>".into(),
            source: e,
        })?;
        Self::from_value(&value)
    }

    /// Build an arena from an already-parsed JSON value.
    ///
    /// Objects with a string `type` member become nodes, arrays made only of
    /// nodes and nulls become child lists, everything else is kept as a
    /// scalar property.
    pub fn from_value(value: &Value) -> Result<(Self, NodeId)> {
        let mut ast = Ast::new();
        let root_obj = as_node_object(value)
            .ok_or_else(|| Error::invalid_ast("root is not an object with a string \"type\""))?;
        let root = ast.add_node(node_kind_of(root_obj));

        let mut pending: Vec<(NodeId, &Map<String, Value>)> = vec![(root, root_obj)];
        while let Some((id, obj)) = pending.pop() {
            for (key, member) in obj {
                if key == "type" {
                    continue;
                }
                if let Some(child_obj) = as_node_object(member) {
                    let child = ast.add_node(node_kind_of(child_obj));
                    ast.set_child(id, key, Child::Node(child));
                    pending.push((child, child_obj));
                    continue;
                }
                if let Some(items) = member.as_array().filter(|items| is_node_list(items)) {
                    let mut list = Vec::with_capacity(items.len());
                    for item in items {
                        match as_node_object(item) {
                            Some(child_obj) => {
                                let child = ast.add_node(node_kind_of(child_obj));
                                list.push(Some(child));
                                pending.push((child, child_obj));
                            }
                            None => list.push(None),
                        }
                    }
                    ast.set_child(id, key, Child::List(list));
                    continue;
                }
                ast.set_prop(id, key, member.clone());
            }
        }

        Ok((ast, root))
    }

    /// Append a detached node of the given kind.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    pub fn set_child(&mut self, id: NodeId, field: &str, child: Child) {
        self.nodes[id.0].children.insert(field.to_string(), child);
    }

    pub fn set_prop(&mut self, id: NodeId, key: &str, value: Value) {
        self.nodes[id.0].props.insert(key.to_string(), value);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Ancestors of `id`, nearest first, following recorded parents.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            ast: self,
            next: self.parent(id),
        }
    }

    /// Child slots of `id` in visiting order, with `None` for absent slots
    /// and list holes.
    ///
    /// Template literals interleave `quasis` and `expressions` and always
    /// end with the chunk after the last expression, absent if the template
    /// has no such chunk. Returns `None` when the node's kind has no walk
    /// order.
    pub fn child_slots(&self, id: NodeId) -> Option<Vec<Option<NodeId>>> {
        let node = &self.nodes[id.0];
        let order = walk_order(&node.kind)?;

        let mut slots = Vec::new();
        if node.kind == NodeKind::TemplateLiteral {
            let quasis = node.field_slots("quasis");
            let expressions = node.field_slots("expressions");
            for (i, expression) in expressions.iter().enumerate() {
                slots.push(quasis.get(i).copied().flatten());
                slots.push(*expression);
            }
            slots.push(quasis.get(expressions.len()).copied().flatten());
        } else {
            for field in order {
                match node.children.get(*field) {
                    Some(Child::Node(child)) => slots.push(Some(*child)),
                    Some(Child::List(items)) => slots.extend(items.iter().copied()),
                    None => slots.push(None),
                }
            }
        }
        Some(slots)
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id.0].parent = parent;
    }

    /// Append a `null` literal placeholder attributed to `parent`.
    pub(crate) fn push_null_placeholder(&mut self, parent: NodeId) -> NodeId {
        let id = self.add_node(NodeKind::Literal);
        let node = &mut self.nodes[id.0];
        node.props.insert("raw".to_string(), Value::from("null"));
        node.props.insert("value".to_string(), Value::Null);
        node.parent = Some(parent);
        node.synthetic = true;
        id
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}

pub struct Ancestors<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.ast.parent(current);
        Some(current)
    }
}

fn as_node_object(value: &Value) -> Option<&Map<String, Value>> {
    value
        .as_object()
        .filter(|obj| obj.get("type").is_some_and(Value::is_string))
}

fn node_kind_of(obj: &Map<String, Value>) -> NodeKind {
    let tag = obj.get("type").and_then(Value::as_str).unwrap_or_default();
    match tag.parse() {
        Ok(kind) => kind,
        Err(never) => match never {},
    }
}

fn is_node_list(items: &[Value]) -> bool {
    items
        .iter()
        .all(|item| item.is_null() || as_node_object(item).is_some())
}
