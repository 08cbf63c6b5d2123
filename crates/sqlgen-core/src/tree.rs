//! Annotated field tree consumed by the schema builder.
//!
//! A tree describes one record type: the root node is the record itself,
//! interior nodes are nested structs, and every leaf (edge) becomes a column.
//! Nodes live in an arena and refer to each other by [`NodeId`], so the
//! parent link is a plain index rather than an owning pointer.

use serde::{Deserialize, Serialize};

/// Index of a node inside its [`FieldTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    /// Returns the arena position of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Source-language kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Interface,
    Bytes,
    String,
    Map,
    Slice,
    Struct,
    Pointer,
    /// A type the field tree source could not classify.
    Other,
}

impl Kind {
    /// Resolves a declared type string to its kind.
    ///
    /// Named types that are not built in resolve to [`Kind::Other`].
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Self {
        let type_name = type_name.trim();
        match type_name {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" | "rune" => Self::Int32,
            "int64" => Self::Int64,
            "uint" => Self::Uint,
            "uint8" | "byte" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "complex64" => Self::Complex64,
            "complex128" => Self::Complex128,
            "string" => Self::String,
            "[]byte" | "[]uint8" => Self::Bytes,
            "interface{}" | "any" => Self::Interface,
            _ if type_name.starts_with("[]") => Self::Slice,
            _ if type_name.starts_with("map[") => Self::Map,
            _ if type_name.starts_with('*') => Self::Pointer,
            _ => Self::Other,
        }
    }
}

/// Per-field annotations attached by the field tree source.
///
/// Every attribute is optional; string-valued tags hold the raw tag text,
/// which the schema builder parses itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tags {
    /// Leave the field out of the table entirely.
    pub skip: bool,
    /// Override for this path segment when deriving column names.
    pub name: Option<String>,
    pub primary: bool,
    pub auto: bool,
    /// Column size; 0 lets the dialect choose.
    pub size: usize,
    /// Explicit SQL type name (`varchar`, `long`, `MEDIUMTEXT`, ...).
    #[serde(rename = "type")]
    pub sql_type: Option<String>,
    /// Index tag: `name[@operator[@argOrder]]` entries separated by `;`.
    pub index: Option<String>,
    /// Same grammar as `index`; forces the named indexes to be unique.
    pub unique: Option<String>,
    /// Foreign-key tag: `sourceColumn@targetTable[@group]` entries separated by `;`.
    pub foreign: Option<String>,
    /// Group name used by foreign-key entries that do not name one.
    pub foreign_group: Option<String>,
    /// The table holding this field is the "many" side of the relation.
    pub many: bool,
    /// Overrides the derived table name.
    pub table_name: Option<String>,
}

/// One node of the field tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: Kind,
    /// Declared type as written in the source record.
    pub type_name: String,
    pub tags: Option<Tags>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Creates a detached node; [`FieldTree::push`] links it into a tree.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: Kind, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: type_name.into(),
            tags: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates a node whose kind is derived from its declared type.
    #[must_use]
    pub fn typed(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self::new(name, Kind::from_type_name(&type_name), type_name)
    }

    /// Attaches tags to the node.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true when the node carries a `skip` tag.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.tags.as_ref().is_some_and(|t| t.skip)
    }
}

/// Arena of nodes describing one record type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "NodeDef")]
pub struct FieldTree {
    nodes: Vec<Node>,
}

impl FieldTree {
    /// Creates a tree containing only the root record node.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(name, Kind::Struct, type_name)],
        }
    }

    /// Appends `node` as the last child of `parent` and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "unknown parent node {parent:?}");
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Returns the node with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the leaf nodes below the root in declaration order.
    #[must_use]
    pub fn edges(&self) -> Vec<NodeId> {
        let mut edges = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.children.is_empty() {
                edges.push(id);
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        edges
    }

    /// Returns the nodes from the root down to `id`, both included.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<&Node> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            path.push(node);
            current = node.parent;
        }
        path.reverse();
        path
    }

    fn attach(&mut self, parent: NodeId, def: NodeDef) {
        let (node, children) = def.into_node();
        let id = self.push(parent, node);
        for child in children {
            self.attach(id, child);
        }
    }
}

/// Nested, serializable form of a field tree.
#[derive(Debug, Clone, Deserialize)]
struct NodeDef {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    kind: Option<Kind>,
    #[serde(default)]
    tags: Option<Tags>,
    #[serde(default)]
    children: Vec<NodeDef>,
}

impl NodeDef {
    fn into_node(self) -> (Node, Vec<Self>) {
        let kind = self
            .kind
            .unwrap_or_else(|| Kind::from_type_name(&self.type_name));
        let mut node = Node::new(self.name, kind, self.type_name);
        node.tags = self.tags;
        (node, self.children)
    }
}

impl From<NodeDef> for FieldTree {
    fn from(def: NodeDef) -> Self {
        let (mut root, children) = def.into_node();
        if root.kind == Kind::Other {
            root.kind = Kind::Struct;
        }
        let mut tree = Self { nodes: vec![root] };
        for child in children {
            tree.attach(NodeId::ROOT, child);
        }
        tree
    }
}
