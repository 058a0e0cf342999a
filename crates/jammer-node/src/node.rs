//! Node records as served by the node API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a node. `0` is never a real node and marks "none" in
/// fields such as [`Node::author`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node type for content items (games, tools, ...)
pub const TYPE_ITEM: &str = "item";
/// Node type for user accounts
pub const TYPE_USER: &str = "user";
/// Sub-subtype of items entered in the compo
pub const SUBSUBTYPE_COMPO: &str = "compo";

/// A content item or a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub subsubtype: String,
    /// Owner ("main author") of the node
    #[serde(default)]
    pub author: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub meta: NodeMeta,
}

/// Link-derived metadata attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMeta {
    /// Users linked to this node as authors
    #[serde(default)]
    pub author: Vec<NodeId>,
}

impl Node {
    /// Create a user node.
    pub fn user(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        let id = id.into();
        let name = name.into();
        Self {
            id,
            node_type: TYPE_USER.to_string(),
            slug: name.to_lowercase(),
            name,
            ..Default::default()
        }
    }

    /// Create an item node owned by `author`.
    pub fn item(
        id: impl Into<NodeId>,
        subtype: impl Into<String>,
        author: impl Into<NodeId>,
        name: impl Into<String>,
    ) -> Self {
        let author = author.into();
        Self {
            id: id.into(),
            node_type: TYPE_ITEM.to_string(),
            subtype: subtype.into(),
            author,
            name: name.into(),
            meta: NodeMeta {
                author: vec![author],
            },
            ..Default::default()
        }
    }

    /// Builder-style setter for the sub-subtype.
    pub fn with_subsubtype(mut self, subsubtype: impl Into<String>) -> Self {
        self.subsubtype = subsubtype.into();
        self
    }

    #[inline]
    pub fn is_item(&self) -> bool {
        self.node_type == TYPE_ITEM
    }

    #[inline]
    pub fn is_user(&self) -> bool {
        self.node_type == TYPE_USER
    }

    /// Whether the item is entered in the single-author competition.
    #[inline]
    pub fn is_compo(&self) -> bool {
        self.subsubtype == SUBSUBTYPE_COMPO
    }

    /// Whether `user` is the owner of this node.
    #[inline]
    pub fn is_owned_by(&self, user: NodeId) -> bool {
        !self.author.is_none() && self.author == user
    }
}

/// Star (follow) relation ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarList {
    #[serde(default)]
    pub star: Vec<NodeId>,
}

/// The `getmy` envelope: the signed-in user plus their relations.
///
/// `meta.star` holds the users this user follows, `refs.star` the users
/// following back. A friend appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyNode {
    pub node: Node,
    #[serde(default)]
    pub meta: StarList,
    #[serde(default)]
    pub refs: StarList,
}

/// Kind of relation created or removed by a link call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRelation {
    /// Co-authorship of an item
    Author,
}

impl LinkRelation {
    /// Key used for the relation in link payloads.
    pub fn key(&self) -> &'static str {
        match self {
            LinkRelation::Author => "author",
        }
    }

    /// Request body for link calls, e.g. `{"author": null}`.
    pub fn body(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(self.key().to_string(), Value::Null);
        Value::Object(body)
    }
}

impl std::fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
