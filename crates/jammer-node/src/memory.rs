//! In-process node service.
//!
//! Holds a small node graph in memory. Used by tests and by the TUI's demo
//! mode; link calls update the item's `meta.author` the way the real API
//! does.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{NodeError, Result};
use crate::node::{LinkRelation, MyNode, Node, NodeId, StarList};
use crate::service::NodeService;

#[derive(Debug, Default)]
struct MemoryState {
    nodes: BTreeMap<NodeId, Node>,
    me: Option<NodeId>,
    stars: Vec<NodeId>,
    star_refs: Vec<NodeId>,
    refused_links: HashSet<NodeId>,
    get_my_failure: Option<NodeError>,
    get_failure: Option<NodeError>,
    get_calls: usize,
    link_calls: usize,
}

/// Node service backed by an in-memory map.
#[derive(Debug, Default)]
pub struct MemoryNodeService {
    state: Mutex<MemoryState>,
}

impl MemoryNodeService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert or replace a node.
    pub fn insert(&self, node: Node) {
        self.lock().nodes.insert(node.id, node);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_node(self, node: Node) -> Self {
        self.insert(node);
        self
    }

    /// Set the signed-in user.
    pub fn sign_in(&self, user: NodeId) {
        self.lock().me = Some(user);
    }

    /// Set the signed-in user's star lists: `stars` are users they follow,
    /// `refs` users following them.
    pub fn set_stars(&self, stars: Vec<NodeId>, refs: Vec<NodeId>) {
        let mut state = self.lock();
        state.stars = stars;
        state.star_refs = refs;
    }

    /// Make future link calls targeting `user` fail.
    pub fn refuse_links_for(&self, user: NodeId) {
        self.lock().refused_links.insert(user);
    }

    /// Make future `get_my` calls fail with `err`.
    pub fn fail_get_my(&self, err: NodeError) {
        self.lock().get_my_failure = Some(err);
    }

    /// Make future `get` calls fail with `err`.
    pub fn fail_get(&self, err: NodeError) {
        self.lock().get_failure = Some(err);
    }

    /// Snapshot of a stored node.
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.lock().nodes.get(&id).cloned()
    }

    /// Number of `get` calls served so far.
    pub fn get_calls(&self) -> usize {
        self.lock().get_calls
    }

    /// Number of link add/remove calls served so far.
    pub fn link_calls(&self) -> usize {
        self.lock().link_calls
    }

    fn update_link(
        &self,
        node: NodeId,
        other: NodeId,
        relation: LinkRelation,
        add: bool,
    ) -> Result<()> {
        let mut state = self.lock();
        state.link_calls += 1;

        if state.refused_links.contains(&other) {
            return Err(NodeError::Rejected(format!(
                "{} link between {} and {} not permitted",
                relation, node, other
            )));
        }
        if !state.nodes.contains_key(&other) {
            return Err(NodeError::NotFound(other));
        }
        let target = state
            .nodes
            .get_mut(&node)
            .ok_or(NodeError::NotFound(node))?;

        match relation {
            LinkRelation::Author => {
                let authors = &mut target.meta.author;
                if add {
                    if !authors.contains(&other) {
                        authors.push(other);
                    }
                } else {
                    authors.retain(|id| *id != other);
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl NodeService for MemoryNodeService {
    async fn get_my(&self) -> Result<MyNode> {
        let state = self.lock();
        if let Some(err) = &state.get_my_failure {
            return Err(err.clone());
        }

        let me = state.me.ok_or_else(|| NodeError::Status {
            status: 401,
            message: "Not logged in".to_string(),
        })?;
        let node = state.nodes.get(&me).cloned().ok_or(NodeError::NotFound(me))?;

        Ok(MyNode {
            node,
            meta: StarList {
                star: state.stars.clone(),
            },
            refs: StarList {
                star: state.star_refs.clone(),
            },
        })
    }

    async fn get(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        let mut state = self.lock();
        state.get_calls += 1;
        if let Some(err) = &state.get_failure {
            return Err(err.clone());
        }

        Ok(ids
            .iter()
            .filter_map(|id| state.nodes.get(id).cloned())
            .collect())
    }

    async fn add_link(&self, node: NodeId, other: NodeId, relation: LinkRelation) -> Result<()> {
        self.update_link(node, other, relation, true)
    }

    async fn remove_link(
        &self,
        node: NodeId,
        other: NodeId,
        relation: LinkRelation,
    ) -> Result<()> {
        self.update_link(node, other, relation, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryNodeService {
        let service = MemoryNodeService::new()
            .with_node(Node::user(1, "ada"))
            .with_node(Node::user(2, "bo"))
            .with_node(Node::item(100, "game", 1, "Tiny Tower"));
        service.sign_in(NodeId(1));
        service
    }

    #[tokio::test]
    async fn test_get_my_requires_sign_in() {
        let service = MemoryNodeService::new().with_node(Node::user(1, "ada"));
        let err = service.get_my().await.unwrap_err();
        assert!(matches!(err, NodeError::Status { status: 401, .. }));

        service.sign_in(NodeId(1));
        assert_eq!(service.get_my().await.unwrap().node.name, "ada");
    }

    #[tokio::test]
    async fn test_get_skips_unknown_ids() {
        let service = seeded();
        let nodes = service.get(&[NodeId(2), NodeId(77), NodeId(1)]).await.unwrap();
        let ids: Vec<_> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NodeId(2), NodeId(1)]);
        assert_eq!(service.get_calls(), 1);
    }

    #[tokio::test]
    async fn test_links_update_authors() {
        let service = seeded();
        service
            .add_link(NodeId(100), NodeId(2), LinkRelation::Author)
            .await
            .unwrap();
        service
            .add_link(NodeId(100), NodeId(2), LinkRelation::Author)
            .await
            .unwrap();
        assert_eq!(
            service.node(NodeId(100)).unwrap().meta.author,
            vec![NodeId(1), NodeId(2)]
        );

        service
            .remove_link(NodeId(100), NodeId(2), LinkRelation::Author)
            .await
            .unwrap();
        assert_eq!(
            service.node(NodeId(100)).unwrap().meta.author,
            vec![NodeId(1)]
        );
        assert_eq!(service.link_calls(), 3);
    }

    #[tokio::test]
    async fn test_refused_and_missing_links() {
        let service = seeded();
        service.refuse_links_for(NodeId(2));

        let err = service
            .add_link(NodeId(100), NodeId(2), LinkRelation::Author)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeError::Rejected(_)));

        let err = service
            .add_link(NodeId(555), NodeId(1), LinkRelation::Author)
            .await
            .unwrap_err();
        assert_eq!(err, NodeError::NotFound(NodeId(555)));
    }
}
