//! The data API consumed by UI components.

use async_trait::async_trait;

use crate::error::Result;
use crate::node::{LinkRelation, MyNode, Node, NodeId};

/// Access to the node data service.
///
/// Implementations must be shareable across tasks; hosts typically keep one
/// behind an `Arc<dyn NodeService>`.
#[async_trait]
pub trait NodeService: Send + Sync {
    /// Fetch the signed-in user along with their star relations.
    async fn get_my(&self) -> Result<MyNode>;

    /// Fetch node records. Unknown ids are skipped, so the result may be
    /// shorter than `ids`.
    async fn get(&self, ids: &[NodeId]) -> Result<Vec<Node>>;

    /// Create a `relation` link from `node` to `other`.
    async fn add_link(&self, node: NodeId, other: NodeId, relation: LinkRelation) -> Result<()>;

    /// Remove a `relation` link from `node` to `other`.
    async fn remove_link(&self, node: NodeId, other: NodeId, relation: LinkRelation)
        -> Result<()>;
}
