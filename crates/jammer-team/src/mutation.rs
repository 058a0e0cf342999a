//! Add/remove requests against the author relation.

use jammer_node::{LinkRelation, NodeError, NodeId, NodeService};

/// Direction of a membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Add,
    Remove,
}

impl MutationKind {
    /// Change in team size reported to the host on success.
    pub fn delta(&self) -> i32 {
        match self {
            MutationKind::Add => 1,
            MutationKind::Remove => -1,
        }
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::Add => write!(f, "add"),
            MutationKind::Remove => write!(f, "remove"),
        }
    }
}

/// A pending membership change, produced by the component and sent by the
/// host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkRequest {
    pub node: NodeId,
    pub user: NodeId,
    pub kind: MutationKind,
}

impl LinkRequest {
    pub fn new(node: NodeId, user: NodeId, kind: MutationKind) -> Self {
        Self { node, user, kind }
    }

    /// Issue the link call.
    pub async fn send<S>(&self, service: &S) -> Result<(), NodeError>
    where
        S: NodeService + ?Sized,
    {
        tracing::debug!("Sending {} of user {} on node {}", self.kind, self.user, self.node);
        match self.kind {
            MutationKind::Add => {
                service
                    .add_link(self.node, self.user, LinkRelation::Author)
                    .await
            }
            MutationKind::Remove => {
                service
                    .remove_link(self.node, self.user, LinkRelation::Author)
                    .await
            }
        }
    }

    /// Message shown when the call fails.
    pub fn failure_message(&self, err: &NodeError) -> String {
        match self.kind {
            MutationKind::Add => err.to_string(),
            MutationKind::Remove => {
                format!("Requesting removing user {} caused {}", self.user, err)
            }
        }
    }
}
