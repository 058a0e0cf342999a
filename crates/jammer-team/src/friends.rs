//! Friend list loading.
//!
//! A friend is a user the viewer stars who also stars the viewer back.

use thiserror::Error;

use jammer_node::{MyNode, Node, NodeError, NodeId, NodeService};

/// Failure while loading the friend list. The display text is what the
/// component shows to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FriendsError {
    /// The signed-in user could not be fetched
    #[error("Error getting friends-list {0}")]
    Profile(NodeError),

    /// The friend records could not be fetched
    #[error("Error fetching friends {0}")]
    Friends(NodeError),
}

/// Ids of mutual stars, in the order the user starred them.
///
/// Empty unless both star lists are non-empty.
pub fn mutual_star_ids(my: &MyNode) -> Vec<NodeId> {
    if my.meta.star.is_empty() || my.refs.star.is_empty() {
        return Vec::new();
    }
    my.meta
        .star
        .iter()
        .filter(|id| my.refs.star.contains(*id))
        .copied()
        .collect()
}

/// Fetch the signed-in user's friends.
///
/// No second request is made when the user has no mutual stars.
pub async fn fetch_friends<S>(service: &S) -> Result<Vec<Node>, FriendsError>
where
    S: NodeService + ?Sized,
{
    let my = service.get_my().await.map_err(FriendsError::Profile)?;
    let ids = mutual_star_ids(&my);
    if ids.is_empty() {
        tracing::debug!("User {} has no mutual stars", my.node.id);
        return Ok(Vec::new());
    }

    let friends = service.get(&ids).await.map_err(FriendsError::Friends)?;
    tracing::debug!("Loaded {} friends for user {}", friends.len(), my.node.id);
    Ok(friends)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jammer_node::StarList;

    fn my(stars: &[u64], refs: &[u64]) -> MyNode {
        MyNode {
            node: Node::user(1, "ada"),
            meta: StarList {
                star: stars.iter().copied().map(NodeId).collect(),
            },
            refs: StarList {
                star: refs.iter().copied().map(NodeId).collect(),
            },
        }
    }

    #[test]
    fn test_mutual_keeps_star_order() {
        assert_eq!(
            mutual_star_ids(&my(&[5, 3, 4], &[3, 4, 5, 9])),
            vec![NodeId(5), NodeId(3), NodeId(4)]
        );
    }

    #[test]
    fn test_mutual_drops_one_sided_stars() {
        assert_eq!(mutual_star_ids(&my(&[3, 4], &[4, 8])), vec![NodeId(4)]);
    }

    #[test]
    fn test_mutual_empty_lists() {
        assert!(mutual_star_ids(&my(&[], &[1, 2])).is_empty());
        assert!(mutual_star_ids(&my(&[1, 2], &[])).is_empty());
    }

    #[test]
    fn test_error_messages() {
        let err = FriendsError::Profile(NodeError::Timeout);
        assert_eq!(err.to_string(), "Error getting friends-list Timeout");

        let err = FriendsError::Friends(NodeError::NotFound(NodeId(4)));
        assert_eq!(err.to_string(), "Error fetching friends Node not found: 4");
    }
}
