//! Host-side duties: resolving the props the component needs and applying
//! the membership changes it reports.

use jammer_node::{Node, NodeError, NodeId, NodeService};
use jammer_team::TeamProps;

/// Fetch the viewer, the item and its authors.
pub async fn load_props<S>(service: &S, node_id: NodeId) -> Result<TeamProps, NodeError>
where
    S: NodeService + ?Sized,
{
    let my = service.get_my().await?;
    let node = service
        .get(&[node_id])
        .await?
        .into_iter()
        .next()
        .ok_or(NodeError::NotFound(node_id))?;

    let mut author_ids = node.meta.author.clone();
    if !node.author.is_none() && !author_ids.contains(&node.author) {
        author_ids.insert(0, node.author);
    }
    let authors = service.get(&author_ids).await?;
    tracing::info!(
        "Loaded node {} ({}) with {} authors for user {}",
        node.id,
        node.name,
        authors.len(),
        my.node.id
    );

    Ok(TeamProps {
        node,
        user: my.node,
        authors,
    })
}

/// Apply a reported `(user, delta)` to the author list.
///
/// Added users are looked up among `friends`; one that is not there is shown
/// by id until the next full load.
pub fn apply_change(authors: &mut Vec<Node>, friends: &[Node], user: NodeId, delta: i32) {
    if delta > 0 {
        if authors.iter().any(|a| a.id == user) {
            return;
        }
        let node = friends
            .iter()
            .find(|f| f.id == user)
            .cloned()
            .unwrap_or_else(|| Node::user(user, format!("user {}", user)));
        authors.push(node);
    } else if delta < 0 {
        authors.retain(|a| a.id != user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jammer_node::MemoryNodeService;

    #[test]
    fn test_apply_change() {
        let friends = vec![Node::user(2, "bo")];
        let mut authors = vec![Node::user(1, "ada")];

        apply_change(&mut authors, &friends, NodeId(2), 1);
        apply_change(&mut authors, &friends, NodeId(2), 1);
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[1].name, "bo");

        apply_change(&mut authors, &friends, NodeId(9), 1);
        assert_eq!(authors[2].name, "user 9");

        apply_change(&mut authors, &friends, NodeId(2), -1);
        let ids: Vec<_> = authors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(9)]);
    }

    #[tokio::test]
    async fn test_load_props_includes_owner() {
        let mut item = Node::item(100, "game", 1, "Tiny Tower");
        item.meta.author = vec![NodeId(2)];
        let service = MemoryNodeService::new()
            .with_node(Node::user(1, "ada"))
            .with_node(Node::user(2, "bo"))
            .with_node(item);
        service.sign_in(NodeId(2));

        let props = load_props(&service, NodeId(100)).await.unwrap();
        assert_eq!(props.user.id, NodeId(2));
        let ids: Vec<_> = props.authors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
    }

    #[tokio::test]
    async fn test_load_props_missing_node() {
        let service = MemoryNodeService::new().with_node(Node::user(1, "ada"));
        service.sign_in(NodeId(1));
        let err = load_props(&service, NodeId(100)).await.unwrap_err();
        assert_eq!(err, NodeError::NotFound(NodeId(100)));
    }
}
