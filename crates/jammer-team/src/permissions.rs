//! Team membership capabilities using bitflags.
//!
//! What a viewer may do to an item's team depends only on their relation to
//! the item: owner ("main author"), co-author, or outsider.

use bitflags::bitflags;

use jammer_node::{Node, NodeId};

bitflags! {
    /// Bitflag-based capabilities over an item's author list.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TeamActions: u8 {
        /// Permission to add friends to the team
        const ADD = 0b001;
        /// Permission to leave the team
        const REMOVE_SELF = 0b010;
        /// Permission to remove other members
        const REMOVE_OTHERS = 0b100;
    }
}

impl TeamActions {
    /// Outsider: can only look
    pub const OUTSIDER: TeamActions = TeamActions::empty();

    /// Co-author: can grow the team and leave it
    pub const CO_AUTHOR: TeamActions = TeamActions::ADD.union(TeamActions::REMOVE_SELF);

    /// Main author: can grow the team and remove anyone but themself
    pub const MAIN_AUTHOR: TeamActions = TeamActions::ADD.union(TeamActions::REMOVE_OTHERS);

    /// Capabilities of `viewer` on `node` given its current `authors`.
    pub fn for_viewer(node: &Node, viewer: NodeId, authors: &[Node]) -> Self {
        if node.is_owned_by(viewer) {
            TeamActions::MAIN_AUTHOR
        } else if authors.iter().any(|author| author.id == viewer) {
            TeamActions::CO_AUTHOR
        } else {
            TeamActions::OUTSIDER
        }
    }

    #[inline]
    pub fn can_add(&self) -> bool {
        self.contains(TeamActions::ADD)
    }

    /// Whether the holder (`viewer`) may remove `member` from the team.
    pub fn can_remove(&self, viewer: NodeId, member: NodeId) -> bool {
        if member == viewer {
            self.contains(TeamActions::REMOVE_SELF)
        } else {
            self.contains(TeamActions::REMOVE_OTHERS)
        }
    }
}

impl Default for TeamActions {
    fn default() -> Self {
        TeamActions::OUTSIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn team() -> (Node, Vec<Node>) {
        let node = Node::item(100, "game", 1, "Tiny Tower");
        let authors = vec![Node::user(1, "ada"), Node::user(2, "bo"), Node::user(3, "cy")];
        (node, authors)
    }

    #[test]
    fn test_roles() {
        let (node, authors) = team();
        assert_eq!(
            TeamActions::for_viewer(&node, NodeId(1), &authors),
            TeamActions::MAIN_AUTHOR
        );
        assert_eq!(
            TeamActions::for_viewer(&node, NodeId(2), &authors),
            TeamActions::CO_AUTHOR
        );
        assert_eq!(
            TeamActions::for_viewer(&node, NodeId(9), &authors),
            TeamActions::OUTSIDER
        );
    }

    #[test]
    fn test_owner_missing_from_author_list_is_still_main() {
        let (node, _) = team();
        assert_eq!(
            TeamActions::for_viewer(&node, NodeId(1), &[]),
            TeamActions::MAIN_AUTHOR
        );
    }

    #[rstest]
    // main author viewing
    #[case(1, 1, false)]
    #[case(1, 2, true)]
    #[case(1, 3, true)]
    // co-author viewing
    #[case(2, 2, true)]
    #[case(2, 1, false)]
    #[case(2, 3, false)]
    // outsider viewing
    #[case(9, 1, false)]
    #[case(9, 2, false)]
    fn test_can_remove(#[case] viewer: u64, #[case] member: u64, #[case] expected: bool) {
        let (node, authors) = team();
        let actions = TeamActions::for_viewer(&node, NodeId(viewer), &authors);
        assert_eq!(
            actions.can_remove(NodeId(viewer), NodeId(member)),
            expected,
            "viewer {} removing {}",
            viewer,
            member
        );
    }

    #[test]
    fn test_only_authors_can_add() {
        assert!(TeamActions::MAIN_AUTHOR.can_add());
        assert!(TeamActions::CO_AUTHOR.can_add());
        assert!(!TeamActions::OUTSIDER.can_add());
    }
}
