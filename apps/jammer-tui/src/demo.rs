//! Offline demo data for `--demo`.

use jammer_node::{MemoryNodeService, Node, NodeId};

/// Jam entry with a two-person team
pub const ITEM: u64 = 100;
/// Compo entry, single author
pub const COMPO_ITEM: u64 = 101;

/// A small graph: ada (signed in) owns two games; bo, cy and dee are
/// friends, eve only follows one way. Links involving dee are refused so
/// the error path can be tried.
pub fn service() -> MemoryNodeService {
    let mut jam = Node::item(ITEM, "game", 1, "Tiny Tower");
    jam.subsubtype = "jam".to_string();
    jam.meta.author.push(NodeId(2));

    let compo = Node::item(COMPO_ITEM, "game", 1, "Solo Signal").with_subsubtype("compo");

    let service = MemoryNodeService::new()
        .with_node(Node::user(1, "ada"))
        .with_node(Node::user(2, "bo"))
        .with_node(Node::user(3, "cy"))
        .with_node(Node::user(4, "dee"))
        .with_node(Node::user(5, "eve"))
        .with_node(jam)
        .with_node(compo);

    service.sign_in(NodeId(1));
    service.set_stars(
        vec![NodeId(2), NodeId(3), NodeId(4), NodeId(5)],
        vec![NodeId(2), NodeId(3), NodeId(4)],
    );
    service.refuse_links_for(NodeId(4));
    service
}
