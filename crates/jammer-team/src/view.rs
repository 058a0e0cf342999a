//! View model for the team building panel.
//!
//! [`render`] is a pure function of props, state and config. Hosts draw the
//! returned [`TeamView`] however they like; the sections keep the order in
//! which they should appear.

use std::cmp::Ordering;

use jammer_node::{Node, NodeId};

use crate::component::{TeamProps, TeamState};
use crate::config::TeamConfig;
use crate::permissions::TeamActions;

pub const LABEL: &str = "Team Building";
pub const ADDER_HEADER: &str = "Add to team";
pub const REMOVE_TITLE: &str = "Remove from team";
pub const FRIEND_GUIDANCE: &str = "To add members to a team, you first need to add your team \
members as friends. Visit each others user pages and click the Follow button to become friends. \
When you are done, return here and you will be able to add them to your team.";

/// One row of the author list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub id: NodeId,
    pub name: String,
    /// The row is the viewer
    pub is_me: bool,
    /// The row is the item's owner
    pub is_main: bool,
    /// A remove control is offered
    pub removable: bool,
}

impl MemberRow {
    /// Name followed by the "(you)" / "(main author)" markers.
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        if self.is_me {
            label.push_str(" (you)");
        }
        if self.is_main {
            label.push_str(" (main author)");
        }
        label
    }
}

/// A friend that can be added to the team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: NodeId,
    pub name: String,
}

impl Candidate {
    pub fn title(&self) -> String {
        format!("Click to add {}", self.name)
    }
}

/// The "add to team" dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adder {
    pub header: &'static str,
    pub candidates: Vec<Candidate>,
}

/// The author list with its optional adder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamList {
    pub members: Vec<MemberRow>,
    pub adder: Option<Adder>,
    /// A mutation is in flight
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Neutral explanation
    Notice(String),
    /// Something the authors should fix
    Warning(String),
    Team(TeamList),
    /// How to make the adder appear
    Guidance(&'static str),
}

/// Everything the panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamView {
    pub label: &'static str,
    pub sections: Vec<Section>,
    /// Last failure, shown as a warning block after the body
    pub error: Option<String>,
}

impl TeamView {
    pub fn team(&self) -> Option<&TeamList> {
        self.sections.iter().find_map(|section| match section {
            Section::Team(list) => Some(list),
            _ => None,
        })
    }

    pub fn adder(&self) -> Option<&Adder> {
        self.team().and_then(|list| list.adder.as_ref())
    }

    pub fn notices(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Notice(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Warning(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_guidance(&self) -> bool {
        self.sections
            .iter()
            .any(|section| matches!(section, Section::Guidance(_)))
    }
}

/// Owner first, everyone else by name.
pub fn sort_authors(authors: &mut [Node], main_author: NodeId) {
    authors.sort_by(|a, b| match (a.id == main_author, b.id == main_author) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
}

/// Friends who are not yet authors, by name.
pub fn add_candidates(friends: &[Node], authors: &[Node]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = friends
        .iter()
        .filter(|friend| !authors.iter().any(|author| author.id == friend.id))
        .map(|friend| Candidate {
            id: friend.id,
            name: friend.name.clone(),
        })
        .collect();
    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    candidates
}

/// Build the panel. `None` when the node is not an item.
pub fn render(props: &TeamProps, state: &TeamState, config: &TeamConfig) -> Option<TeamView> {
    let node = &props.node;
    if !node.is_item() {
        return None;
    }

    let viewer = props.user.id;
    let actions = TeamActions::for_viewer(node, viewer, &props.authors);
    let processing = state.processing.is_some();

    let mut sections = Vec::new();
    let mut include_team = true;
    let mut include_adding = actions.can_add() && !processing;

    if node.is_compo() {
        if props.authors.len() < 2 {
            sections.push(Section::Notice(format!(
                "Since your {} is competing in the compo, you cannot add others to your game",
                node.subtype
            )));
            include_team = false;
        } else {
            sections.push(Section::Warning(format!(
                "Your {} is competing in the compo, but you are more than one author. \
                 This is against the rules",
                node.subtype
            )));
            include_adding = false;
        }
    }

    if include_team {
        let mut authors = props.authors.clone();
        sort_authors(&mut authors, node.author);

        let members = authors
            .iter()
            .map(|author| MemberRow {
                id: author.id,
                name: author.name.clone(),
                is_me: author.id == viewer,
                is_main: node.is_owned_by(author.id),
                removable: !processing && actions.can_remove(viewer, author.id),
            })
            .collect();

        let adder = if include_adding {
            let candidates = add_candidates(&state.friends, &props.authors);
            config.shows_adder(candidates.len()).then(|| Adder {
                header: ADDER_HEADER,
                candidates,
            })
        } else {
            None
        };
        let show_guidance = include_adding && adder.is_none();

        sections.push(Section::Team(TeamList {
            members,
            adder,
            loading: processing,
        }));
        if show_guidance {
            sections.push(Section::Guidance(FRIEND_GUIDANCE));
        }
    }

    Some(TeamView {
        label: LABEL,
        sections,
        error: state.error.clone(),
    })
}
