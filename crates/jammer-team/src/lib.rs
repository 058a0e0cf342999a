//! Team building for jammer items.
//!
//! Lets the authors of an item manage co-authorship: list the current team,
//! add friends to it, remove members. This crate provides:
//! - [`TeamBuilding`], the stateful component
//! - [`TeamView`], the framework-independent view it renders to
//! - [`TeamActions`], who may add or remove whom
//! - Friend list loading over any [`jammer_node::NodeService`]

pub mod component;
pub mod config;
pub mod friends;
pub mod mutation;
pub mod permissions;
pub mod view;

pub use component::{ChangeHandler, TeamBuilding, TeamProps, TeamState};
pub use config::TeamConfig;
pub use friends::{fetch_friends, mutual_star_ids, FriendsError};
pub use mutation::{LinkRequest, MutationKind};
pub use permissions::TeamActions;
pub use view::{Adder, Candidate, MemberRow, Section, TeamList, TeamView};
