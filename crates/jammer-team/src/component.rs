//! The team building component.
//!
//! Owns the transient state (friend list, in-flight mutation, last error)
//! and reports successful membership changes to the host through the
//! `on_change` callback. The host owns the props, including the author list,
//! and is expected to update them when notified.
//!
//! Each async action comes in two halves so an event loop can keep drawing
//! while a request is outstanding:
//!
//! ```text
//! begin_add / begin_remove  -> LinkRequest   (processing = Some(user))
//! LinkRequest::send         -> Result        (run by the host)
//! finish_mutation           -> state + on_change
//! ```
//!
//! [`TeamBuilding::add_to_team`] and friends chain the halves for hosts that
//! simply await.

use jammer_node::{Node, NodeError, NodeId, NodeService};

use crate::config::TeamConfig;
use crate::friends::{fetch_friends, FriendsError};
use crate::mutation::{LinkRequest, MutationKind};
use crate::permissions::TeamActions;
use crate::view::{self, TeamView};

/// Callback invoked with `(user_id, delta)` after a successful change.
pub type ChangeHandler = Box<dyn FnMut(NodeId, i32) + Send>;

/// Inputs supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamProps {
    /// The item whose team is managed
    pub node: Node,
    /// The viewer
    pub user: Node,
    /// Current authors of `node`
    pub authors: Vec<Node>,
}

/// Component-local state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamState {
    pub friends: Vec<Node>,
    /// User currently being added or removed
    pub processing: Option<NodeId>,
    pub error: Option<String>,
}

pub struct TeamBuilding {
    props: TeamProps,
    state: TeamState,
    config: TeamConfig,
    on_change: ChangeHandler,
}

impl std::fmt::Debug for TeamBuilding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamBuilding")
            .field("props", &self.props)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TeamBuilding {
    pub fn new(props: TeamProps, on_change: impl FnMut(NodeId, i32) + Send + 'static) -> Self {
        Self {
            props,
            state: TeamState::default(),
            config: TeamConfig::default(),
            on_change: Box::new(on_change),
        }
    }

    pub fn with_config(mut self, config: TeamConfig) -> Self {
        self.config = config;
        self
    }

    pub fn props(&self) -> &TeamProps {
        &self.props
    }

    pub fn state(&self) -> &TeamState {
        &self.state
    }

    /// Replace the author list, e.g. after the host applied a change.
    pub fn set_authors(&mut self, authors: Vec<Node>) {
        self.props.authors = authors;
    }

    /// Build the current view; `None` when nothing should be shown.
    pub fn view(&self) -> Option<TeamView> {
        view::render(&self.props, &self.state, &self.config)
    }

    /// Load the friend list. Call once after construction.
    pub async fn load<S>(&mut self, service: &S)
    where
        S: NodeService + ?Sized,
    {
        let result = fetch_friends(service).await;
        self.apply_friends(result);
    }

    /// Store the outcome of [`fetch_friends`].
    pub fn apply_friends(&mut self, result: Result<Vec<Node>, FriendsError>) {
        match result {
            Ok(friends) => self.state.friends = friends,
            Err(err) => {
                tracing::warn!("{}", err);
                self.state.error = Some(err.to_string());
            }
        }
    }

    /// Start adding `user` to the team.
    ///
    /// Returns `None`, leaving state untouched, while another change is in
    /// flight or when the viewer may not make this change.
    pub fn begin_add(&mut self, user: NodeId) -> Option<LinkRequest> {
        self.begin(user, MutationKind::Add)
    }

    /// Start removing `user` from the team. See [`begin_add`](Self::begin_add).
    pub fn begin_remove(&mut self, user: NodeId) -> Option<LinkRequest> {
        self.begin(user, MutationKind::Remove)
    }

    fn begin(&mut self, user: NodeId, kind: MutationKind) -> Option<LinkRequest> {
        if let Some(busy) = self.state.processing {
            tracing::debug!("Ignoring {} of user {}: user {} still processing", kind, user, busy);
            return None;
        }
        if !self.permits(user, kind) {
            tracing::debug!(
                "Refusing {} of user {}: not permitted for viewer {}",
                kind,
                user,
                self.props.user.id
            );
            return None;
        }
        self.state.processing = Some(user);
        Some(LinkRequest::new(self.props.node.id, user, kind))
    }

    fn permits(&self, user: NodeId, kind: MutationKind) -> bool {
        let viewer = self.props.user.id;
        let actions = TeamActions::for_viewer(&self.props.node, viewer, &self.props.authors);
        match kind {
            MutationKind::Add => actions.can_add() && !self.props.node.is_compo(),
            MutationKind::Remove => actions.can_remove(viewer, user),
        }
    }

    /// Record the outcome of a request made by `begin_*`.
    pub fn finish_mutation(&mut self, request: &LinkRequest, result: Result<(), NodeError>) {
        self.state.processing = None;
        match result {
            Ok(()) => {
                tracing::info!(
                    "{} of user {} on node {} succeeded",
                    request.kind,
                    request.user,
                    request.node
                );
                self.state.error = None;
                (self.on_change)(request.user, request.kind.delta());
            }
            Err(err) => {
                let message = request.failure_message(&err);
                tracing::warn!("{}", message);
                self.state.error = Some(message);
            }
        }
    }

    /// Add `user` to the team and wait for the outcome.
    pub async fn add_to_team<S>(&mut self, service: &S, user: NodeId)
    where
        S: NodeService + ?Sized,
    {
        if let Some(request) = self.begin_add(user) {
            let result = request.send(service).await;
            self.finish_mutation(&request, result);
        }
    }

    /// Remove `user` from the team and wait for the outcome.
    pub async fn remove_from_team<S>(&mut self, service: &S, user: NodeId)
    where
        S: NodeService + ?Sized,
    {
        if let Some(request) = self.begin_remove(user) {
            let result = request.send(service).await;
            self.finish_mutation(&request, result);
        }
    }
}
