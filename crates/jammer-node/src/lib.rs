//! Node data model and node API access for jammer.
//!
//! Everything on the site is a node: games, posts and users alike. This crate
//! provides:
//! - The [`Node`] record and the current-user envelope returned by `getmy`
//! - The [`NodeService`] trait, the narrow data API the UI components call
//! - [`HttpNodeService`], talking to the remote node API over HTTP
//! - [`MemoryNodeService`], an in-process implementation for tests and demos
//! - [`ClientConfig`] for the HTTP client

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod node;
pub mod service;

pub use config::{ClientConfig, ConfigError};
pub use error::{NodeError, Result};
pub use http::HttpNodeService;
pub use memory::MemoryNodeService;
pub use node::{LinkRelation, MyNode, Node, NodeId, NodeMeta, StarList};
pub use service::NodeService;
