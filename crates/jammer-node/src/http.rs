//! Node API client using reqwest
//!
//! Endpoints (relative to [`ClientConfig::base_url`]):
//! - `GET  /vx/node/getmy`
//! - `GET  /vx/node2/get/<id>+<id>+...`
//! - `POST /vx/node/link/add/<a>/<b>`
//! - `POST /vx/node/link/remove/<a>/<b>`
//!
//! Every response is a JSON object carrying a `status` field mirroring the
//! HTTP status, plus a `message` on failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{NodeError, Result};
use crate::node::{LinkRelation, MyNode, Node, NodeId};
use crate::service::NodeService;

/// Name of the session cookie the node API expects
const SESSION_COOKIE: &str = "SIDS";

pub struct HttpNodeService {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: Option<u16>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NodesEnvelope {
    #[serde(default)]
    node: Vec<Node>,
}

impl HttpNodeService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.session_token {
            let cookie = HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token))
                .map_err(|e| NodeError::Request {
                    message: format!("invalid session token: {}", e),
                })?;
            headers.insert(COOKIE, cookie);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|_| NodeError::InvalidUrl { url: raw })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {} {}", url, payload);

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }
}

/// Path for fetching several nodes in one call.
pub fn get_path(ids: &[NodeId]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("+");
    format!("vx/node2/get/{}", joined)
}

/// Path for a link mutation; `action` is `add` or `remove`.
pub fn link_path(action: &str, node: NodeId, other: NodeId) -> String {
    format!("vx/node/link/{}/{}/{}", action, node, other)
}

/// Turn an HTTP status and body into a typed value, honoring the `status`
/// field embedded in the body.
pub fn decode_response<T: DeserializeOwned>(http_status: u16, body: &str) -> Result<T> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if http_status >= 400 => {
            tracing::debug!("Non-JSON error body ({})", e);
            return Err(NodeError::Status {
                status: http_status,
                message: body.trim().chars().take(200).collect(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let envelope = StatusEnvelope::deserialize(&value)?;
    let status = envelope.status.unwrap_or(http_status).max(http_status);
    if status >= 400 {
        return Err(NodeError::Status {
            status,
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(serde_json::from_value(value)?)
}

#[async_trait]
impl NodeService for HttpNodeService {
    async fn get_my(&self) -> Result<MyNode> {
        self.get_json("vx/node/getmy").await
    }

    async fn get(&self, ids: &[NodeId]) -> Result<Vec<Node>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let envelope: NodesEnvelope = self.get_json(&get_path(ids)).await?;
        Ok(envelope.node)
    }

    async fn add_link(&self, node: NodeId, other: NodeId, relation: LinkRelation) -> Result<()> {
        let _: serde_json::Value = self
            .post_json(&link_path("add", node, other), &relation.body())
            .await?;
        tracing::info!("Linked {} -> {} ({})", node, other, relation);
        Ok(())
    }

    async fn remove_link(
        &self,
        node: NodeId,
        other: NodeId,
        relation: LinkRelation,
    ) -> Result<()> {
        let _: serde_json::Value = self
            .post_json(&link_path("remove", node, other), &relation.body())
            .await?;
        tracing::info!("Unlinked {} -> {} ({})", node, other, relation);
        Ok(())
    }
}
