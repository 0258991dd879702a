//! Access to the managed memory service's event listing.
//!
//! [`EventSource`] is the seam between the history pager and the service.
//! [`AgentCoreMemoryClient`] is the production implementation: it signs each
//! request with SigV4 and decodes the service's JSON into typed events.

pub mod agentcore;
pub mod http;
pub mod sigv4;
pub mod wire;

pub use agentcore::AgentCoreMemoryClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::history::Event;

/// A single `ListEvents` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEventsRequest {
    pub memory_id: String,
    pub actor_id: String,
    pub session_id: String,
    pub max_results: u32,
    pub next_token: Option<String>,
    pub include_payloads: bool,
}

/// Events returned by one `ListEvents` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListEventsOutput {
    pub events: Vec<Event>,
    pub next_token: Option<String>,
}

/// A paginated source of conversation events.
///
/// Implementations issue exactly one request per call and never follow
/// `next_token` on their own.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list_events(&self, request: &ListEventsRequest) -> Result<ListEventsOutput>;
}
