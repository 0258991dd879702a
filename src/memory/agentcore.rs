//! AgentCore Memory `ListEvents` client.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Url;
use tracing::debug;

use crate::config::AwsCredentials;
use crate::error::{AquaError, Result};

use super::http::{build_client, status_to_error};
use super::sigv4::RequestSigner;
use super::wire::{parse_list_events, ListEventsBody};
use super::{EventSource, ListEventsOutput, ListEventsRequest};

/// Signing name of the memory data plane.
pub const SERVICE_NAME: &str = "bedrock-agentcore";

const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTPS client for the managed memory service, bound to one region.
#[derive(Debug, Clone)]
pub struct AgentCoreMemoryClient {
    http: reqwest::Client,
    endpoint: Url,
    signer: RequestSigner,
}

impl AgentCoreMemoryClient {
    /// Create a client for `region`. `endpoint` overrides the regional default.
    pub fn new(region: &str, credentials: AwsCredentials, endpoint: Option<&str>) -> Result<Self> {
        let endpoint = match endpoint {
            Some(url) => url.to_string(),
            None => default_endpoint(region),
        };
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| AquaError::Configuration(format!("invalid endpoint {endpoint}: {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(AquaError::Configuration(format!(
                "endpoint {endpoint} cannot carry a path"
            )));
        }

        Ok(Self {
            http: build_client()?,
            endpoint,
            signer: RequestSigner::new(credentials, region, SERVICE_NAME),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn events_url(&self, request: &ListEventsRequest) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AquaError::Configuration(format!("endpoint {} cannot carry a path", self.endpoint))
            })?
            .pop_if_empty()
            .extend([
                "memories",
                request.memory_id.as_str(),
                "actor",
                request.actor_id.as_str(),
                "sessions",
                request.session_id.as_str(),
            ]);
        Ok(url)
    }
}

/// Regional endpoint of the memory data plane.
pub fn default_endpoint(region: &str) -> String {
    format!("https://{SERVICE_NAME}.{region}.amazonaws.com")
}

#[async_trait]
impl EventSource for AgentCoreMemoryClient {
    async fn list_events(&self, request: &ListEventsRequest) -> Result<ListEventsOutput> {
        let url = self.events_url(request)?;
        let body = serde_json::to_vec(&ListEventsBody::from(request))?;
        let headers = self.signer.sign(
            "POST",
            &url,
            &[("content-type", CONTENT_TYPE_JSON)],
            &body,
            Utc::now(),
        )?;

        debug!(
            memory_id = request.memory_id.as_str(),
            session_id = request.session_id.as_str(),
            max_results = request.max_results,
            resumed = request.next_token.is_some(),
            "AgentCore list_events"
        );

        let resp = self.http.post(url).headers(headers).body(body).send().await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let headers = resp.headers().clone();
            let body_text = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!(status, error = %e, "failed to read error response body");
                    String::new()
                }
            };
            return Err(status_to_error(
                status,
                &headers,
                &body_text,
                request.next_token.is_some(),
            ));
        }

        let text = resp.text().await?;
        let output = parse_list_events(&text)?;
        debug!(
            events = output.events.len(),
            has_more = output.next_token.is_some(),
            "AgentCore list_events page"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: Option<&str>) -> AgentCoreMemoryClient {
        AgentCoreMemoryClient::new(
            "eu-central-1",
            AwsCredentials::new("AKID", "secret", None),
            endpoint,
        )
        .unwrap()
    }

    fn request(session_id: &str) -> ListEventsRequest {
        ListEventsRequest {
            memory_id: "aqua_memory_v1-ou5CPqEFsu".to_string(),
            actor_id: "u1".to_string(),
            session_id: session_id.to_string(),
            max_results: 20,
            next_token: None,
            include_payloads: true,
        }
    }

    #[test]
    fn default_endpoint_is_regional() {
        assert_eq!(
            client(None).endpoint().as_str(),
            "https://bedrock-agentcore.eu-central-1.amazonaws.com/"
        );
    }

    #[test]
    fn events_url_scopes_memory_actor_and_session() {
        let url = client(Some("http://localhost:9000"))
            .events_url(&request("s1"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/memories/aqua_memory_v1-ou5CPqEFsu/actor/u1/sessions/s1"
        );
    }

    #[test]
    fn events_url_encodes_identifiers() {
        let url = client(Some("http://localhost:9000/"))
            .events_url(&request("a b/c"))
            .unwrap();
        assert!(url.as_str().ends_with("/sessions/a%20b%2Fc"));
    }

    #[test]
    fn rejects_unusable_endpoints() {
        let creds = AwsCredentials::new("AKID", "secret", None);
        assert!(matches!(
            AgentCoreMemoryClient::new("eu-central-1", creds.clone(), Some("not a url")),
            Err(AquaError::Configuration(_))
        ));
        assert!(matches!(
            AgentCoreMemoryClient::new("eu-central-1", creds, Some("mailto:ops@example.com")),
            Err(AquaError::Configuration(_))
        ));
    }
}
