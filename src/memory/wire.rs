//! JSON request and response envelopes for `ListEvents`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AquaError, Result};
use crate::history::Event;

use super::{ListEventsOutput, ListEventsRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListEventsBody<'a> {
    include_payloads: bool,
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_token: Option<&'a str>,
}

impl<'a> From<&'a ListEventsRequest> for ListEventsBody<'a> {
    fn from(request: &'a ListEventsRequest) -> Self {
        Self {
            include_payloads: request.include_payloads,
            max_results: request.max_results,
            next_token: request.next_token.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEventsResponse {
    #[serde(default)]
    events: Vec<Value>,
    #[serde(default)]
    next_token: Option<String>,
}

/// Parse a successful `ListEvents` response body.
///
/// The envelope must be valid JSON; each event is then checked against the
/// event schema individually so a bad record is reported by position.
pub(crate) fn parse_list_events(body: &str) -> Result<ListEventsOutput> {
    let response: ListEventsResponse = serde_json::from_str(body)?;
    let events = decode_events(response.events)?;
    Ok(ListEventsOutput {
        events,
        next_token: response.next_token.filter(|token| !token.is_empty()),
    })
}

fn decode_events(raw: Vec<Value>) -> Result<Vec<Event>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(AquaError::malformed_event(
                    index,
                    None,
                    "event is not a JSON object",
                ));
            }
            let event_id = value
                .get("eventId")
                .or_else(|| value.get("id"))
                .and_then(Value::as_str)
                .map(str::to_string);
            serde_json::from_value::<Event>(value)
                .map_err(|e| AquaError::malformed_event(index, event_id, e.to_string()))
        })
        .collect()
}
