//! Conversation event types and page queries.

use std::fmt;

use bon::Builder;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AquaError, Result};

/// Page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A stored conversation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEvent")]
pub struct Event {
    #[serde(rename = "eventId")]
    pub id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<Timestamp>,
    pub payload: Vec<PayloadItem>,
}

/// Wire form of [`Event`]. Both spellings of the id and timestamp may be
/// present at once; `eventId` and `createdAt` win.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "eventId", default)]
    event_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<Timestamp>,
    #[serde(rename = "eventTimestamp", default)]
    event_timestamp: Option<Timestamp>,
    #[serde(default)]
    payload: Vec<PayloadItem>,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        Self {
            id: raw.event_id.or(raw.id),
            created_at: raw.created_at.or(raw.event_timestamp),
            payload: raw.payload,
        }
    }
}

impl Event {
    /// Conversational items of this event, in payload order.
    pub fn conversational(&self) -> impl Iterator<Item = &Conversational> {
        self.payload.iter().filter_map(|item| match item {
            PayloadItem::Conversational(conv) => Some(conv),
            PayloadItem::Other => None,
        })
    }
}

/// Event creation time as reported by the service.
///
/// The service sends epoch seconds; recorded fixtures and older payloads carry
/// preformatted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    EpochSeconds(f64),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::EpochSeconds(secs) => {
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9) as u32;
                match DateTime::from_timestamp(whole as i64, nanos) {
                    Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, false)),
                    None => write!(f, "{secs}"),
                }
            }
        }
    }
}

/// One entry of an event payload.
///
/// Only the `conversational` variant carries renderable content; every other
/// variant the service defines (blobs and the like) is kept as [`PayloadItem::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPayloadItem", into = "RawPayloadItem")]
pub enum PayloadItem {
    Conversational(Conversational),
    Other,
}

#[derive(Serialize, Deserialize)]
struct RawPayloadItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conversational: Option<Conversational>,
}

impl From<RawPayloadItem> for PayloadItem {
    fn from(raw: RawPayloadItem) -> Self {
        match raw.conversational {
            Some(conv) => Self::Conversational(conv),
            None => Self::Other,
        }
    }
}

impl From<PayloadItem> for RawPayloadItem {
    fn from(item: PayloadItem) -> Self {
        match item {
            PayloadItem::Conversational(conv) => Self {
                conversational: Some(conv),
            },
            PayloadItem::Other => Self {
                conversational: None,
            },
        }
    }
}

/// A conversational message stored in an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversational {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<Content>,
}

impl Conversational {
    /// Role normalised for display.
    pub fn display_role(&self) -> String {
        self.role
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "UNKNOWN".to_string())
    }

    /// Flattened message text.
    pub fn text(&self) -> String {
        self.content.as_ref().map(Content::text).unwrap_or_default()
    }
}

/// Message content: raw text or a list of fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Fragments(Vec<ContentFragment>),
    Fragment(ContentFragment),
}

impl Content {
    /// Join fragment texts with a single space. Fragments without text are skipped.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Fragments(fragments) => fragments
                .iter()
                .filter_map(|f| f.text.as_deref())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Fragment(fragment) => fragment.text.clone().unwrap_or_default(),
        }
    }
}

/// A content fragment; only `text` is rendered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentFragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Opaque token marking where a listing resumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationCursor(String);

impl ContinuationCursor {
    /// Wrap a raw token. Empty tokens carry no position and yield `None`.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single-page history request.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Query {
    #[builder(into)]
    pub memory_id: String,
    #[builder(into)]
    pub region: String,
    #[builder(into)]
    pub user_id: String,
    #[builder(into)]
    pub session_id: String,
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    pub cursor: Option<ContinuationCursor>,
}

impl Query {
    /// Check identifiers and page size before any request is issued.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("memory id", &self.memory_id),
            ("region", &self.region),
            ("user id", &self.user_id),
            ("session id", &self.session_id),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AquaError::InvalidArgument(format!("{name} must not be empty")));
            }
        }
        if self.page_size == 0 {
            return Err(AquaError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One page of events plus the cursor for the next page, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResult {
    pub events: Vec<Event>,
    pub next_cursor: Option<ContinuationCursor>,
}
