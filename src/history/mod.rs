//! Single-page conversation history retrieval and rendering.
//!
//! # Example
//!
//! ```no_run
//! use aqua::config::AwsCredentials;
//! use aqua::history::{format_page, HistoryFetcher, Query};
//! use aqua::memory::AgentCoreMemoryClient;
//!
//! # async fn example() -> aqua::error::Result<()> {
//! let query = Query::builder()
//!     .memory_id("aqua_memory_v1-ou5CPqEFsu")
//!     .region("eu-central-1")
//!     .user_id("u1")
//!     .session_id("s1")
//!     .build();
//! let client = AgentCoreMemoryClient::new(
//!     &query.region,
//!     AwsCredentials::resolve("default")?,
//!     None,
//! )?;
//! let page = HistoryFetcher::new(client).fetch_page(&query).await?;
//! println!("{}", format_page(&page, &query));
//! # Ok(())
//! # }
//! ```

pub mod format;
pub mod types;

pub use format::{format_event, format_page, NO_EVENTS};
pub use types::{
    Content, ContentFragment, ContinuationCursor, Conversational, Event, PageResult, PayloadItem,
    Query, Timestamp, DEFAULT_PAGE_SIZE,
};

use tracing::debug;

use crate::error::Result;
use crate::memory::{EventSource, ListEventsRequest};

/// Fetches one page of a conversation per call.
pub struct HistoryFetcher<S> {
    source: S,
}

impl<S: EventSource> HistoryFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch the page selected by `query`.
    ///
    /// Starts from the beginning of the conversation unless the query carries
    /// a cursor. Exactly one request is made even when the service reports
    /// further pages; the returned cursor resumes after the last event shown.
    ///
    /// The source owns the region: `query.region` must be non-empty but the
    /// request goes wherever the source was built for. Build the source from
    /// `query.region`, as [`crate::cli::run`] does.
    pub async fn fetch_page(&self, query: &Query) -> Result<PageResult> {
        query.validate()?;

        let request = ListEventsRequest {
            memory_id: query.memory_id.clone(),
            actor_id: query.user_id.clone(),
            session_id: query.session_id.clone(),
            max_results: query.page_size,
            next_token: query.cursor.as_ref().map(|c| c.as_str().to_string()),
            include_payloads: true,
        };

        let output = self.source.list_events(&request).await?;
        let next_cursor = output.next_token.and_then(ContinuationCursor::new);

        debug!(
            user_id = query.user_id.as_str(),
            session_id = query.session_id.as_str(),
            events = output.events.len(),
            has_more = next_cursor.is_some(),
            "fetched history page"
        );

        Ok(PageResult {
            events: output.events,
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AquaError;
    use crate::memory::ListEventsOutput;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory conversation that pages with `offset:<n>` tokens.
    struct MockSource {
        events: Vec<Event>,
        calls: AtomicUsize,
        requests: Mutex<Vec<ListEventsRequest>>,
    }

    impl MockSource {
        fn with_events(count: usize) -> Self {
            let events = (0..count)
                .map(|i| Event {
                    id: Some(format!("ev-{i}")),
                    created_at: None,
                    payload: vec![],
                })
                .collect();
            Self {
                events,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EventSource for MockSource {
        async fn list_events(&self, request: &ListEventsRequest) -> Result<ListEventsOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());

            let start = match request.next_token.as_deref() {
                None => 0,
                Some(token) => token
                    .strip_prefix("offset:")
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| AquaError::InvalidCursor(token.to_string()))?,
            };
            let end = (start + request.max_results as usize).min(self.events.len());
            Ok(ListEventsOutput {
                events: self.events[start..end].to_vec(),
                next_token: (end < self.events.len()).then(|| format!("offset:{end}")),
            })
        }
    }

    fn query(page_size: u32) -> Query {
        Query::builder()
            .memory_id("mem")
            .region("eu-central-1")
            .user_id("u1")
            .session_id("s1")
            .page_size(page_size)
            .build()
    }

    fn ids(page: &PageResult) -> Vec<String> {
        page.events.iter().filter_map(|e| e.id.clone()).collect()
    }

    #[tokio::test]
    async fn fetches_exactly_one_page() {
        let fetcher = HistoryFetcher::new(MockSource::with_events(5));
        let page = fetcher.fetch_page(&query(2)).await.unwrap();

        assert_eq!(ids(&page), vec!["ev-0", "ev-1"]);
        assert_eq!(page.next_cursor.as_ref().map(|c| c.as_str()), Some("offset:2"));
        assert_eq!(fetcher.source.calls.load(Ordering::SeqCst), 1);

        let requests = fetcher.source.requests.lock().unwrap();
        assert_eq!(requests[0].actor_id, "u1");
        assert_eq!(requests[0].max_results, 2);
        assert!(requests[0].include_payloads);
        assert!(requests[0].next_token.is_none());
    }

    #[tokio::test]
    async fn cursor_resumes_without_gaps_or_duplicates() {
        let fetcher = HistoryFetcher::new(MockSource::with_events(5));

        let first = fetcher.fetch_page(&query(2)).await.unwrap();
        let mut resumed = query(2);
        resumed.cursor = first.next_cursor.clone();
        let second = fetcher.fetch_page(&resumed).await.unwrap();
        resumed.cursor = second.next_cursor.clone();
        let third = fetcher.fetch_page(&resumed).await.unwrap();

        let mut seen = ids(&first);
        seen.extend(ids(&second));
        seen.extend(ids(&third));
        assert_eq!(seen, vec!["ev-0", "ev-1", "ev-2", "ev-3", "ev-4"]);
        assert!(third.next_cursor.is_none());
    }

    #[tokio::test]
    async fn last_page_has_no_cursor() {
        let fetcher = HistoryFetcher::new(MockSource::with_events(2));
        let page = fetcher.fetch_page(&query(20)).await.unwrap();
        assert_eq!(page.events.len(), 2);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn invalid_query_sends_nothing() {
        let fetcher = HistoryFetcher::new(MockSource::with_events(2));
        let err = fetcher.fetch_page(&query(0)).await.unwrap_err();
        assert!(matches!(err, AquaError::InvalidArgument(_)));
        assert_eq!(fetcher.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn source_errors_propagate_unchanged() {
        let fetcher = HistoryFetcher::new(MockSource::with_events(2));
        let mut bad = query(2);
        bad.cursor = ContinuationCursor::new("garbage");
        let err = fetcher.fetch_page(&bad).await.unwrap_err();
        assert!(matches!(err, AquaError::InvalidCursor(token) if token == "garbage"));
    }
}
