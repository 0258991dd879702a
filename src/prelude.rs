//! Convenience re-exports.

pub use crate::config::{AquaConfig, AwsCredentials};
pub use crate::error::{AquaError, Result};
pub use crate::history::{
    format_event, format_page, ContinuationCursor, Event, HistoryFetcher, PageResult, Query,
};
pub use crate::memory::{AgentCoreMemoryClient, EventSource};
