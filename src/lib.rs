//! Aqua — conversation history pager for AgentCore Memory.
//!
//! Fetches one page of stored conversation events from the managed memory
//! service, flattens each event's payload into display lines and reports a
//! continuation token when more events exist.
//!
//! # Quick Start
//!
//! ```no_run
//! use aqua::prelude::*;
//!
//! # async fn example() -> aqua::error::Result<()> {
//! let config = AquaConfig::from_env();
//! let query = Query::builder()
//!     .memory_id(config.memory_id.clone())
//!     .region(config.region.clone())
//!     .user_id("u1")
//!     .session_id("s1")
//!     .build();
//! let client = AgentCoreMemoryClient::new(
//!     &config.region,
//!     AwsCredentials::resolve(&config.profile)?,
//!     config.endpoint.as_deref(),
//! )?;
//! let page = HistoryFetcher::new(client).fetch_page(&query).await?;
//! println!("{}", format_page(&page, &query));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod memory;
pub mod prelude;
pub mod telemetry;
