//! Command-line interface for paging through stored conversation history.

use clap::Parser;

use crate::config::{AquaConfig, AwsCredentials};
use crate::error::Result;
use crate::history::{format_page, ContinuationCursor, HistoryFetcher, Query, DEFAULT_PAGE_SIZE};
use crate::memory::AgentCoreMemoryClient;

/// Fetch paginated conversation history from AgentCore Memory
#[derive(Parser, Debug)]
#[command(name = "aqua-history", version)]
pub struct Cli {
    /// The user ID (actor id) to fetch history for
    #[arg(long)]
    pub user_id: String,

    /// The session ID to fetch history from
    #[arg(long)]
    pub session_id: String,

    /// Number of events per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Pagination token from a previous response
    #[arg(long)]
    pub next_token: Option<String>,

    /// Memory ID (defaults to BEDROCK_AGENTCORE_MEMORY_ID or the built-in memory)
    #[arg(long)]
    pub memory_id: Option<String>,

    /// AWS region (defaults to AWS_REGION or eu-central-1)
    #[arg(long)]
    pub region: Option<String>,

    /// Service endpoint override (defaults to AGENTCORE_ENDPOINT_URL or the regional endpoint)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Shared credentials profile (defaults to AWS_PROFILE or "default")
    #[arg(long)]
    pub profile: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layer the command-line values over `base`.
    pub fn config(&self, base: AquaConfig) -> AquaConfig {
        base.with_memory_id(self.memory_id.clone())
            .with_region(self.region.clone())
            .with_endpoint(self.endpoint_url.clone())
            .with_profile(self.profile.clone())
    }

    /// Build the page query for `config`.
    pub fn query(&self, config: &AquaConfig) -> Query {
        Query::builder()
            .memory_id(config.memory_id.clone())
            .region(config.region.clone())
            .user_id(self.user_id.clone())
            .session_id(self.session_id.clone())
            .page_size(self.limit)
            .maybe_cursor(self.next_token.clone().and_then(ContinuationCursor::new))
            .build()
    }
}

/// Fetch one page and render it for the terminal.
pub async fn run(cli: &Cli) -> Result<String> {
    let config = cli.config(AquaConfig::from_env());
    let query = cli.query(&config);
    let credentials = AwsCredentials::resolve(&config.profile)?;
    let client =
        AgentCoreMemoryClient::new(&config.region, credentials, config.endpoint.as_deref())?;

    let page = HistoryFetcher::new(client).fetch_page(&query).await?;
    Ok(format_page(&page, &query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_required_flags_with_defaults() {
        let cli =
            Cli::try_parse_from(["aqua-history", "--user-id", "u1", "--session-id", "s1"]).unwrap();
        assert_eq!(cli.user_id, "u1");
        assert_eq!(cli.session_id, "s1");
        assert_eq!(cli.limit, 20);
        assert!(cli.next_token.is_none());
        assert!(cli.memory_id.is_none());
        assert!(cli.region.is_none());
    }

    #[test]
    fn parse_all_options() {
        let cli = Cli::try_parse_from([
            "aqua-history",
            "--user-id",
            "u1",
            "--session-id",
            "s1",
            "--limit",
            "5",
            "--next-token",
            "tok",
            "--memory-id",
            "mem-2",
            "--region",
            "us-east-1",
            "--endpoint-url",
            "http://localhost:9000",
            "--profile",
            "dev",
        ])
        .unwrap();

        let config = cli.config(AquaConfig::default());
        assert_eq!(config.memory_id, "mem-2");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.profile, "dev");

        let query = cli.query(&config);
        assert_eq!(query.page_size, 5);
        assert_eq!(query.cursor.as_ref().map(|c| c.as_str()), Some("tok"));
        assert_eq!(query.user_id, "u1");
        assert_eq!(query.memory_id, "mem-2");
    }

    #[test]
    fn defaults_come_from_base_config() {
        let cli =
            Cli::try_parse_from(["aqua-history", "--user-id", "u1", "--session-id", "s1"]).unwrap();
        let query = cli.query(&cli.config(AquaConfig::default()));
        assert_eq!(query.memory_id, "aqua_memory_v1-ou5CPqEFsu");
        assert_eq!(query.region, "eu-central-1");
        assert!(query.cursor.is_none());
    }

    #[test]
    fn empty_next_token_starts_from_beginning() {
        let cli = Cli::try_parse_from([
            "aqua-history",
            "--user-id",
            "u1",
            "--session-id",
            "s1",
            "--next-token",
            "",
        ])
        .unwrap();
        assert!(cli.query(&AquaConfig::default()).cursor.is_none());
    }

    #[test]
    fn missing_required_flags_is_error() {
        assert!(Cli::try_parse_from(["aqua-history", "--user-id", "u1"]).is_err());
        assert!(Cli::try_parse_from(["aqua-history", "--session-id", "s1"]).is_err());
    }

    #[test]
    fn zero_limit_is_error() {
        assert!(Cli::try_parse_from([
            "aqua-history",
            "--user-id",
            "u1",
            "--session-id",
            "s1",
            "--limit",
            "0",
        ])
        .is_err());
    }
}
