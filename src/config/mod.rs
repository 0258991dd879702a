//! Configuration system (layered: command line > env > built-in defaults).

pub mod credentials;

pub use credentials::AwsCredentials;

use tracing::debug;

/// Memory used when neither the command line nor the environment names one.
pub const DEFAULT_MEMORY_ID: &str = "aqua_memory_v1-ou5CPqEFsu";
/// Region used when neither the command line nor the environment names one.
pub const DEFAULT_REGION: &str = "eu-central-1";
/// Shared-credentials profile used when none is selected.
pub const DEFAULT_PROFILE: &str = "default";

/// Resolved settings for talking to the memory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AquaConfig {
    pub memory_id: String,
    pub region: String,
    /// Endpoint override; `None` selects the regional endpoint.
    pub endpoint: Option<String>,
    pub profile: String,
}

impl Default for AquaConfig {
    fn default() -> Self {
        Self {
            memory_id: DEFAULT_MEMORY_ID.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

impl AquaConfig {
    /// Load from environment variables (`BEDROCK_AGENTCORE_MEMORY_ID`, `AWS_REGION`, etc.).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through `lookup`, falling back to built-in defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let memory_id = var("BEDROCK_AGENTCORE_MEMORY_ID").unwrap_or_else(|| {
            debug!(memory_id = DEFAULT_MEMORY_ID, "using built-in memory id");
            defaults.memory_id
        });
        let region = var("AWS_REGION")
            .or_else(|| var("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| {
                debug!(region = DEFAULT_REGION, "using built-in region");
                defaults.region
            });

        Self {
            memory_id,
            region,
            endpoint: var("AGENTCORE_ENDPOINT_URL"),
            profile: var("AWS_PROFILE").unwrap_or(defaults.profile),
        }
    }

    pub fn with_memory_id(mut self, memory_id: Option<String>) -> Self {
        if let Some(memory_id) = memory_id {
            self.memory_id = memory_id;
        }
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        if let Some(region) = region {
            self.region = region;
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        if let Some(profile) = profile {
            self.profile = profile;
        }
        self
    }
}
