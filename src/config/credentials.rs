//! AWS credential resolution (environment, then shared credentials file).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AquaError, Result};

/// Static AWS credentials used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"..")
            .field("session_token", &self.session_token.as_ref().map(|_| ".."))
            .finish()
    }
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    /// Resolve credentials from the process environment, then from `profile`
    /// in the shared credentials file.
    pub fn resolve(profile: &str) -> Result<Self> {
        Self::resolve_with(|name| std::env::var(name).ok(), profile)
    }

    /// Same as [`AwsCredentials::resolve`], reading variables through `lookup`.
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>, profile: &str) -> Result<Self> {
        if let Some(creds) = Self::from_lookup(&lookup) {
            debug!("using credentials from environment");
            return Ok(creds);
        }

        let path = lookup("AWS_SHARED_CREDENTIALS_FILE")
            .map(PathBuf::from)
            .or_else(default_shared_credentials_path);
        if let Some(path) = path {
            if let Some(creds) = Self::from_shared_file(&path, profile)? {
                debug!(path = %path.display(), profile, "using shared credentials file");
                return Ok(creds);
            }
        }

        Err(AquaError::Authentication(format!(
            "No AWS credentials found: set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY \
             or add profile '{profile}' to the shared credentials file"
        )))
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Some(Self::new(
            var("AWS_ACCESS_KEY_ID")?,
            var("AWS_SECRET_ACCESS_KEY")?,
            var("AWS_SESSION_TOKEN"),
        ))
    }

    /// Read `profile` from a shared credentials file.
    ///
    /// Returns `Ok(None)` if the file does not exist or lacks the profile.
    pub fn from_shared_file(path: impl AsRef<Path>, profile: &str) -> Result<Option<Self>> {
        let raw = match fs::read_to_string(path.as_ref()) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AquaError::Io(err)),
        };
        Ok(parse_profile(&raw, profile))
    }
}

/// `~/.aws/credentials`
fn default_shared_credentials_path() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().join(".aws").join("credentials"))
}

fn parse_profile(contents: &str, profile: &str) -> Option<AwsCredentials> {
    let mut in_profile = false;
    let mut access_key_id = None;
    let mut secret_access_key = None;
    let mut session_token = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let section = section.trim();
            let name = section.strip_prefix("profile ").unwrap_or(section).trim();
            in_profile = name == profile;
            continue;
        }
        if !in_profile {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim().to_ascii_lowercase().as_str() {
            "aws_access_key_id" => access_key_id = Some(value),
            "aws_secret_access_key" => secret_access_key = Some(value),
            "aws_session_token" => session_token = Some(value),
            _ => {}
        }
    }

    Some(AwsCredentials::new(
        access_key_id?,
        secret_access_key?,
        session_token,
    ))
}
