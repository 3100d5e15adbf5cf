//! Version information for the vocalis CLI

use serde::{Deserialize, Serialize};

/// Version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Semantic version
    pub version: String,

    /// Git commit SHA (short), when provided at build time
    pub commit: Option<String>,

    /// Platform plugins compiled into this binary
    pub platforms: Vec<String>,
}

impl VersionInfo {
    /// Create version info for current build
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("VOCALIS_GIT_SHA").map(String::from),
            platforms: vec![vocalis_dialogflow::PLATFORM_ID.to_string()],
        }
    }

    /// Format as display string
    pub fn display(&self) -> String {
        match &self.commit {
            Some(commit) => format!("vocalis {} ({})", self.version, commit),
            None => format!("vocalis {}", self.version),
        }
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
