//! Project configuration (vocalis.yaml)

mod loader;
mod types;

pub use loader::{ProjectConfig, CONFIG_FILE_NAMES};
pub use types::{PlatformConfig, ProjectConfigFile, StageConfig};
