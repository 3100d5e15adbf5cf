//! Dialogflow platform support for Vocalis
//!
//! This crate handles:
//! - The Dialogflow agent file schema (intents, entities, sample phrases)
//! - Filtering native objects down to their non-default properties
//! - Phrase tokenization between `{slot}` phrases and sample records
//! - Forward builds (neutral model to agent files)
//! - Reverse builds (agent files back to a neutral model)
//! - Agent metadata (`agent.json`, `package.json`)

pub mod agent;
pub mod builder;
pub mod context;
pub mod defaults;
pub mod error;
pub mod files;
pub mod forward;
pub mod native;
pub mod phrase;
pub mod reverse;

pub use builder::DialogflowBuilder;
pub use context::BuildContext;
pub use error::{Error, Result};
pub use files::AgentLayout;
pub use forward::{forward_build, BuildReport};
pub use reverse::reverse_build;

/// Platform id used for platform blocks, config sections and the build directory
pub const PLATFORM_ID: &str = "dialogflow";

/// Prefix of Dialogflow system entities
pub const BUILTIN_PREFIX: &str = "@sys.";

/// Marker in front of custom entity references
pub const CUSTOM_PREFIX: &str = "@";

/// Event name of welcome intents
pub const WELCOME_EVENT: &str = "WELCOME";

/// File name marker of sample phrase files
pub const USERSAYS_MARKER: &str = "usersays";

/// File name marker of entity entry files
pub const ENTRIES_MARKER: &str = "entries";
