//! Agent directory layout and JSON file I/O
//!
//! ```text
//! <build>/dialogflow/
//!   agent.json
//!   package.json
//!   intents/<intent>.json
//!   intents/<intent>_usersays_<locale>.json
//!   entities/<entity>.json
//!   entities/<entity>_entries_<locale>.json
//! ```

use crate::error::{Error, Result};
use crate::{ENTRIES_MARKER, USERSAYS_MARKER};
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use tracing::debug;

/// Paths inside a Dialogflow agent directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentLayout {
    root: Utf8PathBuf,
}

impl AgentLayout {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn intents_dir(&self) -> Utf8PathBuf {
        self.root.join("intents")
    }

    pub fn entities_dir(&self) -> Utf8PathBuf {
        self.root.join("entities")
    }

    pub fn agent_file(&self) -> Utf8PathBuf {
        self.root.join("agent.json")
    }

    pub fn package_file(&self) -> Utf8PathBuf {
        self.root.join("package.json")
    }

    pub fn intent_path(&self, name: &str) -> Utf8PathBuf {
        self.intents_dir().join(format!("{}.json", name))
    }

    pub fn usersays_path(&self, name: &str, locale: &str) -> Utf8PathBuf {
        self.intents_dir()
            .join(format!("{}_{}_{}.json", name, USERSAYS_MARKER, locale))
    }

    pub fn entity_path(&self, name: &str) -> Utf8PathBuf {
        self.entities_dir().join(format!("{}.json", name))
    }

    pub fn entries_path(&self, name: &str, locale: &str) -> Utf8PathBuf {
        self.entities_dir()
            .join(format!("{}_{}_{}.json", name, ENTRIES_MARKER, locale))
    }

    /// Create the intents directory if it does not exist yet
    pub fn ensure_intents_dir(&self) -> Result<()> {
        ensure_dir(&self.intents_dir())
    }

    /// Create the entities directory if it does not exist yet
    pub fn ensure_entities_dir(&self) -> Result<()> {
        ensure_dir(&self.entities_dir())
    }

    /// Intent files sorted by name, sample phrase files excluded
    pub fn intent_files(&self) -> Result<Vec<Utf8PathBuf>> {
        json_files(&self.intents_dir(), USERSAYS_MARKER)
    }

    /// Entity files sorted by name, entry files excluded
    pub fn entity_files(&self) -> Result<Vec<Utf8PathBuf>> {
        json_files(&self.entities_dir(), ENTRIES_MARKER)
    }

    /// Sample phrase file of an intent; the lowercase locale spelling is tried first
    pub fn find_usersays(&self, name: &str, locale: &str) -> Option<Utf8PathBuf> {
        locale_candidates(locale)
            .map(|l| self.usersays_path(name, &l))
            .find(|p| p.is_file())
    }

    /// Entries file of an entity; the lowercase locale spelling is tried first
    pub fn find_entries(&self, name: &str, locale: &str) -> Option<Utf8PathBuf> {
        locale_candidates(locale)
            .map(|l| self.entries_path(name, &l))
            .find(|p| p.is_file())
    }
}

fn locale_candidates(locale: &str) -> impl Iterator<Item = String> {
    let lower = locale.to_lowercase();
    let exact = (lower != locale).then(|| locale.to_string());
    std::iter::once(lower).chain(exact)
}

fn ensure_dir(dir: &Utf8Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        debug!("Created directory {}", dir);
    }
    Ok(())
}

fn json_files(dir: &Utf8Path, skip_marker: &str) -> Result<Vec<Utf8PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        let path = entry.path();
        if path.extension() != Some("json") || !path.is_file() {
            continue;
        }
        if entry.file_name().contains(skip_marker) {
            continue;
        }
        files.push(path.to_owned());
    }
    files.sort();
    Ok(files)
}

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::json_file(path.as_str(), e))
}

/// Serialize `value` as tab-indented JSON and write it to `path`
pub fn write_json<T: Serialize + ?Sized>(path: &Utf8Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::json_file(path.as_str(), e))?;

    fs::write(path, buf)?;
    debug!("Wrote {}", path);
    Ok(())
}
