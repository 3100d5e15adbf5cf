//! Common test utilities for vocalis-dialogflow
//!
//! Scratch agent directories, a flight booking model fixture and helpers
//! for reading generated files back as JSON.

#![allow(dead_code)]

use camino::Utf8PathBuf;
use serde_json::{json, Value};
use std::fs;
use vocalis_core::NeutralModel;
use vocalis_dialogflow::{AgentLayout, BuildContext};

/// Temporary agent directory; keep the `TempDir` alive for the whole test
pub struct TestAgent {
    pub temp: tempfile::TempDir,
    pub layout: AgentLayout,
}

impl TestAgent {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
        Self {
            temp,
            layout: AgentLayout::new(root.join("dialogflow")),
        }
    }

    pub fn context(&self, locale: &str) -> BuildContext {
        BuildContext::new(self.layout.clone(), locale)
    }

    /// Write a native intent file
    pub fn intent(&self, name: &str, content: Value) -> &Self {
        self.write(self.layout.intent_path(name), content)
    }

    /// Write a sample phrase file
    pub fn usersays(&self, name: &str, locale: &str, content: Value) -> &Self {
        self.write(self.layout.usersays_path(name, locale), content)
    }

    /// Write a native entity file
    pub fn entity(&self, name: &str, content: Value) -> &Self {
        self.write(self.layout.entity_path(name), content)
    }

    /// Write an entity entries file
    pub fn entries(&self, name: &str, locale: &str, content: Value) -> &Self {
        self.write(self.layout.entries_path(name, locale), content)
    }

    fn write(&self, path: Utf8PathBuf, content: Value) -> &Self {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
        self
    }
}

/// Read a generated file as JSON
pub fn read(path: impl AsRef<std::path::Path>) -> Value {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).unwrap()
}

pub fn model(value: Value) -> NeutralModel {
    serde_json::from_value(value).unwrap()
}

/// Flight booking model with a custom and a built-in slot
pub fn flight_model() -> NeutralModel {
    model(json!({
        "invocation": "flight booker",
        "intents": [
            {
                "name": "BookFlight",
                "phrases": [
                    "book a flight to {city}",
                    "fly to {city} on {date}",
                    "{city}"
                ],
                "inputs": [
                    { "name": "city", "type": "city", "text": "Berlin" },
                    { "name": "date", "type": { "dialogflow": "@sys.date" } }
                ]
            },
            {
                "name": "HelpIntent",
                "phrases": ["help", "what can I do"]
            }
        ],
        "inputTypes": [
            {
                "name": "city",
                "values": [
                    { "value": "Berlin", "synonyms": ["BER", "Spree Athens"] },
                    { "value": "New York", "synonyms": ["NYC", "Big Apple!"] }
                ]
            }
        ]
    }))
}
