//! Platform-neutral language model
//!
//! One `models/<locale>.json` file deserializes into a [`NeutralModel`]. Platform
//! plugins keep their own data next to the neutral fields, keyed by platform id
//! (e.g. `"dialogflow"`); those blocks are carried through untouched in the
//! flattened `platforms` maps.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

/// Invocation name, either shared by every platform or set per platform id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Invocation {
    Name(String),
    PerPlatform(BTreeMap<String, String>),
}

impl Default for Invocation {
    fn default() -> Self {
        Invocation::Name(String::new())
    }
}

impl Invocation {
    /// Invocation name for a platform, if one can be determined
    pub fn for_platform(&self, platform: &str) -> Option<&str> {
        match self {
            Invocation::Name(name) => Some(name.as_str()),
            Invocation::PerPlatform(names) => names.get(platform).map(String::as_str),
        }
    }
}

/// Root of a neutral language model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeutralModel {
    #[serde(default)]
    pub invocation: Invocation,

    #[serde(default)]
    pub intents: Vec<Intent>,

    /// Omitted entirely when no types are defined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_types: Option<Vec<InputType>>,

    /// Platform-specific blocks (`dialogflow`, `alexa`, ...)
    #[serde(flatten)]
    pub platforms: Map<String, Value>,
}

/// A single intent with its sample phrases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,

    #[serde(default)]
    pub phrases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<Input>>,

    #[serde(flatten)]
    pub platforms: Map<String, Value>,
}

/// Slot used inside an intent's phrases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputTypeRef>,

    /// Sample text shown in place of the slot name on platforms that support it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub platforms: Map<String, Value>,
}

/// Reference from an input to its type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputTypeRef {
    /// Name of an entry in the model's `inputTypes`
    Name(String),
    /// Platform id to platform-native type, e.g. `{"dialogflow": "@sys.any"}`
    Platform(BTreeMap<String, String>),
}

impl InputTypeRef {
    /// Build a platform-qualified reference for a single platform
    pub fn platform(platform: impl Into<String>, native: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(platform.into(), native.into());
        InputTypeRef::Platform(map)
    }
}

/// Enumerable type (entity) with values and synonyms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputType {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<InputTypeValue>>,

    #[serde(flatten)]
    pub platforms: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTypeValue {
    pub value: String,

    #[serde(default)]
    pub synonyms: Vec<String>,
}

macro_rules! platform_accessors {
    ($ty:ty) => {
        impl $ty {
            /// Platform-specific block for `platform`, if present
            pub fn platform(&self, platform: &str) -> Option<&Value> {
                self.platforms.get(platform)
            }

            /// Replace the platform-specific block for `platform`
            pub fn set_platform(&mut self, platform: impl Into<String>, value: Value) {
                self.platforms.insert(platform.into(), value);
            }
        }
    };
}

platform_accessors!(NeutralModel);
platform_accessors!(Intent);
platform_accessors!(Input);
platform_accessors!(InputType);

impl NeutralModel {
    /// Parse a model from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize the model as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up an intent by name
    pub fn intent(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name == name)
    }

    /// All input types whose name matches exactly
    pub fn input_types_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a InputType> {
        self.input_types
            .iter()
            .flatten()
            .filter(move |t| t.name == name)
    }

    /// Fail when two intents share a name
    pub fn check_unique_intents(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for intent in &self.intents {
            if !seen.insert(intent.name.as_str()) {
                return Err(Error::invalid_model(format!(
                    "Duplicate intent name \"{}\"",
                    intent.name
                )));
            }
        }
        Ok(())
    }

    /// Check model invariants: intent names are unique and every input
    /// referencing a type by name resolves to an entry in `inputTypes`.
    ///
    /// Platform-qualified type references are left to the platform plugin.
    pub fn validate(&self) -> Result<()> {
        self.check_unique_intents()?;

        for intent in &self.intents {
            for input in intent.inputs.iter().flatten() {
                if let Some(InputTypeRef::Name(type_name)) = &input.input_type {
                    if self.input_types_named(type_name).next().is_none() {
                        return Err(Error::invalid_model(format!(
                            "Input type \"{}\" of input \"{}\" in intent \"{}\" must be defined in inputTypes",
                            type_name, input.name, intent.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
