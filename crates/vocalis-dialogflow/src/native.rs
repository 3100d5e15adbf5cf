//! Dialogflow agent schema
//!
//! Typed views of the JSON files found in an exported agent. Every field the
//! transforms look at is an explicit optional field; anything else is kept in
//! the flattened `extra` map so files survive a read/write cycle unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `intents/<name>.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeIntent {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<IntentResponse>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_used: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_for_slot_filling: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_intent: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<IntentEvent>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NativeIntent {
    /// Whether this is the agent's fallback intent
    pub fn is_fallback(&self) -> bool {
        self.fallback_intent == Some(true)
    }

    /// Whether any of the intent's events is the welcome trigger
    pub fn is_welcome(&self) -> bool {
        self.events
            .iter()
            .flatten()
            .any(|event| event.name == crate::WELCOME_EVENT)
    }

    /// Parameters of the first response, which is where slots are declared
    pub fn parameters(&self) -> &[IntentParameter] {
        self.responses
            .as_deref()
            .and_then(|r| r.first())
            .and_then(|r| r.parameters.as_deref())
            .unwrap_or(&[])
    }

    /// Parameters of every response, in order
    pub fn all_parameters(&self) -> impl Iterator<Item = &IntentParameter> {
        self.responses
            .iter()
            .flatten()
            .flat_map(|r| r.parameters.iter().flatten())
    }
}

/// Entry of an intent's `responses` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_contexts: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_contexts: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<IntentParameter>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ResponseMessage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_response_platforms: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<Vec<Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Slot declaration inside a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_list: Option<bool>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response message, one per language and message type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Either a single string or a list of alternatives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResponseMessage {
    /// Whether the message carries any speech output
    pub fn has_speech(&self) -> bool {
        match &self.speech {
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            _ => false,
        }
    }
}

/// Event that triggers an intent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentEvent {
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record of `intents/<name>_usersays_<locale>.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSays {
    #[serde(default)]
    pub data: Vec<UserSaysData>,

    #[serde(default)]
    pub is_template: bool,

    #[serde(default)]
    pub count: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Text span of a sample phrase; slot spans carry an alias
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSaysData {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub user_defined: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `entities/<name>.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeEntity {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_overridable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enum: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_expansion: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record of `entities/<name>_entries_<locale>.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityEntry {
    pub value: String,

    #[serde(default)]
    pub synonyms: Vec<String>,
}
