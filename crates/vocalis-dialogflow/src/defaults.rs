//! Default-property filter
//!
//! Dialogflow fills every intent and entity file with the same defaults. Only
//! fields that differ from them are worth keeping in the neutral model, under
//! the intent's or input type's `dialogflow` block. The patches computed here
//! are sparse: a `None` field means "same as the default".

use crate::native::{
    IntentEvent, IntentResponse, NativeEntity, NativeIntent, ResponseMessage,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Intent as Dialogflow creates it when nothing is customised
pub fn default_intent() -> NativeIntent {
    NativeIntent {
        name: String::new(),
        auto: Some(true),
        contexts: Some(Vec::new()),
        responses: Some(vec![IntentResponse {
            reset_contexts: Some(false),
            affected_contexts: Some(Vec::new()),
            parameters: Some(Vec::new()),
            messages: None,
            default_response_platforms: Some(Map::new()),
            speech: Some(Vec::new()),
            extra: Map::new(),
        }]),
        priority: Some(500_000),
        webhook_used: Some(false),
        webhook_for_slot_filling: Some(false),
        fallback_intent: Some(false),
        events: Some(Vec::new()),
        extra: Map::new(),
    }
}

/// Entity as Dialogflow creates it when nothing is customised
pub fn default_entity() -> NativeEntity {
    NativeEntity {
        name: String::new(),
        is_overridable: Some(true),
        is_enum: Some(false),
        automated_expansion: Some(false),
        extra: Map::new(),
    }
}

/// Non-default fields of an intent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentPatch {
    /// Only set for intents kept verbatim (fallback and welcome intents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Vec<String>>,

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

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<ResponsePatch>>,
}

/// Non-default fields of the first response. Parameters are never part of it;
/// they become the intent's inputs instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_contexts: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_contexts: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_response_platforms: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ResponseMessage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<Vec<Value>>,
}

/// Non-default fields of an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_overridable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enum: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_expansion: Option<bool>,
}

impl IntentPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Same patch, carrying the intent name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl ResponsePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl EntityPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Native value when present and different from the default
fn differs<T: PartialEq + Clone>(native: &Option<T>, default: &Option<T>) -> Option<T> {
    match native {
        Some(value) if Some(value) != default.as_ref() => Some(value.clone()),
        _ => None,
    }
}

/// Native array when it holds different elements than the default, ignoring
/// order. The native order is kept.
fn set_differs<T: PartialEq + Clone>(
    native: &Option<Vec<T>>,
    default: &Option<Vec<T>>,
) -> Option<Vec<T>> {
    let native = native.as_ref()?;
    let default = default.as_deref().unwrap_or(&[]);

    let changed = native.iter().any(|v| !default.contains(v))
        || default.iter().any(|v| !native.contains(v));

    changed.then(|| native.clone())
}

/// Compute the non-default fields of `native` relative to `defaults`.
///
/// Response messages are only kept for `locale` and only when they carry
/// speech; messages in other languages belong to other model files.
pub fn intent_patch(native: &NativeIntent, defaults: &NativeIntent, locale: &str) -> IntentPatch {
    let mut patch = IntentPatch {
        name: None,
        auto: differs(&native.auto, &defaults.auto),
        contexts: set_differs(&native.contexts, &defaults.contexts),
        priority: differs(&native.priority, &defaults.priority),
        webhook_used: differs(&native.webhook_used, &defaults.webhook_used),
        webhook_for_slot_filling: differs(
            &native.webhook_for_slot_filling,
            &defaults.webhook_for_slot_filling,
        ),
        fallback_intent: differs(&native.fallback_intent, &defaults.fallback_intent),
        events: set_differs(&native.events, &defaults.events),
        responses: None,
    };

    if native.responses != defaults.responses {
        let first = native.responses.as_deref().and_then(|r| r.first());
        let default_first = defaults.responses.as_deref().and_then(|r| r.first());

        if let Some(first) = first {
            let empty = IntentResponse::default();
            let default_first = default_first.unwrap_or(&empty);
            let response = response_patch(first, default_first, locale);
            if !response.is_empty() {
                patch.responses = Some(vec![response]);
            }
        }
    }

    patch
}

fn response_patch(native: &IntentResponse, defaults: &IntentResponse, locale: &str) -> ResponsePatch {
    let messages = if native.messages != defaults.messages {
        let kept: Vec<ResponseMessage> = native
            .messages
            .iter()
            .flatten()
            .filter(|m| m.lang.as_deref() == Some(locale) && m.has_speech())
            .cloned()
            .collect();
        (!kept.is_empty()).then_some(kept)
    } else {
        None
    };

    ResponsePatch {
        reset_contexts: differs(&native.reset_contexts, &defaults.reset_contexts),
        affected_contexts: differs(&native.affected_contexts, &defaults.affected_contexts),
        default_response_platforms: differs(
            &native.default_response_platforms,
            &defaults.default_response_platforms,
        ),
        messages,
        speech: differs(&native.speech, &defaults.speech),
    }
}

/// Compute the non-default fields of an entity relative to `defaults`
pub fn entity_patch(native: &NativeEntity, defaults: &NativeEntity) -> EntityPatch {
    EntityPatch {
        is_overridable: differs(&native.is_overridable, &defaults.is_overridable),
        is_enum: differs(&native.is_enum, &defaults.is_enum),
        automated_expansion: differs(&native.automated_expansion, &defaults.automated_expansion),
    }
}
