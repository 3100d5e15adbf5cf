//! Reverse build: Dialogflow agent files to a neutral model

use crate::context::BuildContext;
use crate::defaults::{default_entity, default_intent, entity_patch, intent_patch};
use crate::error::Result;
use crate::files::read_json;
use crate::native::{EntityEntry, NativeEntity, NativeIntent, UserSays};
use crate::phrase;
use crate::{BUILTIN_PREFIX, CUSTOM_PREFIX, PLATFORM_ID};
use serde_json::{json, Value};
use tracing::debug;
use vocalis_core::{
    Input, InputType, InputTypeRef, InputTypeValue, Intent, Invocation, NeutralModel,
};

/// Read the agent files of `ctx` back into a neutral model for `ctx.locale`.
///
/// Fallback and welcome intents have no neutral counterpart; their non-default
/// properties are kept under `dialogflow.intents` instead.
pub fn reverse_build(ctx: &BuildContext) -> Result<NeutralModel> {
    let defaults = default_intent();
    let mut intents = Vec::new();
    let mut platform_intents: Vec<Value> = Vec::new();

    for path in ctx.layout.intent_files()? {
        let native: NativeIntent = read_json(&path)?;
        let patch = intent_patch(&native, &defaults, &ctx.locale);

        if native.is_fallback() || native.is_welcome() {
            debug!("Keeping {} as a dialogflow intent", native.name);
            platform_intents.push(patch.with_name(&native.name).to_value()?);
            continue;
        }

        let mut intent = Intent {
            name: native.name.clone(),
            inputs: reverse_inputs(&native),
            ..Default::default()
        };
        if !patch.is_empty() {
            intent.set_platform(PLATFORM_ID, patch.to_value()?);
        }

        if let Some(path) = ctx.layout.find_usersays(&native.name, &ctx.locale) {
            let samples: Vec<UserSays> = read_json(&path)?;
            for sample in &samples {
                let decoded = phrase::decode(sample);
                apply_sample_texts(&mut intent, decoded.sample_texts);
                intent.phrases.push(decoded.phrase);
            }
        }

        intents.push(intent);
    }

    let input_types = reverse_input_types(ctx)?;

    let mut model = NeutralModel {
        invocation: Invocation::Name(String::new()),
        intents,
        input_types: (!input_types.is_empty()).then_some(input_types),
        ..Default::default()
    };
    if !platform_intents.is_empty() {
        model.set_platform(PLATFORM_ID, json!({ "intents": platform_intents }));
    }

    debug!(
        "Reverse built {} intents from {} for model {}",
        model.intents.len(),
        ctx.locale,
        ctx.model_locale
    );
    Ok(model)
}

/// One input per typed parameter, across all responses
fn reverse_inputs(native: &NativeIntent) -> Option<Vec<Input>> {
    let inputs: Vec<Input> = native
        .all_parameters()
        .filter_map(|parameter| {
            let data_type = parameter.data_type.as_deref()?;
            let input_type = if data_type.starts_with(BUILTIN_PREFIX) {
                InputTypeRef::platform(PLATFORM_ID, data_type)
            } else {
                let name = data_type.strip_prefix(CUSTOM_PREFIX).unwrap_or(data_type);
                InputTypeRef::Name(name.to_string())
            };
            Some(Input {
                name: parameter.name.clone(),
                input_type: Some(input_type),
                ..Default::default()
            })
        })
        .collect();

    (!inputs.is_empty()).then_some(inputs)
}

fn apply_sample_texts(intent: &mut Intent, sample_texts: Vec<(String, String)>) {
    let Some(inputs) = intent.inputs.as_mut() else {
        return;
    };
    for (slot, text) in sample_texts {
        for input in inputs.iter_mut().filter(|i| i.name == slot) {
            input.text = Some(text.clone());
        }
    }
}

fn reverse_input_types(ctx: &BuildContext) -> Result<Vec<InputType>> {
    let defaults = default_entity();
    let mut input_types = Vec::new();

    for path in ctx.layout.entity_files()? {
        let native: NativeEntity = read_json(&path)?;
        let mut input_type = InputType {
            name: native.name.clone(),
            ..Default::default()
        };

        let patch = entity_patch(&native, &defaults);
        if !patch.is_empty() {
            input_type.set_platform(PLATFORM_ID, patch.to_value()?);
        }

        if let Some(path) = ctx.layout.find_entries(&native.name, &ctx.locale) {
            let entries: Vec<EntityEntry> = read_json(&path)?;
            let values: Vec<InputTypeValue> = entries
                .into_iter()
                .map(|entry| InputTypeValue {
                    synonyms: entry
                        .synonyms
                        .into_iter()
                        .filter(|s| *s != entry.value)
                        .collect(),
                    value: entry.value,
                })
                .collect();
            if !values.is_empty() {
                input_type.values = Some(values);
            }
        }

        input_types.push(input_type);
    }

    Ok(input_types)
}
