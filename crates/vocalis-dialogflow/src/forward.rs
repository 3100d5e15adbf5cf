//! Forward build: neutral model to Dialogflow agent files
//!
//! Every intent becomes `intents/<name>.json` plus a sample phrase file, every
//! custom input type that an intent uses becomes `entities/<name>.json` plus an
//! entries file. Raw `dialogflow.intents` / `dialogflow.entities` blocks of the
//! model are written last, so they win over generated files of the same name.

use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::files::write_json;
use crate::native::{EntityEntry, NativeIntent, UserSays};
use crate::phrase;
use crate::{BUILTIN_PREFIX, CUSTOM_PREFIX, PLATFORM_ID};
use camino::Utf8PathBuf;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use vocalis_core::{DeepMerge, Input, InputType, InputTypeRef, InputTypeValue, Intent, NeutralModel};

static UNSAFE_SYNONYM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z\-_ ]").expect("synonym regex is valid"));

/// Files written by a forward build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Intent names, in the order they were written
    pub intents: Vec<String>,
    /// Entity names, in the order they were first written
    pub entities: Vec<String>,
    /// Every file written
    pub files: Vec<Utf8PathBuf>,
}

impl BuildReport {
    fn record_file(&mut self, path: Utf8PathBuf) {
        if !self.files.contains(&path) {
            self.files.push(path);
        }
    }

    fn record_intent(&mut self, name: &str) {
        if !self.intents.iter().any(|n| n == name) {
            self.intents.push(name.to_string());
        }
    }

    fn record_entity(&mut self, name: &str) {
        if !self.entities.iter().any(|n| n == name) {
            self.entities.push(name.to_string());
        }
    }
}

/// Strip everything Dialogflow does not accept in a synonym
pub fn sanitize_synonym(text: &str) -> String {
    UNSAFE_SYNONYM_CHARS.replace_all(text, "").into_owned()
}

/// Write the agent files for one locale of `model`.
///
/// Duplicate intent names are rejected before anything is written. After that
/// the build stops at the first error; files written before it stay on disk.
pub fn forward_build(ctx: &BuildContext, model: &NeutralModel) -> Result<BuildReport> {
    model.check_unique_intents()?;

    let mut report = BuildReport::default();
    ctx.layout.ensure_intents_dir()?;
    debug!(
        "Building model {} as {} (stage: {})",
        ctx.model_locale,
        ctx.locale,
        ctx.stage.as_deref().unwrap_or("none")
    );

    for intent in &model.intents {
        build_intent(ctx, model, intent, &mut report)?;
    }

    write_raw_intents(ctx, model, &mut report)?;
    write_raw_entities(ctx, model, &mut report)?;

    info!(
        "Built {} intents and {} entities for {} from model {}",
        report.intents.len(),
        report.entities.len(),
        ctx.locale,
        ctx.model_locale
    );
    Ok(report)
}

fn build_intent(
    ctx: &BuildContext,
    model: &NeutralModel,
    intent: &Intent,
    report: &mut BuildReport,
) -> Result<()> {
    let merger = DeepMerge::by_index();
    let mut native = json!({
        "name": intent.name,
        "auto": true,
        "webhookUsed": true,
    });

    if let Some(inputs) = &intent.inputs {
        let mut parameters = Vec::with_capacity(inputs.len());
        for input in inputs {
            let data_type = resolve_data_type(ctx, model, intent, input, report)?;
            let mut parameter = json!({
                "isList": false,
                "name": input.name,
                "value": format!("${}", input.name),
                "dataType": data_type,
            });
            if let Some(extension) = input.platform(PLATFORM_ID) {
                merger.merge(&mut parameter, extension);
            }
            parameters.push(parameter);
        }
        native["responses"] = json!([{ "parameters": parameters }]);
    }

    if let Some(extension) = intent.platform(PLATFORM_ID) {
        merger.merge(&mut native, extension);
    }

    let path = ctx.layout.intent_path(&intent.name);
    write_json(&path, &native)?;
    report.record_file(path);
    report.record_intent(&intent.name);

    let native: NativeIntent = serde_json::from_value(native)
        .map_err(|e| Error::invalid_native(format!("intent {}", intent.name), e.to_string()))?;

    let inputs = intent.inputs.as_deref().unwrap_or(&[]);
    let samples: Vec<UserSays> = intent
        .phrases
        .iter()
        .map(|p| phrase::encode(p, inputs, native.parameters()))
        .collect();

    if samples.is_empty() {
        debug!("Intent {} has no phrases, skipping sample file", intent.name);
    } else {
        let path = ctx.layout.usersays_path(&intent.name, &ctx.output_locale());
        write_json(&path, &samples)?;
        report.record_file(path);
    }

    Ok(())
}

/// Native `dataType` of an input. Custom types are written out as entities.
fn resolve_data_type(
    ctx: &BuildContext,
    model: &NeutralModel,
    intent: &Intent,
    input: &Input,
    report: &mut BuildReport,
) -> Result<String> {
    let type_name = match &input.input_type {
        Some(InputTypeRef::Platform(types)) => match types.get(PLATFORM_ID) {
            Some(native) if native.starts_with(BUILTIN_PREFIX) => return Ok(native.clone()),
            Some(native) => native.as_str(),
            None => {
                return Err(Error::missing_platform_mapping(&intent.name, &input.name));
            }
        },
        Some(InputTypeRef::Name(name)) if name.starts_with(BUILTIN_PREFIX) => {
            return Ok(name.clone());
        }
        Some(InputTypeRef::Name(name)) => name.as_str(),
        None => "",
    };

    if type_name.is_empty() {
        return Err(Error::invalid_input_type(&intent.name, &input.name));
    }

    if model.input_types.is_none() {
        return Err(Error::missing_input_types(type_name));
    }

    let matched: Vec<&InputType> = model.input_types_named(type_name).collect();
    if matched.is_empty() {
        return Err(Error::unresolved_type(&intent.name, &input.name, type_name));
    }

    for input_type in matched {
        write_entity(ctx, input_type, report)?;
    }

    Ok(format!("{}{}", CUSTOM_PREFIX, type_name))
}

fn write_entity(ctx: &BuildContext, input_type: &InputType, report: &mut BuildReport) -> Result<()> {
    let mut entity = json!({
        "name": input_type.name,
        "isOverridable": true,
        "isEnum": false,
        "automatedExpansion": false,
    });

    match input_type.platform(PLATFORM_ID) {
        Some(Value::String(name)) => entity["name"] = json!(name),
        Some(extension @ Value::Object(_)) => DeepMerge::by_index().merge(&mut entity, extension),
        Some(other) => warn!(
            "Ignoring dialogflow block of input type {}: expected a name or an object, got {}",
            input_type.name, other
        ),
        None => {}
    }

    ctx.layout.ensure_entities_dir()?;
    let path = ctx.layout.entity_path(&input_type.name);
    write_json(&path, &entity)?;
    report.record_file(path);
    report.record_entity(&input_type.name);

    let values = input_type.values.as_deref().unwrap_or(&[]);
    if !values.is_empty() {
        let entries: Vec<EntityEntry> = values.iter().map(entity_entry).collect();
        let path = ctx
            .layout
            .entries_path(&input_type.name, &ctx.output_locale());
        write_json(&path, &entries)?;
        report.record_file(path);
    }

    Ok(())
}

/// Entry with the value itself as first synonym, followed by the sanitized
/// user synonyms. Empty and repeated synonyms are dropped.
fn entity_entry(value: &InputTypeValue) -> EntityEntry {
    let mut synonyms: Vec<String> = Vec::with_capacity(value.synonyms.len() + 1);

    for synonym in std::iter::once(&value.value).chain(&value.synonyms) {
        let clean = sanitize_synonym(synonym);
        if clean.is_empty() || synonyms.contains(&clean) {
            continue;
        }
        synonyms.push(clean);
    }

    EntityEntry {
        value: value.value.clone(),
        synonyms,
    }
}

/// Objects of `dialogflow.<key>` in the model, each with its `name`
fn raw_blocks(model: &NeutralModel, key: &str) -> Result<Vec<(String, Map<String, Value>)>> {
    let Some(blocks) = model.platform(PLATFORM_ID).and_then(|p| p.get(key)) else {
        return Ok(Vec::new());
    };

    let source = format!("{}.{}", PLATFORM_ID, key);
    let blocks = blocks
        .as_array()
        .ok_or_else(|| Error::invalid_native(&source, "expected an array"))?;

    blocks
        .iter()
        .map(|block| {
            let object = block
                .as_object()
                .ok_or_else(|| Error::invalid_native(&source, "expected an object"))?;
            let name = object
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::invalid_native(&source, "missing name"))?;
            Ok((name.to_string(), object.clone()))
        })
        .collect()
}

fn write_raw_intents(ctx: &BuildContext, model: &NeutralModel, report: &mut BuildReport) -> Result<()> {
    for (name, mut intent) in raw_blocks(model, "intents")? {
        let user_says = intent.remove("userSays");

        let path = ctx.layout.intent_path(&name);
        write_json(&path, &intent)?;
        report.record_file(path);
        report.record_intent(&name);

        if let Some(user_says) = user_says {
            let path = ctx.layout.usersays_path(&name, &ctx.output_locale());
            write_json(&path, &user_says)?;
            report.record_file(path);
        }
        debug!("Wrote raw intent {}", name);
    }
    Ok(())
}

fn write_raw_entities(ctx: &BuildContext, model: &NeutralModel, report: &mut BuildReport) -> Result<()> {
    let blocks = raw_blocks(model, "entities")?;
    if blocks.is_empty() {
        return Ok(());
    }

    ctx.layout.ensure_entities_dir()?;
    for (name, mut entity) in blocks {
        let entries = entity.remove("entries");

        let path = ctx.layout.entity_path(&name);
        write_json(&path, &entity)?;
        report.record_file(path);
        report.record_entity(&name);

        if let Some(entries) = entries {
            let path = ctx.layout.entries_path(&name, &ctx.output_locale());
            write_json(&path, &entries)?;
            report.record_file(path);
        }
        debug!("Wrote raw entity {}", name);
    }
    Ok(())
}
