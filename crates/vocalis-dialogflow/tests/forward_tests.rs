//! Forward build tests: neutral model to agent files
//!
//! Run with: cargo test --package vocalis-dialogflow --test forward_tests

mod common;

use common::{flight_model, model, read, TestAgent};
use serde_json::json;
use vocalis_dialogflow::{forward_build, Error};

// ═══════════════════════════════════════════════════════════════════════════════
// 1. Intents and parameters
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_custom_type_becomes_entity_reference() {
    let agent = TestAgent::new();
    let report = forward_build(&agent.context("en"), &flight_model()).unwrap();

    assert_eq!(report.intents, vec!["BookFlight", "HelpIntent"]);
    assert_eq!(report.entities, vec!["city"]);

    let intent = read(agent.layout.intent_path("BookFlight"));
    assert_eq!(
        intent,
        json!({
            "name": "BookFlight",
            "auto": true,
            "webhookUsed": true,
            "responses": [{
                "parameters": [
                    { "isList": false, "name": "city", "value": "$city", "dataType": "@city" },
                    { "isList": false, "name": "date", "value": "$date", "dataType": "@sys.date" }
                ]
            }]
        })
    );

    let entity = read(agent.layout.entity_path("city"));
    assert_eq!(
        entity,
        json!({
            "name": "city",
            "isOverridable": true,
            "isEnum": false,
            "automatedExpansion": false
        })
    );
}

#[test]
fn test_intent_without_inputs_has_no_responses() {
    let agent = TestAgent::new();
    forward_build(&agent.context("en"), &flight_model()).unwrap();

    let intent = read(agent.layout.intent_path("HelpIntent"));
    assert_eq!(
        intent,
        json!({ "name": "HelpIntent", "auto": true, "webhookUsed": true })
    );
}

#[test]
fn test_builtin_type_needs_no_input_types() {
    let agent = TestAgent::new();
    let model = model(json!({
        "invocation": "greeter",
        "intents": [{
            "name": "MyNameIsIntent",
            "phrases": ["my name is {name}"],
            "inputs": [{ "name": "name", "type": { "dialogflow": "@sys.given-name" } }]
        }]
    }));

    let report = forward_build(&agent.context("en"), &model).unwrap();
    assert!(report.entities.is_empty());
    assert!(!agent.layout.entities_dir().exists());

    let intent = read(agent.layout.intent_path("MyNameIsIntent"));
    assert_eq!(
        intent["responses"][0]["parameters"][0]["dataType"],
        "@sys.given-name"
    );
}

#[test]
fn test_platform_extensions_merge_into_generated_intent() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [{
            "name": "OrderIntent",
            "phrases": ["order {count} pizzas"],
            "inputs": [{
                "name": "count",
                "type": { "dialogflow": "@sys.number" },
                "dialogflow": { "required": true, "prompts": [{ "lang": "en", "value": "How many?" }] }
            }],
            "dialogflow": {
                "priority": 750000,
                "webhookUsed": false,
                "responses": [{ "resetContexts": true }]
            }
        }]
    }));

    forward_build(&agent.context("en"), &model).unwrap();
    let intent = read(agent.layout.intent_path("OrderIntent"));

    assert_eq!(intent["priority"], 750000);
    assert_eq!(intent["webhookUsed"], false);
    assert_eq!(intent["responses"].as_array().unwrap().len(), 1);
    assert_eq!(intent["responses"][0]["resetContexts"], true);

    let parameter = &intent["responses"][0]["parameters"][0];
    assert_eq!(parameter["name"], "count");
    assert_eq!(parameter["dataType"], "@sys.number");
    assert_eq!(parameter["required"], true);
    assert_eq!(parameter["prompts"][0]["value"], "How many?");
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. Sample phrases
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_usersays_tokens_carry_alias_and_meta() {
    let agent = TestAgent::new();
    forward_build(&agent.context("en"), &flight_model()).unwrap();

    let samples = read(agent.layout.usersays_path("BookFlight", "en"));
    assert_eq!(samples.as_array().unwrap().len(), 3);
    assert_eq!(
        samples[0],
        json!({
            "data": [
                { "text": "book a flight to ", "userDefined": false },
                { "text": "Berlin", "userDefined": true, "alias": "city", "meta": "@city" }
            ],
            "isTemplate": false,
            "count": 0
        })
    );

    // a phrase that is only a slot has no empty text span
    assert_eq!(samples[2]["data"].as_array().unwrap().len(), 1);
    assert_eq!(samples[1]["data"][3]["meta"], "@sys.date");
    assert_eq!(samples[1]["data"][3]["text"], "date");
}

#[test]
fn test_usersays_file_uses_lowercase_locale() {
    let agent = TestAgent::new();
    forward_build(&agent.context("en-US"), &flight_model()).unwrap();

    assert!(agent.layout.usersays_path("HelpIntent", "en-us").is_file());
    assert!(agent.layout.entries_path("city", "en-us").is_file());
}

#[test]
fn test_intent_without_phrases_has_no_usersays_file() {
    let agent = TestAgent::new();
    let model = model(json!({ "intents": [{ "name": "SilentIntent" }] }));

    let report = forward_build(&agent.context("en"), &model).unwrap();
    assert_eq!(report.files.len(), 1);
    assert!(!agent.layout.usersays_path("SilentIntent", "en").exists());
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. Entities and synonyms
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_entries_start_with_sanitized_value() {
    let agent = TestAgent::new();
    forward_build(&agent.context("en"), &flight_model()).unwrap();

    let entries = read(agent.layout.entries_path("city", "en"));
    assert_eq!(
        entries,
        json!([
            { "value": "Berlin", "synonyms": ["Berlin", "BER", "Spree Athens"] },
            { "value": "New York", "synonyms": ["New York", "NYC", "Big Apple"] }
        ])
    );
}

#[test]
fn test_synonyms_are_sanitized_and_deduplicated() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [{
            "name": "TravelIntent",
            "phrases": ["to {place}"],
            "inputs": [{ "name": "place", "type": "place" }]
        }],
        "inputTypes": [{
            "name": "place",
            "values": [
                { "value": "Zürich", "synonyms": ["Zurich", "Zrich", "Zü?rich", "ZRH", "!!!"] },
                { "value": "St. Gallen" }
            ]
        }]
    }));

    forward_build(&agent.context("de"), &model).unwrap();
    let entries = read(agent.layout.entries_path("place", "de"));

    assert_eq!(entries[0]["value"], "Zürich");
    assert_eq!(entries[0]["synonyms"], json!(["Zrich", "Zurich", "ZRH"]));
    assert_eq!(entries[1]["synonyms"], json!(["St Gallen"]));
}

#[test]
fn test_input_type_without_values_has_no_entries_file() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [{
            "name": "ColorIntent",
            "phrases": ["{color}"],
            "inputs": [{ "name": "color", "type": "color" }]
        }],
        "inputTypes": [{ "name": "color", "values": [] }]
    }));

    forward_build(&agent.context("en"), &model).unwrap();
    assert!(agent.layout.entity_path("color").is_file());
    assert!(!agent.layout.entries_path("color", "en").exists());
}

#[test]
fn test_entity_extension_renames_or_merges() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [{
            "name": "PickIntent",
            "phrases": ["{fruit} and {size}"],
            "inputs": [
                { "name": "fruit", "type": "fruit" },
                { "name": "size", "type": "size" }
            ]
        }],
        "inputTypes": [
            { "name": "fruit", "dialogflow": "fruits" },
            { "name": "size", "dialogflow": { "isEnum": true, "automatedExpansion": true } }
        ]
    }));

    forward_build(&agent.context("en"), &model).unwrap();

    // files are named after the neutral type, the entity name follows the extension
    let fruit = read(agent.layout.entity_path("fruit"));
    assert_eq!(fruit["name"], "fruits");
    assert_eq!(fruit["isEnum"], false);

    let size = read(agent.layout.entity_path("size"));
    assert_eq!(size["name"], "size");
    assert_eq!(size["isEnum"], true);
    assert_eq!(size["automatedExpansion"], true);
    assert_eq!(size["isOverridable"], true);
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. Raw dialogflow blocks
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_raw_intents_split_out_usersays() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [],
        "dialogflow": {
            "intents": [{
                "name": "Default Fallback Intent",
                "auto": true,
                "fallbackIntent": true,
                "userSays": [{ "data": [{ "text": "huh", "userDefined": false }], "isTemplate": false, "count": 0 }]
            }]
        }
    }));

    let report = forward_build(&agent.context("en-GB"), &model).unwrap();
    assert_eq!(report.intents, vec!["Default Fallback Intent"]);

    let intent = read(agent.layout.intent_path("Default Fallback Intent"));
    assert_eq!(intent["fallbackIntent"], true);
    assert!(intent.get("userSays").is_none());

    let samples = read(agent.layout.usersays_path("Default Fallback Intent", "en-gb"));
    assert_eq!(samples[0]["data"][0]["text"], "huh");
}

#[test]
fn test_raw_entities_split_out_entries() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [],
        "dialogflow": {
            "entities": [{
                "name": "topping",
                "isEnum": true,
                "entries": [{ "value": "cheese", "synonyms": ["cheese", "extra cheese"] }]
            }]
        }
    }));

    forward_build(&agent.context("en"), &model).unwrap();

    let entity = read(agent.layout.entity_path("topping"));
    assert_eq!(entity, json!({ "name": "topping", "isEnum": true }));

    let entries = read(agent.layout.entries_path("topping", "en"));
    assert_eq!(entries[0]["synonyms"][1], "extra cheese");
    assert!(!agent.layout.usersays_path("topping", "en").exists());
}

#[test]
fn test_raw_intents_override_generated_files() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [{ "name": "HelloIntent", "phrases": ["hi"] }],
        "dialogflow": {
            "intents": [{ "name": "HelloIntent", "priority": 1000 }]
        }
    }));

    let report = forward_build(&agent.context("en"), &model).unwrap();
    assert_eq!(report.intents, vec!["HelloIntent"]);
    assert_eq!(
        read(agent.layout.intent_path("HelloIntent")),
        json!({ "name": "HelloIntent", "priority": 1000 })
    );
}

#[test]
fn test_raw_block_without_name_is_rejected() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [],
        "dialogflow": { "intents": [{ "priority": 1 }] }
    }));

    let err = forward_build(&agent.context("en"), &model).unwrap_err();
    assert!(matches!(err, Error::InvalidNative { .. }));
}

// ═══════════════════════════════════════════════════════════════════════════════
// 5. Type resolution errors
// ═══════════════════════════════════════════════════════════════════════════════

fn single_input_model(input: serde_json::Value, input_types: Option<serde_json::Value>) -> vocalis_core::NeutralModel {
    let mut value = json!({
        "intents": [{ "name": "TestIntent", "phrases": ["{slot}"], "inputs": [input] }]
    });
    if let Some(types) = input_types {
        value["inputTypes"] = types;
    }
    model(value)
}

#[test]
fn test_platform_type_without_dialogflow_key_fails() {
    let agent = TestAgent::new();
    let model = single_input_model(
        json!({ "name": "slot", "type": { "alexa": "AMAZON.US_FIRST_NAME" } }),
        None,
    );

    let err = forward_build(&agent.context("en"), &model).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingPlatformMapping { ref intent, ref input } if intent == "TestIntent" && input == "slot"
    ));
}

#[test]
fn test_missing_type_fails() {
    let agent = TestAgent::new();
    for input in [json!({ "name": "slot" }), json!({ "name": "slot", "type": "" })] {
        let model = single_input_model(input, Some(json!([])));
        let err = forward_build(&agent.context("en"), &model).unwrap_err();
        assert!(matches!(err, Error::InvalidInputType { .. }), "{:?}", err);
    }
}

#[test]
fn test_custom_type_without_input_types_fails() {
    let agent = TestAgent::new();
    let model = single_input_model(json!({ "name": "slot", "type": "city" }), None);

    let err = forward_build(&agent.context("en"), &model).unwrap_err();
    assert!(matches!(err, Error::MissingInputTypes { ref type_name } if type_name == "city"));
}

#[test]
fn test_unknown_custom_type_fails() {
    let agent = TestAgent::new();
    let model = single_input_model(
        json!({ "name": "slot", "type": "city" }),
        Some(json!([{ "name": "country" }])),
    );

    let err = forward_build(&agent.context("en"), &model).unwrap_err();
    assert!(matches!(err, Error::UnresolvedType { ref type_name, .. } if type_name == "city"));
    assert!(err.to_string().contains("TestIntent"));
}

#[test]
fn test_failed_build_keeps_earlier_files() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [
            { "name": "FirstIntent", "phrases": ["one"] },
            { "name": "BrokenIntent", "phrases": ["{x}"], "inputs": [{ "name": "x", "type": "missing" }] }
        ],
        "inputTypes": []
    }));

    assert!(forward_build(&agent.context("en"), &model).is_err());
    assert!(agent.layout.intent_path("FirstIntent").is_file());
    assert!(!agent.layout.intent_path("BrokenIntent").exists());
}

#[test]
fn test_duplicate_intent_names_fail_before_writing() {
    let agent = TestAgent::new();
    let model = model(json!({
        "intents": [
            { "name": "A", "phrases": ["first phrase"] },
            { "name": "A", "phrases": ["second phrase"] }
        ]
    }));

    let err = forward_build(&agent.context("en"), &model).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(vocalis_core::Error::InvalidModel { .. })
    ));
    assert!(err.to_string().contains("\"A\""));
    assert!(!agent.layout.intent_path("A").exists());
    assert!(!agent.layout.usersays_path("A", "en").exists());
}
