//! Forward then reverse builds, directly and through a project on disk
//!
//! Run with: cargo test --package vocalis-dialogflow --test round_trip_tests

mod common;

use camino::Utf8PathBuf;
use common::{flight_model, model, read, TestAgent};
use serde_json::json;
use std::fs;
use vocalis_core::{ModelSource, Project};
use vocalis_dialogflow::{forward_build, reverse_build, DialogflowBuilder};

#[test]
fn test_phrases_inputs_and_types_survive_a_round_trip() {
    let agent = TestAgent::new();
    let original = flight_model();

    forward_build(&agent.context("en"), &original).unwrap();
    let reversed = reverse_build(&agent.context("en")).unwrap();

    assert_eq!(reversed.intents.len(), original.intents.len());
    for intent in &original.intents {
        let back = reversed.intent(&intent.name).unwrap();
        assert_eq!(back.phrases, intent.phrases, "phrases of {}", intent.name);
        assert_eq!(back.inputs, intent.inputs, "inputs of {}", intent.name);
        // generated intents always call the webhook
        assert_eq!(
            back.platform("dialogflow"),
            Some(&json!({ "webhookUsed": true }))
        );
    }

    let types = reversed.input_types.unwrap();
    assert_eq!(types.len(), 1);
    let values = types[0].values.as_ref().unwrap();
    assert_eq!(values[0].synonyms, vec!["BER", "Spree Athens"]);
    // sanitized on the way out, so the reverse sees the cleaned synonym
    assert_eq!(values[1].synonyms, vec!["NYC", "Big Apple"]);
}

#[test]
fn test_reverse_then_forward_reproduces_dialogflow_intents() {
    let agent = TestAgent::new();
    agent.intent(
        "Default Welcome Intent",
        json!({
            "name": "Default Welcome Intent",
            "auto": true,
            "webhookUsed": true,
            "events": [{ "name": "WELCOME" }]
        }),
    );

    let reversed = reverse_build(&agent.context("en")).unwrap();
    fs::remove_dir_all(agent.layout.root()).unwrap();

    forward_build(&agent.context("en"), &reversed).unwrap();
    assert_eq!(
        read(agent.layout.intent_path("Default Welcome Intent")),
        json!({
            "name": "Default Welcome Intent",
            "webhookUsed": true,
            "events": [{ "name": "WELCOME" }]
        })
    );
}

#[test]
fn test_sample_text_round_trips_through_a_different_display_text() {
    let agent = TestAgent::new();
    let original = model(json!({
        "intents": [{
            "name": "MyNameIsIntent",
            "phrases": ["my name is {name}", "call me {name} please"],
            "inputs": [{ "name": "name", "type": { "dialogflow": "@sys.given-name" }, "text": "Anna" }]
        }]
    }));

    forward_build(&agent.context("en"), &original).unwrap();
    let reversed = reverse_build(&agent.context("en")).unwrap();

    let intent = reversed.intent("MyNameIsIntent").unwrap();
    assert_eq!(intent.phrases, original.intents[0].phrases);
    assert_eq!(intent.inputs.as_ref().unwrap()[0].text.as_deref(), Some("Anna"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Project-level builds
// ═══════════════════════════════════════════════════════════════════════════════

fn project_fixture(config: &str) -> (tempfile::TempDir, Project) {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
    fs::write(root.join("vocalis.yaml"), config).unwrap();
    fs::create_dir_all(root.join("models")).unwrap();
    fs::write(
        root.join("models").join("en.json"),
        serde_json::to_string_pretty(&flight_model()).unwrap(),
    )
    .unwrap();
    let project = Project::open(Some(&root)).unwrap();
    (temp, project)
}

#[test]
fn test_project_build_applies_config_overrides() {
    let config = r#"
name: flights
dialogflow:
  languageModel:
    en:
      intents:
        - name: DialogflowOnlyIntent
          phrases: [only on dialogflow]
"#;
    let (_temp, project) = project_fixture(config);
    let builder = DialogflowBuilder::new(&project, project.config());

    let report = builder.build("en", None).unwrap();
    assert_eq!(
        report.intents,
        vec!["BookFlight", "HelpIntent", "DialogflowOnlyIntent"]
    );
    assert!(builder.layout().root().starts_with(project.build_dir()));

    builder.write_agent(&project.locales().unwrap(), None).unwrap();
    let agent = read(builder.layout().agent_file());
    assert_eq!(agent["displayName"], "flight booker");
    assert_eq!(agent["language"], "en");
    assert_eq!(read(builder.layout().package_file())["version"], "1.0.0");
}

#[test]
fn test_project_reverse_matches_neutral_model() {
    let (_temp, project) = project_fixture("name: flights\n");
    let builder = DialogflowBuilder::new(&project, project.config());

    builder.build("en", None).unwrap();
    let reversed = builder.reverse("en", "en").unwrap();
    let neutral = project.model("en", None, None).unwrap();

    let names = |m: &vocalis_core::NeutralModel| -> Vec<String> {
        m.intents.iter().map(|i| i.name.clone()).collect()
    };
    assert_eq!(names(&reversed), names(&neutral));

    let path = project.save_model("en-reversed", &reversed).unwrap();
    assert!(path.is_file());
    assert!(project.locales().unwrap().contains(&"en-reversed".to_string()));
}
