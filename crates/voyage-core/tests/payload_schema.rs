//! JsonSchema validation tests for the wire-facing types.

use chrono::Utc;
use schemars::schema_for;
use voyage_core::entities::TeamTechStackItemVote;
use voyage_core::requests::SelectionUpdate;
use voyage_core::responses::{CatalogCategory, CatalogItem, VoterSummary};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[test]
fn selection_payload_matches_schema() {
    let schema = serde_json::to_value(schema_for!(SelectionUpdate)).unwrap();
    let payload = serde_json::json!({
        "categories": [
            {
                "categoryId": "cat-00000001",
                "techs": [
                    {"techId": "tch-00000001", "isSelected": true},
                    {"techId": "tch-00000002", "isSelected": false}
                ]
            }
        ]
    });
    let errors = validate_against_schema(&schema, &payload);
    assert!(errors.is_empty(), "unexpected schema errors: {errors:?}");
}

#[test]
fn selection_payload_rejects_snake_case_fields() {
    let schema = serde_json::to_value(schema_for!(SelectionUpdate)).unwrap();
    let payload = serde_json::json!({
        "categories": [
            {"category_id": "cat-00000001", "techs": []}
        ]
    });
    let errors = validate_against_schema(&schema, &payload);
    assert!(!errors.is_empty(), "missing categoryId should fail validation");
}

#[test]
fn catalog_matches_schema() {
    let category = CatalogCategory {
        id: "cat-00000001".into(),
        name: "Frontend".into(),
        description: "Client side frameworks".into(),
        items: vec![CatalogItem {
            id: "tch-00000001".into(),
            name: "Svelte".into(),
            is_selected: true,
            voters: vec![VoterSummary {
                member_id: "mbr-00000001".into(),
                user_id: "usr-00000001".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                avatar: None,
                voted_at: Utc::now(),
            }],
        }],
    };

    let schema = serde_json::to_value(schema_for!(CatalogCategory)).unwrap();
    let instance = serde_json::to_value(&category).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "unexpected schema errors: {errors:?}");
}

#[test]
fn vote_matches_schema() {
    let now = Utc::now();
    let vote = TeamTechStackItemVote {
        id: "vot-00000001".into(),
        team_tech_id: "tch-00000001".into(),
        team_member_id: "mbr-00000001".into(),
        created_at: now,
        updated_at: now,
    };

    let schema = serde_json::to_value(schema_for!(TeamTechStackItemVote)).unwrap();
    let instance = serde_json::to_value(&vote).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "unexpected schema errors: {errors:?}");
}
