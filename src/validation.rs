//! Provider payload validation
//!
//! Completion replies are untyped JSON. Nothing reaches the cache until it
//! has been turned into a typed value here.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{AppError, Result};
use crate::models::{CuratedResourceSet, GeneratedPlan, CURATED_RESOURCE_COUNT};

/// Which schema a payload is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    CuratedResources,
    StudyPlan,
}

/// Why a payload was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not a list")]
    NotASequence(&'static str),

    #[error("expected exactly 5 resources, got {0}")]
    WrongResourceCount(usize),

    #[error("{0}")]
    Malformed(String),
}

/// Parses completion reply text into JSON.
///
/// An empty reply is read as `{}` so it fails validation rather than parsing.
pub fn parse_completion(text: &str) -> Result<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(text).map_err(|e| AppError::Parse(e.to_string()))
}

/// Checks a payload against the schema for `kind`.
pub fn validate(kind: PayloadKind, payload: &Value) -> std::result::Result<(), RejectReason> {
    match kind {
        PayloadKind::CuratedResources => validate_resources(payload).map(|_| ()),
        PayloadKind::StudyPlan => validate_plan(payload).map(|_| ()),
    }
}

/// Accepts only a `resources` list of exactly [`CURATED_RESOURCE_COUNT`] complete entries.
pub fn validate_resources(
    payload: &Value,
) -> std::result::Result<CuratedResourceSet, RejectReason> {
    let object = as_object(payload)?;
    let resources = object
        .get("resources")
        .ok_or(RejectReason::MissingField("resources"))?
        .as_array()
        .ok_or(RejectReason::NotASequence("resources"))?;

    if resources.len() != CURATED_RESOURCE_COUNT {
        return Err(RejectReason::WrongResourceCount(resources.len()));
    }

    typed(payload)
}

/// Accepts only plans carrying `overview`, `weeklyPlans` and `recommendations`.
pub fn validate_plan(payload: &Value) -> std::result::Result<GeneratedPlan, RejectReason> {
    let object = as_object(payload)?;
    for field in ["overview", "weeklyPlans", "recommendations"] {
        if object.get(field).map_or(true, Value::is_null) {
            return Err(RejectReason::MissingField(field));
        }
    }
    if !object["weeklyPlans"].is_array() {
        return Err(RejectReason::NotASequence("weeklyPlans"));
    }

    typed(payload)
}

fn as_object(payload: &Value) -> std::result::Result<&Map<String, Value>, RejectReason> {
    payload
        .as_object()
        .ok_or_else(|| RejectReason::Malformed("payload is not a JSON object".to_string()))
}

fn typed<T: DeserializeOwned>(payload: &Value) -> std::result::Result<T, RejectReason> {
    T::deserialize(payload).map_err(|e| RejectReason::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(n: usize) -> Value {
        json!({
            "title": format!("Resource {n}"),
            "url": format!("https://example.com/{n}"),
            "description": "A course.",
            "benefits": ["Free", "Structured"],
            "format": "Video Course",
            "difficulty_level": "Beginner"
        })
    }

    fn resources(count: usize) -> Value {
        json!({ "resources": (0..count).map(resource).collect::<Vec<_>>() })
    }

    fn plan() -> Value {
        json!({
            "overview": {"subject": "Biology", "duration": "12 days", "examDate": "2025-06-01"},
            "weeklyPlans": [{"week": "Week 1", "goals": ["Cells"], "dailyTasks": []}],
            "recommendations": ["Practice"]
        })
    }

    #[test]
    fn test_accepts_exactly_five_resources() {
        let set = validate_resources(&resources(5)).unwrap();
        assert_eq!(set.resources.len(), 5);
        assert_eq!(set.resources[4].title, "Resource 4");
    }

    #[test]
    fn test_rejects_four_and_six_resources() {
        assert_eq!(
            validate_resources(&resources(4)),
            Err(RejectReason::WrongResourceCount(4))
        );
        assert_eq!(
            validate_resources(&resources(6)),
            Err(RejectReason::WrongResourceCount(6))
        );
    }

    #[test]
    fn test_rejects_missing_or_non_list_resources() {
        assert_eq!(
            validate_resources(&json!({})),
            Err(RejectReason::MissingField("resources"))
        );
        assert_eq!(
            validate_resources(&json!({"resources": "five"})),
            Err(RejectReason::NotASequence("resources"))
        );
    }

    #[test]
    fn test_rejects_resource_missing_field() {
        let mut payload = resources(5);
        payload["resources"][2]
            .as_object_mut()
            .unwrap()
            .remove("url");

        assert!(matches!(
            validate_resources(&payload),
            Err(RejectReason::Malformed(_))
        ));
    }

    #[test]
    fn test_accepts_complete_plan() {
        let generated = validate_plan(&plan()).unwrap();
        assert_eq!(generated.overview.subject, "Biology");
        assert_eq!(generated.weekly_plans.len(), 1);
    }

    #[test]
    fn test_rejects_plan_missing_top_level_field() {
        for field in ["overview", "weeklyPlans", "recommendations"] {
            let mut payload = plan();
            payload.as_object_mut().unwrap().remove(field);
            assert_eq!(
                validate_plan(&payload),
                Err(RejectReason::MissingField(field))
            );
        }
    }

    #[test]
    fn test_validate_dispatches_by_kind() {
        assert!(validate(PayloadKind::CuratedResources, &resources(5)).is_ok());
        assert!(validate(PayloadKind::StudyPlan, &plan()).is_ok());
        assert!(validate(PayloadKind::StudyPlan, &resources(5)).is_err());
    }

    #[test]
    fn test_parse_completion() {
        assert_eq!(parse_completion("  ").unwrap(), json!({}));
        assert_eq!(parse_completion(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert!(matches!(
            parse_completion("not json"),
            Err(AppError::Parse(_))
        ));
    }
}
