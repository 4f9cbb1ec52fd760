//! Request schema shared by both planning endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;

/// Preferred daily study window. Both bounds are free text ("18:00", "6pm").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

/// Body of `POST /generate-plan` and `POST /generate-plan-pdf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningRequest {
    pub goal: String,
    /// Numeric-looking text; carried through unvalidated.
    #[serde(deserialize_with = "string_or_number")]
    pub hours_per_day: String,
    pub time_slot: TimeSlot,
}

impl PlanningRequest {
    /// Only the goal is checked. Hours and time bounds are passed to the provider as-is.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.goal.trim().is_empty() {
            return Err(AppError::Validation("goal cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Accepts `"2"` as well as `2` or `1.5`, keeping the textual form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
