use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

pub const DEFAULT_SLEEP_TIME: &str = "02:00 AM";

pub const SAMPLE_TASKS: [&str; 4] = [
    "Study Linear Algebra",
    "Complete React Project",
    "Read 20 pages of sci-fi novel",
    "Review Flashcards",
];

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ScheduleRequest {
    pub tasks: Vec<String>,
    #[serde(rename = "sleepTime")]
    pub sleep_time: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct ScheduleEntry {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub explanation: String,
    /// Raw label as sent by the model. Use [`ScheduleEntry::energy`] for the
    /// recognized level.
    #[serde(default)]
    pub energy_level: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronotype_tip: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

/// Failure body returned by the generation endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<Value>,
}

impl From<(Vec<String>, String)> for ScheduleRequest {
    fn from((tasks, sleep_time): (Vec<String>, String)) -> Self {
        ScheduleRequest { tasks, sleep_time }
    }
}

impl EnergyLevel {
    /// Unrecognized labels fall back to `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => EnergyLevel::High,
            "medium" => EnergyLevel::Medium,
            _ => EnergyLevel::Low,
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyLevel::High => write!(f, "High"),
            EnergyLevel::Medium => write!(f, "Medium"),
            EnergyLevel::Low => write!(f, "Low"),
        }
    }
}

impl ScheduleEntry {
    pub fn energy(&self) -> EnergyLevel {
        EnergyLevel::from_label(&self.energy_level)
    }
}

impl ScheduleResponse {
    /// Builds a response out of whatever JSON the endpoint relayed. Missing or
    /// wrongly typed fields degrade to empty values instead of failing.
    pub fn from_value(value: &Value) -> Self {
        let schedule = value
            .get("schedule")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        if !entry.is_object() {
                            log::warn!("Skipping schedule entry that is not an object: {}", entry);
                            return None;
                        }

                        Some(ScheduleEntry {
                            start_time: text_field(entry, "start_time"),
                            task_id: text_field(entry, "task_id"),
                            explanation: text_field(entry, "explanation"),
                            energy_level: text_field(entry, "energy_level"),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let chronotype_tip = value
            .get("chronotype_tip")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|tip| !tip.is_empty())
            .map(str::to_string);

        ScheduleResponse {
            schedule,
            chronotype_tip,
        }
    }

    /// The tip worth surfacing, if any.
    pub fn tip(&self) -> Option<&str> {
        self.chronotype_tip
            .as_deref()
            .map(str::trim)
            .filter(|tip| !tip.is_empty())
    }
}

fn text_field(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_camel_case_sleep_time() {
        let request = ScheduleRequest::from((vec!["Read".to_string()], "01:00 AM".to_string()));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value, json!({ "tasks": ["Read"], "sleepTime": "01:00 AM" }));
    }

    #[test]
    fn test_energy_level_fallback() {
        assert_eq!(EnergyLevel::from_label("High"), EnergyLevel::High);
        assert_eq!(EnergyLevel::from_label(" medium "), EnergyLevel::Medium);
        assert_eq!(EnergyLevel::from_label("Low"), EnergyLevel::Low);
        assert_eq!(EnergyLevel::from_label("Unknown"), EnergyLevel::Low);
        assert_eq!(EnergyLevel::from_label(""), EnergyLevel::Low);
    }

    #[test]
    fn test_energy_level_ignores_case() {
        assert_eq!(EnergyLevel::from_label("high"), EnergyLevel::High);
        assert_eq!(EnergyLevel::from_label("HIGH"), EnergyLevel::High);
        assert_eq!(EnergyLevel::from_label("mEdIuM"), EnergyLevel::Medium);

        let entry = ScheduleEntry {
            energy_level: "high".to_string(),
            ..Default::default()
        };
        assert_eq!(entry.energy(), EnergyLevel::High);
    }

    #[test]
    fn test_from_value_well_formed() {
        let value = json!({
            "schedule": [
                {
                    "start_time": "10:00 PM",
                    "task_id": "Study Linear Algebra",
                    "explanation": "Peak focus",
                    "energy_level": "High"
                },
                {
                    "start_time": "01:30 AM",
                    "task_id": "Review Flashcards",
                    "explanation": "Light recall before bed",
                    "energy_level": "Low"
                }
            ],
            "chronotype_tip": "Dim the lights after 1 AM."
        });

        let response = ScheduleResponse::from_value(&value);

        assert_eq!(response.schedule.len(), 2);
        assert_eq!(response.schedule[0].task_id, "Study Linear Algebra");
        assert_eq!(response.schedule[1].energy(), EnergyLevel::Low);
        assert_eq!(response.tip(), Some("Dim the lights after 1 AM."));
    }

    #[test]
    fn test_from_value_is_defensive() {
        let value = json!({
            "schedule": [
                { "start_time": 2200, "task_id": null, "energy_level": 3 },
                "not an entry",
                {}
            ],
            "chronotype_tip": "   "
        });

        let response = ScheduleResponse::from_value(&value);

        assert_eq!(response.schedule.len(), 2);
        assert_eq!(response.schedule[0].start_time, "2200");
        assert_eq!(response.schedule[0].task_id, "");
        assert_eq!(response.schedule[0].energy(), EnergyLevel::Low);
        assert_eq!(response.schedule[1], ScheduleEntry::default());
        assert_eq!(response.tip(), None);
    }

    #[test]
    fn test_from_value_missing_schedule() {
        let response = ScheduleResponse::from_value(&json!({ "schedule": "nope" }));
        assert!(response.schedule.is_empty());

        let response = ScheduleResponse::from_value(&json!([1, 2, 3]));
        assert!(response.schedule.is_empty());
        assert!(response.chronotype_tip.is_none());
    }
}
