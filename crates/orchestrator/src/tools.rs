//! The fixed set of tools the model can call.
//!
//! Seven tools, closed set. Parsing a call produces a [`ToolInvocation`]
//! variant with typed arguments, so dispatch is an exhaustive match and a
//! new tool cannot be added without the compiler pointing at every place
//! that must handle it. An unknown name or malformed arguments fails that
//! one call; the conversation continues.

use agent_core::ToolDefinition;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Facts the model extracted from the conversation for the lead record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateLeadArgs {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Arguments for booking an exact slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleAppointmentArgs {
    pub service_id: i64,
    pub scheduled_time: String,
}

/// Arguments for the direct sale-temperature update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateSaleTemperatureArgs {
    pub temperature: i64,
}

/// Arguments for a single-slot availability check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckAvailabilityArgs {
    pub service_id: i64,
    pub time: String,
}

/// Arguments for scanning a range for open slots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestSlotsArgs {
    pub service_id: i64,
    /// Range written as `start/end` in client time format.
    pub range: String,
}

/// Arguments for recording an intake note.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddIntakeNoteArgs {
    #[serde(default)]
    pub note_type: Option<String>,
    pub note: String,
}

/// Arguments for handing the case to a human.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EscalateCaseArgs {
    pub reason: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// A parsed tool call, one variant per tool the model may use.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    UpdateLead(UpdateLeadArgs),
    ScheduleAppointment(ScheduleAppointmentArgs),
    UpdateSaleTemperature(UpdateSaleTemperatureArgs),
    CheckAvailability(CheckAvailabilityArgs),
    SuggestAlternativeSlots(SuggestSlotsArgs),
    AddIntakeNote(AddIntakeNoteArgs),
    EscalateCase(EscalateCaseArgs),
}

/// Why a tool call could not be turned into an invocation.
#[derive(Debug, Error)]
pub enum ToolParseError {
    /// The model named a tool outside the fixed set.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments did not match the tool's schema.
    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ToolInvocation {
    /// Parse a tool call from its wire name and JSON argument string.
    pub fn parse(name: &str, arguments: &str) -> Result<Self, ToolParseError> {
        fn args<T: serde::de::DeserializeOwned>(
            tool: &'static str,
            raw: &str,
        ) -> Result<T, ToolParseError> {
            serde_json::from_str(raw)
                .map_err(|source| ToolParseError::InvalidArguments { tool, source })
        }

        match name {
            "update_lead" => Ok(Self::UpdateLead(args("update_lead", arguments)?)),
            "schedule_appointment" => Ok(Self::ScheduleAppointment(args(
                "schedule_appointment",
                arguments,
            )?)),
            "update_sale_temperature" => Ok(Self::UpdateSaleTemperature(args(
                "update_sale_temperature",
                arguments,
            )?)),
            "check_availability" => {
                Ok(Self::CheckAvailability(args("check_availability", arguments)?))
            }
            "suggest_alternative_slots" => Ok(Self::SuggestAlternativeSlots(args(
                "suggest_alternative_slots",
                arguments,
            )?)),
            "add_intake_note" => Ok(Self::AddIntakeNote(args("add_intake_note", arguments)?)),
            "escalate_case" => Ok(Self::EscalateCase(args("escalate_case", arguments)?)),
            other => Err(ToolParseError::UnknownTool(other.to_string())),
        }
    }

    /// The tool's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateLead(_) => "update_lead",
            Self::ScheduleAppointment(_) => "schedule_appointment",
            Self::UpdateSaleTemperature(_) => "update_sale_temperature",
            Self::CheckAvailability(_) => "check_availability",
            Self::SuggestAlternativeSlots(_) => "suggest_alternative_slots",
            Self::AddIntakeNote(_) => "add_intake_note",
            Self::EscalateCase(_) => "escalate_case",
        }
    }
}

/// The tool schema advertised to the model, identical on every request.
pub fn tool_schema() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::function(
            "update_lead",
            "Save facts the client just shared: their name, the service they \
             are interested in, their preferred time, their phone number.",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Client's name" },
                    "service": { "type": "string", "description": "Service the client is interested in" },
                    "preferred_time": { "type": "string", "description": "Preferred time, e.g. 2024-03-04T15:00" },
                    "phone": { "type": "string", "description": "Client's phone number" }
                }
            }),
        ),
        ToolDefinition::function(
            "schedule_appointment",
            "Book an appointment once the client has confirmed a service and an exact time.",
            json!({
                "type": "object",
                "properties": {
                    "service_id": { "type": "integer", "description": "Id of the service from the catalog" },
                    "scheduled_time": { "type": "string", "description": "Exact slot, e.g. 2024-03-04T15:00" }
                },
                "required": ["service_id", "scheduled_time"]
            }),
        ),
        ToolDefinition::function(
            "update_sale_temperature",
            "Set how close this client is to booking, from 0 (cold) to 100 (booked).",
            json!({
                "type": "object",
                "properties": {
                    "temperature": { "type": "integer", "description": "New temperature, 0-100" }
                },
                "required": ["temperature"]
            }),
        ),
        ToolDefinition::function(
            "check_availability",
            "Check whether one exact slot is inside opening hours and still free.",
            json!({
                "type": "object",
                "properties": {
                    "service_id": { "type": "integer", "description": "Id of the service from the catalog" },
                    "time": { "type": "string", "description": "Slot to check, e.g. 2024-03-04T15:00" }
                },
                "required": ["service_id", "time"]
            }),
        ),
        ToolDefinition::function(
            "suggest_alternative_slots",
            "List up to three open slots inside a time range, for when the client's first choice is taken.",
            json!({
                "type": "object",
                "properties": {
                    "service_id": { "type": "integer", "description": "Id of the service from the catalog" },
                    "range": { "type": "string", "description": "Range to scan as start/end, e.g. 2024-03-04T14:00/2024-03-04T18:00" }
                },
                "required": ["service_id", "range"]
            }),
        ),
        ToolDefinition::function(
            "add_intake_note",
            "Record a note on the client's intake record for the practitioner to read.",
            json!({
                "type": "object",
                "properties": {
                    "note_type": { "type": "string", "description": "Note category, defaults to general" },
                    "note": { "type": "string", "description": "The note text" }
                },
                "required": ["note"]
            }),
        ),
        ToolDefinition::function(
            "escalate_case",
            "Hand this conversation to a human and stop autonomous booking for the client.",
            json!({
                "type": "object",
                "properties": {
                    "reason": { "type": "string", "description": "Why the case needs a human" },
                    "details": { "type": "string", "description": "Anything the human should know" }
                },
                "required": ["reason"]
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_tool() {
        let cases = [
            ("update_lead", r#"{"name": "Dana"}"#),
            (
                "schedule_appointment",
                r#"{"service_id": 1, "scheduled_time": "2024-03-04T15:00"}"#,
            ),
            ("update_sale_temperature", r#"{"temperature": 60}"#),
            (
                "check_availability",
                r#"{"service_id": 2, "time": "2024-03-04T15:00"}"#,
            ),
            (
                "suggest_alternative_slots",
                r#"{"service_id": 1, "range": "2024-03-04T14:00/2024-03-04T18:00"}"#,
            ),
            ("add_intake_note", r#"{"note": "prefers mornings"}"#),
            ("escalate_case", r#"{"reason": "asked for the practitioner"}"#),
        ];

        for (name, arguments) in cases {
            let invocation = ToolInvocation::parse(name, arguments).unwrap();
            assert_eq!(invocation.name(), name);
        }
    }

    #[test]
    fn test_parse_typed_arguments() {
        let invocation = ToolInvocation::parse(
            "schedule_appointment",
            r#"{"service_id": 3, "scheduled_time": "2024-03-04T15:00", "source": "chat"}"#,
        )
        .unwrap();

        // Unknown extra fields are tolerated.
        assert_eq!(
            invocation,
            ToolInvocation::ScheduleAppointment(ScheduleAppointmentArgs {
                service_id: 3,
                scheduled_time: "2024-03-04T15:00".to_string(),
            })
        );
    }

    #[test]
    fn test_update_lead_accepts_partial_facts() {
        let invocation = ToolInvocation::parse("update_lead", "{}").unwrap();
        assert_eq!(invocation, ToolInvocation::UpdateLead(UpdateLeadArgs::default()));
    }

    #[test]
    fn test_unknown_tool_is_rejected() {
        let err = ToolInvocation::parse("send_invoice", "{}").unwrap_err();
        assert!(matches!(err, ToolParseError::UnknownTool(name) if name == "send_invoice"));
    }

    #[test]
    fn test_missing_required_argument_is_rejected() {
        let err = ToolInvocation::parse("check_availability", r#"{"service_id": 1}"#).unwrap_err();
        assert!(matches!(
            err,
            ToolParseError::InvalidArguments {
                tool: "check_availability",
                ..
            }
        ));
    }

    #[test]
    fn test_schema_lists_all_seven_tools() {
        let schema = tool_schema();
        let names: Vec<&str> = schema
            .iter()
            .map(|tool| tool.function.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "update_lead",
                "schedule_appointment",
                "update_sale_temperature",
                "check_availability",
                "suggest_alternative_slots",
                "add_intake_note",
                "escalate_case",
            ]
        );

        // The schema is deterministic request to request.
        let first = serde_json::to_string(&tool_schema()).unwrap();
        let second = serde_json::to_string(&tool_schema()).unwrap();
        assert_eq!(first, second);
    }
}
