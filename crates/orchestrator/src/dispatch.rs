//! The bounded tool dispatch loop.
//!
//! One inbound message drives the model through at most a handful of
//! rounds: the model answers, any tool calls it made are executed in order,
//! their results are appended to the transcript, and the model is invoked
//! again. A plain text answer ends the loop; so does the round cap.

use agent_core::{ToolCall, TranscriptTurn};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use database::{appointment, catalog, lead, notes};

use crate::error::OrchestratorError;
use crate::orchestrator::BookingAgent;
use crate::session::Session;
use crate::tools::{tool_schema, ToolInvocation, ToolParseError};
use crate::trust;

/// Tool rounds allowed per inbound message.
///
/// A model that keeps calling tools costs the initial invocation plus this
/// many follow-ups; after that the turn ends with an empty reply rather
/// than another invocation.
pub const MAX_TOOL_ROUNDS: usize = 3;

impl BookingAgent {
    /// Drive the model until it yields a plain reply, executing tool calls
    /// between rounds.
    pub(crate) async fn drive_model(
        &self,
        identity: &str,
        session: &mut Session,
    ) -> Result<String, OrchestratorError> {
        let tools = tool_schema();
        let mut rounds = 0;

        loop {
            let reply = match self.model.complete(&session.turns, &tools).await {
                Ok(turn) => turn,
                Err(e) => {
                    warn!("Model completion failed for {}: {}", identity, e);
                    return Ok(self.config.fallback_reply.clone());
                }
            };

            let text = reply.text().to_string();
            let calls = reply.tool_calls.clone().unwrap_or_default();
            session.push(reply);

            if calls.is_empty() {
                return Ok(text);
            }

            for call in &calls {
                let result = self.execute_tool(identity, session, call).await;
                session.push(TranscriptTurn::tool_result(
                    &call.id,
                    &call.function.name,
                    json!({ "result": result }).to_string(),
                ));
            }

            rounds += 1;
            if rounds > MAX_TOOL_ROUNDS {
                warn!(
                    "Tool loop for {} exceeded {} round(s), ending the turn",
                    identity, MAX_TOOL_ROUNDS
                );
                return Ok(String::new());
            }
        }
    }

    /// Execute one tool call and produce its result payload.
    ///
    /// Failures never leave this function: a malformed call reports an
    /// error string, a store failure reports an error string, and the loop
    /// moves on to the next call.
    async fn execute_tool(&self, identity: &str, session: &mut Session, call: &ToolCall) -> Value {
        let invocation = match ToolInvocation::parse(&call.function.name, &call.function.arguments)
        {
            Ok(invocation) => invocation,
            Err(e) => {
                warn!("Rejected tool call from model: {}", e);
                let reason = match e {
                    ToolParseError::UnknownTool(_) => "unknown tool",
                    ToolParseError::InvalidArguments { .. } => "invalid arguments",
                };
                return Value::String(format!("error: {}", reason));
            }
        };

        debug!("Executing {} for {}", invocation.name(), identity);

        match self.dispatch_tool(identity, session, invocation).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool execution failed for {}: {}", identity, e);
                Value::String("error: internal failure".to_string())
            }
        }
    }

    async fn dispatch_tool(
        &self,
        identity: &str,
        session: &mut Session,
        invocation: ToolInvocation,
    ) -> database::Result<Value> {
        match invocation {
            ToolInvocation::UpdateLead(facts) => {
                trust::apply_learned_facts(&self.db, identity, &facts).await?;
                Ok(ok_result())
            }

            ToolInvocation::ScheduleAppointment(args) => {
                if session.escalated {
                    debug!("Booking blocked for escalated session {}", identity);
                    return Ok(bool_result(false));
                }

                let time = match scheduling::parse_client_time(
                    &args.scheduled_time,
                    self.config.business_offset,
                ) {
                    Some(time) => time,
                    None => {
                        debug!("Unparsable booking time {:?}", args.scheduled_time);
                        return Ok(bool_result(false));
                    }
                };

                let lead_id = match lead::get_lead_id(self.db.pool(), identity).await? {
                    Some(lead_id) => lead_id,
                    None => {
                        warn!("Booking attempt for unknown lead {}", identity);
                        return Ok(bool_result(false));
                    }
                };

                let booked =
                    appointment::record_appointment(self.db.pool(), lead_id, args.service_id, &time)
                        .await?;

                if booked {
                    let slot = scheduling::format_slot(&time);
                    let service_name = catalog::get_service(self.db.pool(), args.service_id)
                        .await?
                        .map(|service| service.name)
                        .unwrap_or_else(|| format!("service #{}", args.service_id));

                    // The appointment is already persisted; a failed lead
                    // write-back must not flip the result to a refusal.
                    if let Err(e) =
                        trust::record_booking(&self.db, identity, &service_name, &slot).await
                    {
                        warn!("Booked but could not write back to lead {}: {}", identity, e);
                    }
                    info!("Booked {} at {} for {}", service_name, slot, identity);
                }

                Ok(bool_result(booked))
            }

            ToolInvocation::UpdateSaleTemperature(args) => {
                trust::set_temperature(&self.db, identity, args.temperature).await?;
                Ok(ok_result())
            }

            ToolInvocation::CheckAvailability(args) => {
                if session.escalated {
                    debug!("Availability check blocked for escalated session {}", identity);
                    return Ok(bool_result(false));
                }

                let time = match scheduling::parse_client_time(&args.time, self.config.business_offset)
                {
                    Some(time) => time,
                    None => {
                        debug!("Unparsable availability time {:?}", args.time);
                        return Ok(bool_result(false));
                    }
                };

                let available = self.engine.check_availability(args.service_id, &time).await?;
                Ok(bool_result(available))
            }

            ToolInvocation::SuggestAlternativeSlots(args) => {
                let (start, end) =
                    match scheduling::parse_slot_range(&args.range, self.config.business_offset) {
                        Some(range) => range,
                        None => {
                            debug!("Unparsable slot range {:?}", args.range);
                            return Ok(Value::Array(Vec::new()));
                        }
                    };

                let slots = self
                    .engine
                    .suggest_alternatives(
                        args.service_id,
                        &start,
                        &end,
                        scheduling::DEFAULT_SUGGESTION_LIMIT,
                    )
                    .await?;

                Ok(Value::Array(
                    slots
                        .iter()
                        .map(|slot| Value::String(scheduling::format_slot(slot)))
                        .collect(),
                ))
            }

            ToolInvocation::AddIntakeNote(args) => {
                match lead::get_lead_id(self.db.pool(), identity).await? {
                    Some(lead_id) => {
                        notes::add_intake_note(
                            self.db.pool(),
                            lead_id,
                            args.note_type.as_deref().unwrap_or("general"),
                            &args.note,
                        )
                        .await?;
                    }
                    None => warn!("Intake note for unknown lead {} dropped", identity),
                }
                Ok(ok_result())
            }

            ToolInvocation::EscalateCase(args) => {
                trust::mark_escalated(
                    &self.db,
                    session,
                    identity,
                    &args.reason,
                    args.details.as_deref(),
                )
                .await?;
                info!("Escalated case for {}: {}", identity, args.reason);
                Ok(ok_result())
            }
        }
    }
}

fn ok_result() -> Value {
    Value::String("ok".to_string())
}

fn bool_result(value: bool) -> Value {
    Value::String(value.to_string())
}
