//! Scenario replay: structural validation per message, workflow
//! threading across the sequence, and cross-message coherence checks.
//!
//! One pass reports everything. A bad message never aborts the replay;
//! its defects land in its own report and the sequence checks carry on
//! around it.

use std::collections::BTreeSet;

use tracing::debug;

use pam_ingest::{ScenarioMessage, extract_scenario_message, parse_message, split_messages};
use pam_model::{EventCode, Issue, MessageReport, ScenarioReport};
use pam_profile::{initial_events, is_decommissioned_trigger};

use crate::message::validate_message;
use crate::workflow::{TransitionVerdict, TransitionViolation, WorkflowState, check_transition};

/// Replay an ordered transcript of messages as one encounter lifecycle.
pub fn validate_scenario(raw: &str) -> ScenarioReport {
    let chunks = split_messages(raw);
    if chunks.is_empty() {
        return ScenarioReport {
            messages: Vec::new(),
            workflow_issues: vec![Issue::error("SCENARIO_EMPTY", "scenario contains no messages")],
            coherence_issues: Vec::new(),
        };
    }
    debug!(messages = chunks.len(), "replaying scenario");

    let mut reports: Vec<MessageReport> = Vec::new();
    let mut facts: Vec<ScenarioMessage> = Vec::new();
    for (index, chunk) in chunks.iter().enumerate() {
        match parse_message(chunk) {
            Ok(message) => {
                reports.push(validate_message(&message));
                facts.push(extract_scenario_message(index, &message));
            }
            Err(error) => {
                reports.push(MessageReport {
                    event: None,
                    message_code: None,
                    issues: vec![Issue::error("MSH_MISSING", error.to_string())],
                });
                facts.push(ScenarioMessage {
                    index,
                    event: None,
                    raw_event: String::new(),
                    patient_key: String::new(),
                    visit_key: String::new(),
                    movement_action: String::new(),
                    timestamp: None,
                });
            }
        }
    }

    let workflow_issues = check_workflow(&facts);
    let coherence_issues = check_coherence(&facts);

    ScenarioReport {
        messages: reports,
        workflow_issues,
        coherence_issues,
    }
}

fn check_workflow(facts: &[ScenarioMessage]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for message in facts {
        if is_decommissioned_trigger(&message.raw_event) {
            issues.push(Issue::error(
                format!("WORKFLOW_EVENT_RETIRED.{}", message.index + 1),
                format!(
                    "message {}: trigger {} is decommissioned by the profile",
                    message.index + 1,
                    message.raw_event
                ),
            ));
        }
    }

    let recognized: Vec<&ScenarioMessage> = facts
        .iter()
        .filter(|message| message.event.is_some())
        .collect();

    let has_identity = recognized
        .iter()
        .any(|message| message.event.is_some_and(|event| event.is_identity()));
    let has_movement = recognized
        .iter()
        .any(|message| message.event.is_some_and(|event| event.is_movement()));
    if has_identity && has_movement {
        issues.push(Issue::error(
            "SCENARIO_MIXED_EVENTS",
            "identity maintenance and movement events are mixed in one scenario",
        ));
        return issues;
    }

    let mut state = WorkflowState::start();
    for (position, message) in recognized.iter().enumerate() {
        let Some(event) = message.event else {
            continue;
        };
        if position == 0 {
            if !initial_events().contains(&event) {
                issues.push(Issue::error(
                    "WORKFLOW_INITIAL_EVENT",
                    format!(
                        "message {}: {event} cannot open an encounter",
                        message.index + 1
                    ),
                ));
            }
        } else {
            check_pair(state, message, event, &mut issues);
        }
        state = WorkflowState::after(event);
    }

    issues
}

/// Judge one consecutive pair. Patient-class flips replayed as a
/// correction of an earlier movement (ZBE-4 other than INSERT) are
/// exempt from the admitted-context rule, which the pairwise machine
/// cannot see from event codes alone.
fn check_pair(
    state: WorkflowState,
    message: &ScenarioMessage,
    event: EventCode,
    issues: &mut Vec<Issue>,
) {
    match check_transition(state, event) {
        TransitionVerdict::Legal => {}
        TransitionVerdict::Illegal(TransitionViolation::AdmissionContext)
            if !message.is_insert_movement() => {}
        TransitionVerdict::Illegal(violation) => {
            issues.push(transition_issue(state, message, event, violation));
        }
    }
}

fn transition_issue(
    state: WorkflowState,
    message: &ScenarioMessage,
    event: EventCode,
    violation: TransitionViolation,
) -> Issue {
    let position = message.index + 1;
    let previous = state
        .last_event()
        .map_or_else(|| "start".to_string(), |event| event.to_string());
    match violation {
        TransitionViolation::NotInTable => Issue::error(
            format!("WORKFLOW_TRANSITION.{position}"),
            format!("message {position}: {event} cannot follow {previous}"),
        ),
        TransitionViolation::StartOfEncounter => Issue::error(
            format!("WORKFLOW_ADMISSION_RESTART.{position}"),
            format!("message {position}: {event} would admit over an active encounter ({previous})"),
        ),
        TransitionViolation::AdmissionContext => Issue::error(
            format!("WORKFLOW_CLASS_CONTEXT.{position}"),
            format!("message {position}: {event} requires an admitted encounter, last movement was {previous}"),
        ),
    }
}

fn check_coherence(facts: &[ScenarioMessage]) -> Vec<Issue> {
    let mut issues = Vec::new();

    let patients: BTreeSet<&str> = facts
        .iter()
        .map(|message| message.patient_key.as_str())
        .filter(|key| !key.is_empty())
        .collect();
    if patients.is_empty() {
        issues.push(Issue::warning(
            "COHERENCE_PATIENT_MISSING",
            "no message carries a patient identifier",
        ));
    } else if patients.len() > 1 {
        let keys: Vec<&str> = patients.into_iter().collect();
        issues.push(Issue::error(
            "COHERENCE_PATIENT_MIXED",
            format!("scenario references {} distinct patient identifiers: {}", keys.len(), keys.join(", ")),
        ));
    }

    let visits: BTreeSet<&str> = facts
        .iter()
        .map(|message| message.visit_key.as_str())
        .filter(|key| !key.is_empty())
        .collect();
    if visits.len() > 1 {
        let keys: Vec<&str> = visits.into_iter().collect();
        issues.push(Issue::warning(
            "COHERENCE_VISIT_MIXED",
            format!("scenario references {} distinct visit identifiers: {}", keys.len(), keys.join(", ")),
        ));
    }

    let mut previous: Option<(usize, chrono::NaiveDateTime)> = None;
    for message in facts {
        let Some(timestamp) = message.timestamp else {
            continue;
        };
        if let Some((previous_index, previous_timestamp)) = previous
            && timestamp < previous_timestamp
        {
            issues.push(Issue::warning(
                format!("COHERENCE_CHRONOLOGY.{}", message.index + 1),
                format!(
                    "message {} is timestamped before message {}",
                    message.index + 1,
                    previous_index + 1
                ),
            ));
        }
        previous = Some((message.index, timestamp));
    }

    issues
}
