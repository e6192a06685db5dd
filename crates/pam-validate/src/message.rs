//! Structural validation of one message against the admission profile.
//!
//! Checks run in a fixed order (header, event, patient identification,
//! segment policy, visit) and accumulate graded issues; the only
//! short-circuit is a missing MSH header, without which nothing else can
//! be addressed. Malformed input never makes this module fail, it makes
//! it report.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use pam_model::{Issue, Message, MessageReport, Segment};
use pam_profile::{SegmentPolicy, is_identity_maintenance_trigger, segment_policy, terminology};

use crate::checks::{self, address, datetime, identifier, person_name, telecom};

/// MSH-9 shape: `type^trigger[^structure]`.
static MESSAGE_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{3})\^([A-Z]\d{2})(\^[A-Z]{3}_[A-Z]\d{2})?$").expect("message type regex")
});

/// Validate one parsed message.
pub fn validate_message(message: &Message) -> MessageReport {
    let Some(header) = message.header() else {
        return MessageReport {
            event: None,
            message_code: None,
            issues: vec![Issue::error("MSH_MISSING", "no MSH header segment")],
        };
    };

    let descriptor = message.event_descriptor();
    let trigger = descriptor
        .as_ref()
        .map(|descriptor| descriptor.trigger.clone())
        .filter(|trigger| !trigger.is_empty());
    debug!(trigger = trigger.as_deref().unwrap_or("unknown"), "validating message");

    let mut issues = Vec::new();
    check_header(header, &mut issues);
    check_event(message, trigger.as_deref(), &mut issues);
    check_patient_identification(message, &mut issues);
    check_segment_policy(message, trigger.as_deref(), &mut issues);
    if let Some(visit) = message.segment("PV1") {
        check_patient_visit(visit, &mut issues);
    }

    MessageReport {
        event: trigger,
        message_code: descriptor.map(|descriptor| descriptor.message_code),
        issues,
    }
}

fn check_header(header: &Segment, issues: &mut Vec<Issue>) {
    if header.field_raw(1) != "|" {
        issues.push(Issue::error(
            "MSH_FIELD_SEP",
            format!("field separator is {:?}, expected '|'", header.field_raw(1)),
        ));
    }
    if header.field_raw(2) != "^~\\&" {
        issues.push(Issue::warning(
            "MSH_ENCODING_CHARS",
            format!("non-standard encoding characters {:?}", header.field_raw(2)),
        ));
    }

    let message_type = header.field_raw(9).trim();
    match MESSAGE_TYPE_RE.captures(message_type) {
        Some(captures) if &captures[1] == "ADT" => {}
        Some(captures) => issues.push(Issue::error(
            "MSH_MESSAGE_TYPE",
            format!("message code {} is not ADT", &captures[1]),
        )),
        None => issues.push(Issue::error(
            "MSH_MESSAGE_TYPE",
            format!("message type {message_type:?} does not match type^trigger[^structure]"),
        )),
    }

    if header.field_raw(10).trim().is_empty() {
        issues.push(Issue::error("MSH_CONTROL_ID", "message control id is empty"));
    }

    let processing_id = header.field_component(11, 1).trim().to_string();
    if !terminology::is_processing_id(&processing_id) {
        issues.push(Issue::warning(
            "MSH_PROCESSING_ID",
            format!("processing id {processing_id:?} is not P, D or T"),
        ));
    }

    if header.field_raw(12).trim().is_empty() {
        issues.push(Issue::info("MSH_VERSION_ID", "version id is absent"));
    }
}

fn check_event(message: &Message, trigger: Option<&str>, issues: &mut Vec<Issue>) {
    let Some(event) = message.segment("EVN") else {
        issues.push(Issue::error("EVN_MISSING", "EVN event segment is missing"));
        return;
    };
    let event_type = event.field_component(1, 1).trim().to_uppercase();
    if let Some(trigger) = trigger
        && !event_type.is_empty()
        && event_type != trigger
    {
        issues.push(Issue::warning(
            "EVN_TRIGGER_MISMATCH",
            format!("EVN-1 carries {event_type} but the header trigger is {trigger}"),
        ));
    }
    datetime::check(event.field_raw(2), "EVN_RECORDED", "recorded date/time", issues);
    datetime::check(event.field_raw(6), "EVN_OCCURRED", "event occurred date/time", issues);
}

fn check_patient_identification(message: &Message, issues: &mut Vec<Issue>) {
    let Some(patient) = message.segment("PID") else {
        issues.push(Issue::error("PID_MISSING", "PID patient identification segment is missing"));
        return;
    };

    match patient.field(3).filter(|field| !field.is_empty()) {
        Some(field) => checks::check_repetitions(
            field,
            "PID_IDENTIFIER",
            "patient identifier",
            issues,
            identifier::check,
        ),
        None => issues.push(Issue::error(
            "PID_IDENTIFIER_EMPTY",
            "patient identifier: PID-3 identifier list is absent",
        )),
    }

    match patient.field(5).filter(|field| !field.is_empty()) {
        Some(field) => checks::check_repetitions(
            field,
            "PID_NAME",
            "patient name",
            issues,
            person_name::check,
        ),
        None => issues.push(Issue::warning("PID_NAME_MISSING", "PID-5 patient name is absent")),
    }

    datetime::check(patient.field_raw(7), "PID_BIRTH", "birth date/time", issues);

    if let Some(field) = patient.field(11).filter(|field| !field.is_empty()) {
        checks::check_repetitions(field, "PID_ADDRESS", "patient address", issues, address::check);
    }
    if let Some(field) = patient.field(13).filter(|field| !field.is_empty()) {
        checks::check_repetitions(field, "PID_PHONE_HOME", "home phone", issues, telecom::check);
    }
    if let Some(field) = patient.field(14).filter(|field| !field.is_empty()) {
        checks::check_repetitions(
            field,
            "PID_PHONE_BUSINESS",
            "business phone",
            issues,
            telecom::check,
        );
    }
}

fn check_segment_policy(message: &Message, trigger: Option<&str>, issues: &mut Vec<Issue>) {
    match trigger.and_then(segment_policy) {
        Some(policy) => apply_policy(message, policy, issues),
        None => apply_generic_fallback(message, trigger, issues),
    }
}

fn apply_policy(message: &Message, policy: &SegmentPolicy, issues: &mut Vec<Issue>) {
    for tag in policy.required {
        if !message.has_segment(tag) {
            issues.push(Issue::error(
                "SEGMENT_REQUIRED",
                format!("required segment {tag} is missing"),
            ));
        }
    }
    for tag in policy.forbidden {
        if message.has_segment(tag) {
            issues.push(Issue::error(
                "SEGMENT_FORBIDDEN",
                format!("segment {tag} is not allowed for this trigger"),
            ));
        }
    }

    let present_optional: Vec<&str> = policy
        .optional
        .iter()
        .copied()
        .filter(|tag| message.has_segment(tag))
        .collect();
    if !present_optional.is_empty() {
        issues.push(Issue::info(
            "SEGMENT_OPTIONAL",
            format!("optional segments present: {}", present_optional.join(", ")),
        ));
    }

    let mut previous: Option<(usize, &str)> = None;
    for segment in message.segments() {
        let Some(index) = policy.order_index(segment.tag()) else {
            continue;
        };
        if let Some((previous_index, previous_tag)) = previous
            && index < previous_index
        {
            issues.push(Issue::warning(
                "SEGMENT_ORDER",
                format!("segment {} appears after {previous_tag}", segment.tag()),
            ));
        }
        previous = Some((index, segment.tag()));
    }
}

/// Relaxed branch for triggers the profile does not catalogue. Kept
/// structurally separate from [`apply_policy`] so its looser semantics
/// never leak into the catalogued path.
fn apply_generic_fallback(message: &Message, trigger: Option<&str>, issues: &mut Vec<Issue>) {
    let identity_only = trigger.is_some_and(is_identity_maintenance_trigger);
    if identity_only {
        if message.has_segment("PV1") {
            issues.push(Issue::info(
                "FALLBACK_VISIT_PRESENT",
                "identity maintenance message carries an unexpected PV1 segment",
            ));
        }
    } else if !message.has_segment("PV1") {
        issues.push(Issue::error(
            "FALLBACK_VISIT_REQUIRED",
            "no PV1 visit segment for a visit-implying trigger",
        ));
    }
}

fn check_patient_visit(visit: &Segment, issues: &mut Vec<Issue>) {
    let class = visit.field_component(2, 1).trim().to_string();
    if class.is_empty() {
        issues.push(Issue::error("PV1_CLASS_EMPTY", "PV1-2 patient class is empty"));
    } else if !terminology::is_patient_class_code(&class) {
        issues.push(Issue::warning(
            "PV1_CLASS_UNKNOWN",
            format!("patient class {class} is not in table 0004"),
        ));
    }

    let location_populated = visit
        .field(3)
        .is_some_and(|field| (1..=4).any(|position| !field.component(position).trim().is_empty()));
    if !location_populated {
        issues.push(Issue::warning(
            "PV1_LOCATION_EMPTY",
            "assigned location names no point of care, room, bed or facility",
        ));
    }

    if let Some(field) = visit.field(7).filter(|field| !field.is_empty()) {
        checks::check_repetitions(
            field,
            "PV1_DOCTOR",
            "attending doctor",
            issues,
            |value, code, name, issues| {
                if value.component(1).trim().is_empty() && value.component(2).trim().is_empty() {
                    issues.push(Issue::warning(
                        format!("{code}_EMPTY"),
                        format!("{name}: neither id nor family name is present"),
                    ));
                }
            },
        );
    }

    if let Some(field) = visit.field(19).filter(|field| !field.is_empty()) {
        checks::check_repetitions(
            field,
            "PV1_VISIT_NUMBER",
            "visit number",
            issues,
            identifier::check,
        );
    }

    datetime::check(visit.field_raw(44), "PV1_ADMIT", "admit date/time", issues);
    datetime::check(visit.field_raw(45), "PV1_DISCHARGE", "discharge date/time", issues);
}
