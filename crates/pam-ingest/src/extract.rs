//! Tolerant per-message extraction for scenario replay.
//!
//! Scenario validation needs a handful of facts from each message: the
//! trigger event, a patient key, a visit key, the movement action and a
//! timestamp. Extraction never fails; anything unreadable degrades to an
//! empty key or `None` and the coherence checks report the gap.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::trace;

use pam_model::{EventCode, Message};

/// The facts scenario validation threads across a message sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioMessage {
    /// Zero-based position in the scenario.
    pub index: usize,
    /// Catalogued trigger event, when the raw code is recognized.
    pub event: Option<EventCode>,
    /// Trigger code as written, recognized or not.
    pub raw_event: String,
    /// Primary patient identifier (PID-3, first repetition).
    pub patient_key: String,
    /// Visit number (PV1-19, falling back to PID-18).
    pub visit_key: String,
    /// Movement action code from ZBE-4, uppercased.
    pub movement_action: String,
    /// Event timestamp (EVN-2, falling back to EVN-6 then MSH-7).
    pub timestamp: Option<NaiveDateTime>,
}

impl ScenarioMessage {
    /// A movement is an insert unless ZBE-4 marks it as a correction of
    /// an earlier movement.
    pub fn is_insert_movement(&self) -> bool {
        self.movement_action.is_empty() || self.movement_action == "INSERT"
    }
}

/// Pull the scenario facts out of one parsed message.
pub fn extract_scenario_message(index: usize, message: &Message) -> ScenarioMessage {
    let raw_event = extract_trigger(message);
    let event = raw_event.parse().ok();
    if event.is_none() && !raw_event.is_empty() {
        trace!(trigger = %raw_event, "unrecognized trigger event");
    }

    let patient_key = message
        .segment("PID")
        .map(|pid| pid.field_component(3, 1).trim().to_string())
        .unwrap_or_default();

    let visit_key = message
        .segment("PV1")
        .map(|visit| visit.field_component(19, 1).trim().to_string())
        .filter(|key| !key.is_empty())
        .or_else(|| {
            message
                .segment("PID")
                .map(|pid| pid.field_component(18, 1).trim().to_string())
        })
        .unwrap_or_default();

    let movement_action = message
        .segment("ZBE")
        .map(|zbe| zbe.field_component(4, 1).trim().to_uppercase())
        .unwrap_or_default();

    let timestamp = extract_timestamp(message);

    ScenarioMessage {
        index,
        event,
        raw_event,
        patient_key,
        visit_key,
        movement_action,
        timestamp,
    }
}

/// Trigger code from MSH-9.2, falling back to EVN-1 for senders that
/// only populate the legacy event-type field.
fn extract_trigger(message: &Message) -> String {
    let from_header = message
        .header()
        .map(|header| header.field_component(9, 2).trim().to_uppercase())
        .unwrap_or_default();
    if !from_header.is_empty() {
        return from_header;
    }
    message
        .segment("EVN")
        .map(|event| event.field_component(1, 1).trim().to_uppercase())
        .unwrap_or_default()
}

fn extract_timestamp(message: &Message) -> Option<NaiveDateTime> {
    let event = message.segment("EVN");
    let header = message.header();
    let candidates = [
        event.map(|segment| segment.field_raw(2)),
        event.map(|segment| segment.field_raw(6)),
        header.map(|segment| segment.field_raw(7)),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(parse_dtm)
}

/// Lenient DTM reader used for chronology only: components the value
/// does not carry default to the start of their range. Returns `None`
/// when not even a year can be read.
pub fn parse_dtm(raw: &str) -> Option<NaiveDateTime> {
    let body: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    if body.len() < 4 {
        return None;
    }
    let year: i32 = body.get(0..4)?.parse().ok()?;
    let month = slice_number(&body, 4, 6).unwrap_or(1);
    let day = slice_number(&body, 6, 8).unwrap_or(1);
    let hour = slice_number(&body, 8, 10).unwrap_or(0);
    let minute = slice_number(&body, 10, 12).unwrap_or(0);
    let second = slice_number(&body, 12, 14).unwrap_or(0);
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn slice_number(body: &str, start: usize, end: usize) -> Option<u32> {
    body.get(start..end).and_then(|digits| digits.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::er7::parse_message;

    #[test]
    fn facts_come_from_their_primary_fields() {
        let text = "MSH|^~\\&|HIS|HOSP|EAI|HOSP|20240101120000||ADT^A02|MSG0002|P|2.5\rEVN|A02|20240102080000\rPID|1||123456^^^HOSP^PI||DUPONT^JEAN\rPV1|1|I|UF2||||||||||||||||VN001\rZBE|MVT002|20240102080000||INSERT";
        let message = parse_message(text).expect("parse");
        let facts = extract_scenario_message(0, &message);
        assert_eq!(facts.event, Some(EventCode::TransferPatient));
        assert_eq!(facts.patient_key, "123456");
        assert_eq!(facts.visit_key, "VN001");
        assert_eq!(facts.movement_action, "INSERT");
        assert!(facts.is_insert_movement());
        let timestamp = facts.timestamp.expect("timestamp");
        assert_eq!(timestamp.format("%Y%m%d%H%M%S").to_string(), "20240102080000");
    }

    #[test]
    fn trigger_falls_back_to_the_event_segment() {
        let text = "MSH|^~\\&|HIS|HOSP|EAI|HOSP|20240101120000||ADT|MSG0003|P|2.5\rEVN|A03|20240103090000\rPID|1||123456^^^HOSP^PI";
        let message = parse_message(text).expect("parse");
        let facts = extract_scenario_message(0, &message);
        assert_eq!(facts.raw_event, "A03");
        assert_eq!(facts.event, Some(EventCode::DischargePatient));
    }

    #[test]
    fn visit_key_falls_back_to_the_patient_account() {
        let text = "MSH|^~\\&|HIS|HOSP|EAI|HOSP|20240101120000||ADT^A01|MSG0004|P|2.5\rEVN|A01|20240101120000\rPID|1||123456^^^HOSP^PI|||||||||||||||ACC99\rPV1|1|I|UF1";
        let message = parse_message(text).expect("parse");
        assert_eq!(extract_scenario_message(0, &message).visit_key, "ACC99");
    }

    #[test]
    fn unreadable_facts_degrade_instead_of_failing() {
        let text = "MSH|^~\\&|HIS|HOSP|EAI|HOSP|not-a-date||ADT^A99|MSG0005|P|2.5\rEVN|A99|also-not-a-date";
        let message = parse_message(text).expect("parse");
        let facts = extract_scenario_message(3, &message);
        assert_eq!(facts.index, 3);
        assert_eq!(facts.event, None);
        assert_eq!(facts.raw_event, "A99");
        assert_eq!(facts.patient_key, "");
        assert_eq!(facts.timestamp, None);
    }

    #[test]
    fn dtm_parsing_completes_missing_components() {
        let january_first = parse_dtm("2024").expect("year only");
        assert_eq!(january_first.format("%Y-%m-%d %H:%M").to_string(), "2024-01-01 00:00");
        assert!(parse_dtm("20241301").is_none());
        assert!(parse_dtm("198").is_none());
        assert!(parse_dtm("20240229123000").is_some());
    }
}
