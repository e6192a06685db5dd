//! Structural validation against the profile's segment policies.

use pam_ingest::parse_message;
use pam_model::{ConformanceLevel, Message, MessageReport, Severity};
use pam_profile::{catalogued_triggers, segment_policy};
use pam_validate::validate_message;

fn header_line(trigger: &str) -> String {
    format!("MSH|^~\\&|HIS|HOSP|EAI|HOSP|20240101120000||ADT^{trigger}|MSG0001|P|2.5")
}

/// A conformant line for each profile segment.
fn segment_line(tag: &str, trigger: &str) -> String {
    match tag {
        "MSH" => header_line(trigger),
        "EVN" => format!("EVN|{trigger}|20240101120000"),
        "PID" => "PID|1||123456^^^HOSP^PI||DUPONT^JEAN||19800101|M".to_string(),
        "PD1" => "PD1|||CABINET^^^^^C".to_string(),
        "MRG" => "MRG|654321^^^HOSP^PI".to_string(),
        "ROL" => "ROL|1|AD|ODRP|456^DURAND^PAUL".to_string(),
        "NK1" => "NK1|1|DUPONT^MARIE|SPO".to_string(),
        "PV1" => "PV1|1|I|UF1^ROOM1^BED1".to_string(),
        "PV2" => "PV2|||^scheduled admission".to_string(),
        "ZBE" => "ZBE|MVT001|20240101120000||INSERT".to_string(),
        "OBX" => "OBX|1|NM|HEIGHT||180|cm".to_string(),
        "AL1" => "AL1|1|DA|PENICILLIN".to_string(),
        "DG1" => "DG1|1||I10^Hypertension^CIM10".to_string(),
        "ZFP" => "ZFP|ACT".to_string(),
        "ZFV" => "ZFV|8^Domicile".to_string(),
        "ZFM" => "ZFM|1".to_string(),
        "ZFD" => "ZFD||N".to_string(),
        other => panic!("no fixture line for segment {other}"),
    }
}

/// Minimal conformant message for a trigger: exactly the required
/// segments, in reference order.
fn minimal_text(trigger: &str) -> String {
    let policy = segment_policy(trigger).expect("catalogued trigger");
    policy
        .order
        .iter()
        .filter(|tag| policy.is_required(tag))
        .map(|tag| segment_line(tag, trigger))
        .collect::<Vec<_>>()
        .join("\r")
}

fn parse(text: &str) -> Message {
    parse_message(text).expect("parse message")
}

fn assert_has_error(report: &MessageReport, code: &str, detail: &str) {
    assert!(
        report
            .issues
            .iter()
            .any(|issue| issue.severity == Severity::Error
                && issue.code == code
                && issue.message.contains(detail)),
        "expected {code} naming {detail}, got {:?}",
        report.issues
    );
}

#[test]
fn minimal_messages_are_conformant_for_every_trigger() {
    for trigger in catalogued_triggers() {
        let report = validate_message(&parse(&minimal_text(trigger)));
        assert_eq!(
            report.level(),
            ConformanceLevel::Ok,
            "{trigger}: {:?}",
            report.issues
        );
        assert_eq!(report.event.as_deref(), Some(trigger));
        assert_eq!(report.message_code.as_deref(), Some("ADT"));
    }
}

#[test]
fn each_missing_required_segment_is_named() {
    for trigger in catalogued_triggers() {
        let policy = segment_policy(trigger).expect("policy");
        for removed in policy.required {
            if *removed == "MSH" {
                continue;
            }
            let text: Vec<String> = policy
                .order
                .iter()
                .filter(|tag| policy.is_required(tag) && *tag != removed)
                .map(|tag| segment_line(tag, trigger))
                .collect();
            let report = validate_message(&parse(&text.join("\r")));
            assert!(!report.is_valid(), "{trigger} without {removed}");
            let expected = match *removed {
                "EVN" => ("EVN_MISSING", "EVN"),
                "PID" => ("PID_MISSING", "PID"),
                tag => ("SEGMENT_REQUIRED", tag),
            };
            assert_has_error(&report, expected.0, expected.1);
        }
    }
}

#[test]
fn each_forbidden_segment_is_named() {
    for trigger in catalogued_triggers() {
        let policy = segment_policy(trigger).expect("policy");
        for forbidden in policy.forbidden {
            let mut text = minimal_text(trigger);
            text.push('\r');
            text.push_str(&segment_line(forbidden, trigger));
            let report = validate_message(&parse(&text));
            assert!(!report.is_valid(), "{trigger} with {forbidden}");
            assert_has_error(&report, "SEGMENT_FORBIDDEN", forbidden);
        }
    }
}

#[test]
fn swapping_adjacent_segments_warns_once() {
    let policy = segment_policy("A01").expect("policy");
    let mut lines: Vec<String> = policy
        .order
        .iter()
        .filter(|tag| policy.is_required(tag))
        .map(|tag| segment_line(tag, "A01"))
        .collect();
    // EVN and PID trade places
    lines.swap(1, 2);
    let report = validate_message(&parse(&lines.join("\r")));
    let order_warnings = report
        .issues
        .iter()
        .filter(|issue| issue.code == "SEGMENT_ORDER")
        .count();
    assert_eq!(order_warnings, 1, "{:?}", report.issues);
    assert_eq!(report.level(), ConformanceLevel::Warn);

    let ordered = validate_message(&parse(&minimal_text("A01")));
    assert!(ordered.issues.iter().all(|issue| issue.code != "SEGMENT_ORDER"));
}

#[test]
fn missing_header_short_circuits() {
    let report = validate_message(&parse("PID|1||123456^^^HOSP^PI||DUPONT^JEAN"));
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].code, "MSH_MISSING");
    assert_eq!(report.level(), ConformanceLevel::Fail);
    assert!(report.event.is_none());
}

#[test]
fn header_defects_are_graded() {
    let text = minimal_text("A01").replace(
        &header_line("A01"),
        "MSH|^~\\&|HIS|HOSP|EAI|HOSP|20240101120000||ADT^A01||X|",
    );
    let report = validate_message(&parse(&text));
    assert_has_error(&report, "MSH_CONTROL_ID", "control id");
    assert!(report.issues.iter().any(|issue| issue.code == "MSH_PROCESSING_ID"
        && issue.severity == Severity::Warning));
    assert!(report.issues.iter().any(|issue| issue.code == "MSH_VERSION_ID"
        && issue.severity == Severity::Info));
}

#[test]
fn malformed_message_type_is_an_error() {
    let text = minimal_text("A01").replace("ADT^A01", "ORU^R01");
    let report = validate_message(&parse(&text));
    assert_has_error(&report, "MSH_MESSAGE_TYPE", "ORU");
}

#[test]
fn event_trigger_mismatch_warns() {
    let text = minimal_text("A01").replace("EVN|A01|", "EVN|A03|");
    let report = validate_message(&parse(&text));
    assert!(report.issues.iter().any(|issue| issue.code == "EVN_TRIGGER_MISMATCH"
        && issue.severity == Severity::Warning));
    assert!(report.is_valid());
}

#[test]
fn patient_identifier_grammar_runs_per_repetition() {
    let text = minimal_text("A01").replace(
        "PID|1||123456^^^HOSP^PI|",
        "PID|1||123456^^^HOSP^PI~^9|",
    );
    let report = validate_message(&parse(&text));
    assert_has_error(&report, "PID_IDENTIFIER_EMPTY.2", "identifier");
}

#[test]
fn absent_patient_name_warns() {
    let text = minimal_text("A01").replace("||DUPONT^JEAN|", "|||");
    let report = validate_message(&parse(&text));
    assert!(report.issues.iter().any(|issue| issue.code == "PID_NAME_MISSING"));
    assert!(report.is_valid());
}

#[test]
fn visit_segment_fields_are_checked() {
    let text = minimal_text("A01").replace(
        "PV1|1|I|UF1^ROOM1^BED1",
        "PV1|1||^^^^X||||^DURAND~^^||||||||||||123^4",
    );
    let report = validate_message(&parse(&text));
    assert_has_error(&report, "PV1_CLASS_EMPTY", "class");
    assert!(report.issues.iter().any(|issue| issue.code == "PV1_LOCATION_EMPTY"));
    assert!(report.issues.iter().any(|issue| issue.code == "PV1_DOCTOR_EMPTY.2"));
    assert!(report.issues.iter().any(|issue| issue.code == "PV1_VISIT_NUMBER_CHECK_DIGIT"));
}

#[test]
fn unknown_patient_class_warns() {
    let text = minimal_text("A01").replace("PV1|1|I|", "PV1|1|Z|");
    let report = validate_message(&parse(&text));
    assert!(report.issues.iter().any(|issue| issue.code == "PV1_CLASS_UNKNOWN"
        && issue.severity == Severity::Warning));
    assert!(report.is_valid());
}

#[test]
fn optional_segments_are_listed_as_info() {
    let mut text = minimal_text("A01");
    text.push('\r');
    text.push_str(&segment_line("DG1", "A01"));
    let report = validate_message(&parse(&text));
    assert!(report.issues.iter().any(|issue| issue.code == "SEGMENT_OPTIONAL"
        && issue.severity == Severity::Info
        && issue.message.contains("DG1")));
    assert_eq!(report.level(), ConformanceLevel::Ok);
}

#[test]
fn uncatalogued_visit_trigger_requires_a_visit_segment() {
    let text = [
        "MSH|^~\\&|HIS|HOSP|EAI|HOSP|20240101120000||ADT^A09|MSG0001|P|2.5",
        "EVN|A09|20240101120000",
        "PID|1||123456^^^HOSP^PI||DUPONT^JEAN",
    ]
    .join("\r");
    let report = validate_message(&parse(&text));
    assert_has_error(&report, "FALLBACK_VISIT_REQUIRED", "PV1");
}

#[test]
fn uncatalogued_identity_trigger_flags_a_stray_visit_segment() {
    let text = [
        "MSH|^~\\&|HIS|HOSP|EAI|HOSP|20240101120000||ADT^A24|MSG0001|P|2.5",
        "EVN|A24|20240101120000",
        "PID|1||123456^^^HOSP^PI||DUPONT^JEAN",
        "PV1|1|I|UF1",
    ]
    .join("\r");
    let report = validate_message(&parse(&text));
    assert!(report.issues.iter().any(|issue| issue.code == "FALLBACK_VISIT_PRESENT"
        && issue.severity == Severity::Info));
    assert!(report.is_valid());
}

#[test]
fn validation_is_idempotent() {
    let message = parse(&minimal_text("A02"));
    assert_eq!(validate_message(&message), validate_message(&message));
}
