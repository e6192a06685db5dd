//! Field grammar checks.
//!
//! Each module validates one HL7 data type micro-format and appends
//! graded issues to the caller's list. Repeatable fields run once per
//! repetition through [`check_repetitions`], which suffixes issue codes
//! with the 1-based repetition index whenever a field actually repeats.

pub mod address;
pub mod datetime;
pub mod identifier;
pub mod person_name;
pub mod telecom;

use pam_model::{Field, FieldValue, Issue};

/// Run a grammar check over every repetition of `field`.
///
/// Single-valued fields keep their bare issue codes; once a field
/// repeats, every finding is tagged `CODE.1`, `CODE.2`, ... so the same
/// defect in different repetitions stays distinguishable.
pub fn check_repetitions(
    field: &Field,
    code: &str,
    name: &str,
    issues: &mut Vec<Issue>,
    check: impl Fn(&FieldValue, &str, &str, &mut Vec<Issue>),
) {
    let repeats = field.repetitions().len() > 1;
    for (index, value) in field.repetitions().iter().enumerate() {
        let mut found = Vec::new();
        check(value, code, name, &mut found);
        if repeats {
            for issue in &mut found {
                issue.code = format!("{}.{}", issue.code, index + 1);
            }
        }
        issues.append(&mut found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pam_model::Severity;

    fn field(raw: &str) -> Field {
        Field::new(
            raw,
            raw.split('~')
                .map(|rep| FieldValue::new(rep.split('^').map(String::from).collect()))
                .collect(),
        )
    }

    #[test]
    fn single_repetition_keeps_bare_codes() {
        let mut issues = Vec::new();
        check_repetitions(&field(""), "PID_IDENTIFIER", "patient identifier", &mut issues, identifier::check);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "PID_IDENTIFIER_EMPTY");
    }

    #[test]
    fn repeating_fields_tag_the_repetition_index() {
        let mut issues = Vec::new();
        check_repetitions(
            &field("123456^^^HOSP^PI~^4"),
            "PID_IDENTIFIER",
            "patient identifier",
            &mut issues,
            identifier::check,
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "PID_IDENTIFIER_EMPTY.2");
        assert_eq!(issues[0].severity, Severity::Error);
    }
}
