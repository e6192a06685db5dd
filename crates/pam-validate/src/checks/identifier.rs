//! CX identifier grammar: id value, check digit, check-digit scheme.

use pam_model::{FieldValue, Issue};

/// An identifier must carry a value; a check digit without the scheme
/// that verifies it is unverifiable and flagged.
pub fn check(value: &FieldValue, code: &str, name: &str, issues: &mut Vec<Issue>) {
    if value.component(1).trim().is_empty() {
        issues.push(Issue::error(
            format!("{code}_EMPTY"),
            format!("{name}: identifier value is empty"),
        ));
        return;
    }
    let check_digit = value.component(2).trim();
    if !check_digit.is_empty() && value.component(3).trim().is_empty() {
        issues.push(Issue::warning(
            format!("{code}_CHECK_DIGIT"),
            format!("{name}: check digit {check_digit} has no check-digit scheme"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pam_model::Severity;

    fn value(raw: &str) -> FieldValue {
        FieldValue::new(raw.split('^').map(String::from).collect())
    }

    fn run(raw: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        check(&value(raw), "PID_IDENTIFIER", "patient identifier", &mut issues);
        issues
    }

    #[test]
    fn empty_identifier_is_an_error() {
        let issues = run("");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "PID_IDENTIFIER_EMPTY");
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn bare_identifier_is_fine() {
        assert!(run("123").is_empty());
    }

    #[test]
    fn check_digit_without_scheme_is_flagged() {
        let issues = run("123^4");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "PID_IDENTIFIER_CHECK_DIGIT");
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn check_digit_with_scheme_is_fine() {
        assert!(run("123^4^ISO").is_empty());
    }
}
