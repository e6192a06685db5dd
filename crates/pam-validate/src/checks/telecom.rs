//! XTN extended telecommunication grammar.

use pam_model::{FieldValue, Issue};
use pam_profile::terminology;

/// A telecom entry should carry a number or a free-text form; use and
/// equipment codes are checked against tables 0201 and 0202.
pub fn check(value: &FieldValue, code: &str, name: &str, issues: &mut Vec<Issue>) {
    let number = value.component(1).trim();
    let free_text = value.component(2).trim();
    if number.is_empty() && free_text.is_empty() {
        issues.push(Issue::warning(
            format!("{code}_EMPTY"),
            format!("{name}: no telephone number or free text"),
        ));
    }
    let use_code = value.component(3).trim();
    if !use_code.is_empty() && !terminology::is_telecom_use_code(use_code) {
        issues.push(Issue::info(
            format!("{code}_USE"),
            format!("{name}: telecommunication use code {use_code} is not in table 0201"),
        ));
    }
    let equipment = value.component(4).trim();
    if !equipment.is_empty() && !terminology::is_telecom_equipment_code(equipment) {
        issues.push(Issue::info(
            format!("{code}_EQUIPMENT"),
            format!("{name}: equipment type {equipment} is not in table 0202"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pam_model::Severity;

    fn run(raw: &str) -> Vec<Issue> {
        let value = FieldValue::new(raw.split('^').map(String::from).collect());
        let mut issues = Vec::new();
        check(&value, "PID_PHONE_HOME", "home phone", &mut issues);
        issues
    }

    #[test]
    fn number_with_catalogued_codes_passes() {
        assert!(run("0140000000^^PRN^PH").is_empty());
    }

    #[test]
    fn empty_entry_warns() {
        let issues = run("^^PRN");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "PID_PHONE_HOME_EMPTY");
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn uncatalogued_codes_are_informational() {
        let issues = run("0140000000^^XYZ^ABC");
        let codes: Vec<&str> = issues.iter().map(|issue| issue.code.as_str()).collect();
        assert_eq!(codes, ["PID_PHONE_HOME_USE", "PID_PHONE_HOME_EQUIPMENT"]);
        assert!(issues.iter().all(|issue| issue.severity == Severity::Info));
    }
}
