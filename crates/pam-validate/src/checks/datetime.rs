//! DTM timestamp grammar (HL7 v2.5 section 2.A.22).
//!
//! A DTM value is validated to the precision it actually carries: a bare
//! year is complete, and month, day and time components are range-checked
//! only when the value is long enough to contain them. Trailing timezone
//! offsets and fractional seconds are outside the grammar and stripped
//! before checking.

use pam_model::Issue;

const COMPONENTS: &[(usize, usize, u32, u32, &str)] = &[
    (4, 6, 1, 12, "month"),
    (6, 8, 1, 31, "day"),
    (8, 10, 0, 23, "hour"),
    (10, 12, 0, 59, "minute"),
    (12, 14, 0, 59, "second"),
];

/// Validate one DTM value; absent values are not an issue.
pub fn check(raw: &str, code: &str, name: &str, issues: &mut Vec<Issue>) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let body = strip_suffixes(trimmed);
    if body.len() < 4 || !body.chars().all(|c| c.is_ascii_digit()) {
        issues.push(Issue::error(
            format!("{code}_FORMAT"),
            format!("{name}: {trimmed} is not a DTM timestamp"),
        ));
        return;
    }
    for (start, end, low, high, label) in COMPONENTS {
        if body.len() < *end {
            break;
        }
        let Some(number) = body.get(*start..*end).and_then(|digits| digits.parse::<u32>().ok())
        else {
            continue;
        };
        if number < *low || number > *high {
            issues.push(Issue::error(
                format!("{code}_RANGE"),
                format!("{name}: {label} {number} is out of range"),
            ));
        }
    }
}

/// Timezone offset and fractional seconds are not part of the digit body.
fn strip_suffixes(raw: &str) -> &str {
    let without_zone = raw.find(['+', '-']).map_or(raw, |at| &raw[..at]);
    without_zone
        .find('.')
        .map_or(without_zone, |at| &without_zone[..at])
}
