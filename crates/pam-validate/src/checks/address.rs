//! XAD extended address grammar.

use pam_model::{FieldValue, Issue};
use pam_profile::terminology;

/// An address should say something in its first six components (street,
/// other designation, city, state, zip, country); the optional address
/// type must come from table 0190.
pub fn check(value: &FieldValue, code: &str, name: &str, issues: &mut Vec<Issue>) {
    let populated = (1..=6).any(|position| !value.component(position).trim().is_empty());
    if !populated {
        issues.push(Issue::warning(
            format!("{code}_EMPTY"),
            format!("{name}: no address content in the first six components"),
        ));
    }
    let address_type = value.component(7).trim();
    if !address_type.is_empty() && !terminology::is_address_type_code(address_type) {
        issues.push(Issue::info(
            format!("{code}_TYPE"),
            format!("{name}: address type {address_type} is not in table 0190"),
        ));
    }
}
