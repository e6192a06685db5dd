//! XPN extended person name grammar.

use pam_model::{FieldValue, Issue};
use pam_profile::terminology;

/// A usable name needs a family or a given name; the optional name-type
/// code must come from table 0200.
pub fn check(value: &FieldValue, code: &str, name: &str, issues: &mut Vec<Issue>) {
    let family = value.component(1).trim();
    let given = value.component(2).trim();
    if family.is_empty() && given.is_empty() {
        issues.push(Issue::error(
            format!("{code}_EMPTY"),
            format!("{name}: family and given name are both empty"),
        ));
    }
    let name_type = value.component(7).trim();
    if !name_type.is_empty() && !terminology::is_name_type_code(name_type) {
        issues.push(Issue::warning(
            format!("{code}_TYPE"),
            format!("{name}: name type code {name_type} is not in table 0200"),
        ));
    }
}
