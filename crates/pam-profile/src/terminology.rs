//! Coded value tables referenced by the field grammars.
//!
//! HL7 v2.5 user-defined tables as constrained by the profile: 0200
//! (name type), 0190 (address type), 0201 (telecommunication use), 0202
//! (telecommunication equipment), 0004 (patient class) and 0103
//! (processing id). Membership is case-sensitive; the tables carry the
//! codes exactly as the standard spells them.

/// Table 0200 - name type code (XPN-7).
pub const NAME_TYPE_CODES: &[&str] = &[
    "A", "B", "C", "D", "I", "L", "M", "N", "P", "R", "S", "T", "U",
];

/// Table 0190 - address type (XAD-7).
pub const ADDRESS_TYPE_CODES: &[&str] = &[
    "B", "BA", "BDL", "BR", "C", "F", "H", "L", "M", "N", "O", "P", "RH", "SH", "V",
];

/// Table 0201 - telecommunication use code (XTN-2).
pub const TELECOM_USE_CODES: &[&str] = &[
    "ASN", "BPN", "EMR", "NET", "ORN", "PRN", "PRS", "VHN", "WPN",
];

/// Table 0202 - telecommunication equipment type (XTN-3).
pub const TELECOM_EQUIPMENT_CODES: &[&str] = &[
    "BP", "CP", "FX", "Internet", "MD", "PH", "SAT", "TDD", "TTY",
];

/// Table 0004 - patient class (PV1-2).
pub const PATIENT_CLASS_CODES: &[&str] = &["B", "C", "E", "I", "N", "O", "P", "R", "U"];

/// Table 0103 - processing id (MSH-11).
pub const PROCESSING_IDS: &[&str] = &["P", "D", "T"];

pub fn is_name_type_code(code: &str) -> bool {
    NAME_TYPE_CODES.contains(&code)
}

pub fn is_address_type_code(code: &str) -> bool {
    ADDRESS_TYPE_CODES.contains(&code)
}

pub fn is_telecom_use_code(code: &str) -> bool {
    TELECOM_USE_CODES.contains(&code)
}

pub fn is_telecom_equipment_code(code: &str) -> bool {
    TELECOM_EQUIPMENT_CODES.contains(&code)
}

pub fn is_patient_class_code(code: &str) -> bool {
    PATIENT_CLASS_CODES.contains(&code)
}

pub fn is_processing_id(code: &str) -> bool {
    PROCESSING_IDS.contains(&code)
}
