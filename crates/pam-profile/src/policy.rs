//! Segment presence and ordering policies per trigger event.
//!
//! These tables transcribe the regional constrainable profile for the
//! admission family: each catalogued trigger lists the segments a
//! conformant message must, may and must not carry, plus the reference
//! order used for relative-position checks. The `ZBE` movement segment
//! and the `ZF*` French extension segments come from the profile, the
//! rest from the HL7 v2.5 ADT message definitions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Reference segment order shared by every catalogued trigger.
pub const SEGMENT_ORDER: &[&str] = &[
    "MSH", "EVN", "PID", "PD1", "MRG", "ROL", "NK1", "PV1", "PV2", "ZBE", "OBX", "AL1", "DG1",
    "ZFP", "ZFV", "ZFM", "ZFD",
];

/// Presence rules for one trigger event.
#[derive(Debug, Clone, Copy)]
pub struct SegmentPolicy {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub forbidden: &'static [&'static str],
    pub order: &'static [&'static str],
}

impl SegmentPolicy {
    pub fn is_required(&self, tag: &str) -> bool {
        self.required.contains(&tag)
    }

    pub fn is_optional(&self, tag: &str) -> bool {
        self.optional.contains(&tag)
    }

    pub fn is_forbidden(&self, tag: &str) -> bool {
        self.forbidden.contains(&tag)
    }

    /// Position of a tag in the reference order, when it has one.
    pub fn order_index(&self, tag: &str) -> Option<usize> {
        self.order.iter().position(|entry| *entry == tag)
    }
}

/// Full movement notification: the encounter and the movement segment
/// are both mandatory.
const MOVEMENT: SegmentPolicy = SegmentPolicy {
    required: &["MSH", "EVN", "PID", "PV1", "ZBE"],
    optional: &[
        "PD1", "ROL", "NK1", "PV2", "OBX", "AL1", "DG1", "ZFP", "ZFV", "ZFM", "ZFD",
    ],
    forbidden: &["MRG"],
    order: SEGMENT_ORDER,
};

/// Cancellation of an earlier movement: same mandatory skeleton, but the
/// clinical detail segments have nothing to cancel.
const CANCELLATION: SegmentPolicy = SegmentPolicy {
    required: &["MSH", "EVN", "PID", "PV1", "ZBE"],
    optional: &["PD1", "PV2", "ZFV"],
    forbidden: &["MRG", "OBX", "AL1", "DG1"],
    order: SEGMENT_ORDER,
};

/// Encounter-level updates that are not movements; the movement segment
/// may tag along but is not required.
const ENCOUNTER_UPDATE: SegmentPolicy = SegmentPolicy {
    required: &["MSH", "EVN", "PID", "PV1"],
    optional: &[
        "PD1", "ROL", "NK1", "PV2", "ZBE", "OBX", "AL1", "DG1", "ZFP", "ZFV", "ZFM", "ZFD",
    ],
    forbidden: &["MRG"],
    order: SEGMENT_ORDER,
};

/// Demographic maintenance without any visit context.
const IDENTITY: SegmentPolicy = SegmentPolicy {
    required: &["MSH", "EVN", "PID"],
    optional: &["PD1", "ROL", "NK1", "AL1"],
    forbidden: &["MRG", "PV1", "PV2", "ZBE"],
    order: SEGMENT_ORDER,
};

/// Identifier surgery: the prior identifier travels in MRG.
const IDENTIFIER_CHANGE: SegmentPolicy = SegmentPolicy {
    required: &["MSH", "EVN", "PID", "MRG"],
    optional: &["PD1"],
    forbidden: &["PV1", "PV2", "ZBE"],
    order: SEGMENT_ORDER,
};

const MOVEMENT_TRIGGERS: &[&str] = &[
    "A01", "A02", "A03", "A04", "A05", "A06", "A07", "A14", "A16", "A21", "A22", "Z99",
];
const CANCELLATION_TRIGGERS: &[&str] = &["A11", "A12", "A13", "A38", "A52", "A53"];
const ENCOUNTER_UPDATE_TRIGGERS: &[&str] = &["A08", "A54", "A55"];
const IDENTITY_TRIGGERS: &[&str] = &["A28", "A31"];
const IDENTIFIER_CHANGE_TRIGGERS: &[&str] = &["A40", "A47"];

/// Demographic-maintenance triggers outside the catalogued profile.
/// Used only by the uncatalogued-trigger fallback to decide whether a
/// visit segment is expected at all.
const IDENTITY_MAINTENANCE_TRIGGERS: &[&str] = &[
    "A23", "A24", "A29", "A30", "A34", "A35", "A36", "A37", "A43", "A44", "A46", "A48", "A49",
    "A50", "A51",
];

static POLICIES: OnceLock<BTreeMap<&'static str, SegmentPolicy>> = OnceLock::new();

fn policies() -> &'static BTreeMap<&'static str, SegmentPolicy> {
    POLICIES.get_or_init(|| {
        let mut table = BTreeMap::new();
        for (triggers, policy) in [
            (MOVEMENT_TRIGGERS, MOVEMENT),
            (CANCELLATION_TRIGGERS, CANCELLATION),
            (ENCOUNTER_UPDATE_TRIGGERS, ENCOUNTER_UPDATE),
            (IDENTITY_TRIGGERS, IDENTITY),
            (IDENTIFIER_CHANGE_TRIGGERS, IDENTIFIER_CHANGE),
        ] {
            for trigger in triggers {
                table.insert(*trigger, policy);
            }
        }
        table
    })
}

/// Policy for a catalogued trigger; `None` sends the validator down its
/// relaxed fallback branch.
pub fn segment_policy(trigger: &str) -> Option<&'static SegmentPolicy> {
    policies().get(trigger.trim().to_uppercase().as_str())
}

/// Every trigger the profile catalogues, in code order.
pub fn catalogued_triggers() -> impl Iterator<Item = &'static str> {
    policies().keys().copied()
}

/// Whether an uncatalogued trigger belongs to the demographic
/// maintenance family rather than implying a visit.
pub fn is_identity_maintenance_trigger(trigger: &str) -> bool {
    IDENTITY_MAINTENANCE_TRIGGERS.contains(&trigger.trim().to_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalogued_trigger_has_an_ordered_policy() {
        let mut count = 0;
        for trigger in catalogued_triggers() {
            let policy = segment_policy(trigger).expect("policy");
            for tag in policy.required.iter().chain(policy.optional) {
                assert!(
                    policy.order_index(tag).is_some(),
                    "{trigger}: {tag} missing from reference order"
                );
            }
            count += 1;
        }
        assert_eq!(count, 25);
    }

    #[test]
    fn required_and_forbidden_never_overlap() {
        for trigger in catalogued_triggers() {
            let policy = segment_policy(trigger).expect("policy");
            for tag in policy.required {
                assert!(!policy.is_forbidden(tag), "{trigger}: {tag} both ways");
                assert!(!policy.is_optional(tag), "{trigger}: {tag} both ways");
            }
        }
    }

    #[test]
    fn lookups_normalize_case_and_whitespace() {
        assert!(segment_policy(" a01 ").is_some());
        assert!(segment_policy("A99").is_none());
    }

    #[test]
    fn identifier_change_carries_the_prior_identifier() {
        for trigger in ["A40", "A47"] {
            let policy = segment_policy(trigger).expect("policy");
            assert!(policy.is_required("MRG"));
            assert!(policy.is_forbidden("PV1"));
        }
    }

    #[test]
    fn fallback_classifier_knows_the_maintenance_family() {
        assert!(is_identity_maintenance_trigger("A24"));
        assert!(!is_identity_maintenance_trigger("A99"));
        assert!(!is_identity_maintenance_trigger("A01"));
    }
}
