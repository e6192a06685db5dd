#![deny(unsafe_code)]

//! Static tables of the regional ADT implementation profile: segment
//! presence/ordering policies per trigger, the coded value tables the
//! field grammars check against, and the admission-workflow legality
//! tables. Everything here is immutable data built once and shared
//! read-only; the validators in `pam-validate` only ever look things up.

pub mod policy;
pub mod terminology;
pub mod transitions;

pub use policy::{
    SEGMENT_ORDER, SegmentPolicy, catalogued_triggers, is_identity_maintenance_trigger,
    segment_policy,
};
pub use transitions::{
    DECOMMISSIONED_TRIGGERS, admission_start_states, admitted_context, initial_events,
    is_decommissioned_trigger, legal_followers,
};
