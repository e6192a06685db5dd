//! Admission-event workflow legality.
//!
//! The state of an encounter is the event code of its last accepted
//! movement, or nothing before the first one; the caller threads that
//! value across invocations, nothing is stored here. Legality is the
//! base transition table plus two business-rule overrides that must both
//! hold: admissions only open encounters, and patient-class flips only
//! happen on currently admitted encounters.

use tracing::trace;

use pam_model::EventCode;
use pam_profile::{admission_start_states, admitted_context, initial_events, legal_followers};

/// Last accepted movement for an encounter; `start` before any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowState(Option<EventCode>);

impl WorkflowState {
    pub fn start() -> Self {
        Self(None)
    }

    pub fn after(event: EventCode) -> Self {
        Self(Some(event))
    }

    pub fn last_event(&self) -> Option<EventCode> {
        self.0
    }
}

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionViolation {
    /// The candidate never follows the current state in the base table.
    NotInTable,
    /// An admission may only open an encounter: the previous state must
    /// be the start state, a pre-admission or a discharge.
    StartOfEncounter,
    /// A patient-class flip needs a currently admitted encounter.
    AdmissionContext,
}

/// Structured outcome of a legality check; never an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionVerdict {
    Legal,
    Illegal(TransitionViolation),
}

impl TransitionVerdict {
    pub fn is_legal(&self) -> bool {
        matches!(self, TransitionVerdict::Legal)
    }
}

/// Decide whether `candidate` may follow the given state.
pub fn check_transition(state: WorkflowState, candidate: EventCode) -> TransitionVerdict {
    let in_table = match state.last_event() {
        None => initial_events().contains(&candidate),
        Some(previous) => legal_followers(previous).contains(&candidate),
    };
    if !in_table {
        trace!(?state, %candidate, "transition not in base table");
        return TransitionVerdict::Illegal(TransitionViolation::NotInTable);
    }
    if candidate.is_admission() && !may_open_encounter(state) {
        trace!(?state, %candidate, "admission over an active encounter");
        return TransitionVerdict::Illegal(TransitionViolation::StartOfEncounter);
    }
    if candidate.is_status_flip() && !in_admitted_context(state) {
        trace!(?state, %candidate, "class flip outside admitted context");
        return TransitionVerdict::Illegal(TransitionViolation::AdmissionContext);
    }
    TransitionVerdict::Legal
}

fn may_open_encounter(state: WorkflowState) -> bool {
    match state.last_event() {
        None => true,
        Some(previous) => admission_start_states().contains(&previous),
    }
}

fn in_admitted_context(state: WorkflowState) -> bool {
    state
        .last_event()
        .is_some_and(|previous| admitted_context().contains(&previous))
}
