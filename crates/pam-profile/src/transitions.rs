//! Admission-workflow legality tables.
//!
//! The workflow state of an encounter is the event code of its last
//! accepted movement; the synthetic start state (no movement yet) is
//! covered by [`initial_events`]. [`legal_followers`] is the base
//! transition table; the two business-rule overrides (admissions only
//! open encounters, class flips only on admitted encounters) are
//! enforced on top of it by the state machine, so a follower listed here
//! can still be refused.
//!
//! `A08` encounter updates are state-transparent: their row is wide and
//! relies on the overrides to gate what the update cannot actually do.

use pam_model::EventCode;
use pam_model::EventCode::{
    AdmitInpatient, CancelAdmit, CancelChangeAttendingDoctor, CancelDischarge,
    CancelLeaveOfAbsence, CancelPreAdmit, CancelReturnFromLeave, CancelTransfer,
    ChangeAttendingDoctor, ChangePatientIdentifier, ChangeToInpatient, ChangeToOutpatient,
    CreatePerson, DischargePatient, LeaveOfAbsence, MergePatient, MovementUpdate, PendingAdmit,
    PendingDischarge, PreAdmit, RegisterOutpatient, ReturnFromLeave, TransferPatient,
    UpdateEncounter, UpdatePerson,
};

/// Events allowed to start a sequence. Cancelling a pre-admission is
/// explicitly absent: it may only ever follow one.
const INITIAL_EVENTS: &[EventCode] = &[
    AdmitInpatient,
    RegisterOutpatient,
    PreAdmit,
    PendingAdmit,
    CreatePerson,
    UpdatePerson,
];

/// Prior states from which an admission may open an encounter, besides
/// the start state.
const ADMISSION_START_STATES: &[EventCode] = &[PreAdmit, DischargePatient];

/// States in which the encounter is currently admitted, for the
/// patient-class flip override.
const ADMITTED_CONTEXT: &[EventCode] = &[
    AdmitInpatient,
    TransferPatient,
    RegisterOutpatient,
    ChangeToInpatient,
    ChangeToOutpatient,
    LeaveOfAbsence,
    ReturnFromLeave,
    ChangeAttendingDoctor,
    CancelChangeAttendingDoctor,
];

/// Triggers retired by the profile; scenarios reject them wherever they
/// appear. They are raw codes because the event enum no longer carries
/// them.
pub const DECOMMISSIONED_TRIGGERS: &[&str] = &["A15", "A25", "A26", "A27", "A32", "A33"];

pub fn initial_events() -> &'static [EventCode] {
    INITIAL_EVENTS
}

pub fn admission_start_states() -> &'static [EventCode] {
    ADMISSION_START_STATES
}

pub fn admitted_context() -> &'static [EventCode] {
    ADMITTED_CONTEXT
}

pub fn is_decommissioned_trigger(trigger: &str) -> bool {
    DECOMMISSIONED_TRIGGERS.contains(&trigger.trim().to_uppercase().as_str())
}

/// Base transition table: events that may follow `state`.
pub fn legal_followers(state: EventCode) -> &'static [EventCode] {
    match state {
        AdmitInpatient => &[
            TransferPatient,
            DischargePatient,
            ChangeToOutpatient,
            UpdateEncounter,
            CancelAdmit,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        TransferPatient => &[
            TransferPatient,
            DischargePatient,
            ChangeToInpatient,
            ChangeToOutpatient,
            UpdateEncounter,
            CancelTransfer,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        DischargePatient => &[
            AdmitInpatient,
            RegisterOutpatient,
            PreAdmit,
            UpdateEncounter,
            CancelDischarge,
        ],
        RegisterOutpatient => &[
            TransferPatient,
            DischargePatient,
            ChangeToInpatient,
            UpdateEncounter,
            CancelAdmit,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        PreAdmit => &[
            AdmitInpatient,
            RegisterOutpatient,
            UpdateEncounter,
            CancelPreAdmit,
        ],
        ChangeToInpatient => &[
            TransferPatient,
            DischargePatient,
            ChangeToOutpatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        ChangeToOutpatient => &[
            TransferPatient,
            DischargePatient,
            ChangeToInpatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        UpdateEncounter => &[
            AdmitInpatient,
            TransferPatient,
            DischargePatient,
            RegisterOutpatient,
            ChangeToInpatient,
            ChangeToOutpatient,
            UpdateEncounter,
            CancelAdmit,
            CancelTransfer,
            CancelDischarge,
            PendingDischarge,
            LeaveOfAbsence,
            ReturnFromLeave,
            CancelPreAdmit,
            CancelLeaveOfAbsence,
            CancelReturnFromLeave,
            ChangeAttendingDoctor,
            CancelChangeAttendingDoctor,
            MovementUpdate,
        ],
        CancelAdmit => &[PreAdmit, PendingAdmit],
        CancelTransfer => &[
            TransferPatient,
            DischargePatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        CancelDischarge => &[
            TransferPatient,
            DischargePatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        PendingAdmit => &[AdmitInpatient, RegisterOutpatient, UpdateEncounter],
        PendingDischarge => &[
            TransferPatient,
            DischargePatient,
            UpdateEncounter,
            LeaveOfAbsence,
            MovementUpdate,
        ],
        LeaveOfAbsence => &[
            DischargePatient,
            UpdateEncounter,
            ReturnFromLeave,
            CancelLeaveOfAbsence,
        ],
        ReturnFromLeave => &[
            TransferPatient,
            DischargePatient,
            ChangeToOutpatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            CancelReturnFromLeave,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        CreatePerson => &[UpdatePerson, MergePatient, ChangePatientIdentifier],
        UpdatePerson => &[UpdatePerson, MergePatient, ChangePatientIdentifier],
        CancelPreAdmit => &[PreAdmit],
        MergePatient => &[UpdatePerson, ChangePatientIdentifier],
        ChangePatientIdentifier => &[UpdatePerson, MergePatient],
        CancelLeaveOfAbsence => &[
            TransferPatient,
            DischargePatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        CancelReturnFromLeave => &[
            DischargePatient,
            UpdateEncounter,
            ReturnFromLeave,
            CancelLeaveOfAbsence,
        ],
        ChangeAttendingDoctor => &[
            TransferPatient,
            DischargePatient,
            ChangeToInpatient,
            ChangeToOutpatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            CancelChangeAttendingDoctor,
            MovementUpdate,
        ],
        CancelChangeAttendingDoctor => &[
            TransferPatient,
            DischargePatient,
            ChangeToInpatient,
            ChangeToOutpatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
        MovementUpdate => &[
            TransferPatient,
            DischargePatient,
            UpdateEncounter,
            PendingDischarge,
            LeaveOfAbsence,
            ChangeAttendingDoctor,
            MovementUpdate,
        ],
    }
}
