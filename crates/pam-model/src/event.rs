//! Trigger events of the ADT admission family.
//!
//! The regional profile constrains the HL7 v2.5 ADT event set to the
//! admission/transfer/discharge lifecycle plus the demographic
//! maintenance events, and adds the `Z99` custom movement update.
//! Retired pending-family triggers (A15, A25, A26, A27, A32, A33) are
//! deliberately not members of this enum; they are tracked as raw codes
//! by the profile tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One catalogued trigger event, named after what it does to the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventCode {
    /// A01 - admit an inpatient.
    AdmitInpatient,
    /// A02 - transfer between care units.
    TransferPatient,
    /// A03 - discharge, end of stay.
    DischargePatient,
    /// A04 - register an outpatient.
    RegisterOutpatient,
    /// A05 - pre-admit before arrival.
    PreAdmit,
    /// A06 - change patient class from outpatient to inpatient.
    ChangeToInpatient,
    /// A07 - change patient class from inpatient to outpatient.
    ChangeToOutpatient,
    /// A08 - update encounter information.
    UpdateEncounter,
    /// A11 - cancel an admission.
    CancelAdmit,
    /// A12 - cancel a transfer.
    CancelTransfer,
    /// A13 - cancel a discharge.
    CancelDischarge,
    /// A14 - pending admission.
    PendingAdmit,
    /// A16 - pending discharge.
    PendingDischarge,
    /// A21 - leave of absence starts.
    LeaveOfAbsence,
    /// A22 - return from leave of absence.
    ReturnFromLeave,
    /// A28 - create person demographics.
    CreatePerson,
    /// A31 - update person demographics.
    UpdatePerson,
    /// A38 - cancel a pre-admission.
    CancelPreAdmit,
    /// A40 - merge two patient records.
    MergePatient,
    /// A47 - change a patient identifier.
    ChangePatientIdentifier,
    /// A52 - cancel a leave of absence.
    CancelLeaveOfAbsence,
    /// A53 - cancel a return from leave of absence.
    CancelReturnFromLeave,
    /// A54 - change the attending doctor.
    ChangeAttendingDoctor,
    /// A55 - cancel a change of attending doctor.
    CancelChangeAttendingDoctor,
    /// Z99 - profile-specific movement update.
    MovementUpdate,
}

impl EventCode {
    /// Every catalogued event, in trigger-code order.
    pub const ALL: &'static [EventCode] = &[
        EventCode::AdmitInpatient,
        EventCode::TransferPatient,
        EventCode::DischargePatient,
        EventCode::RegisterOutpatient,
        EventCode::PreAdmit,
        EventCode::ChangeToInpatient,
        EventCode::ChangeToOutpatient,
        EventCode::UpdateEncounter,
        EventCode::CancelAdmit,
        EventCode::CancelTransfer,
        EventCode::CancelDischarge,
        EventCode::PendingAdmit,
        EventCode::PendingDischarge,
        EventCode::LeaveOfAbsence,
        EventCode::ReturnFromLeave,
        EventCode::CreatePerson,
        EventCode::UpdatePerson,
        EventCode::CancelPreAdmit,
        EventCode::MergePatient,
        EventCode::ChangePatientIdentifier,
        EventCode::CancelLeaveOfAbsence,
        EventCode::CancelReturnFromLeave,
        EventCode::ChangeAttendingDoctor,
        EventCode::CancelChangeAttendingDoctor,
        EventCode::MovementUpdate,
    ];

    /// The trigger code as carried in MSH-9.2.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCode::AdmitInpatient => "A01",
            EventCode::TransferPatient => "A02",
            EventCode::DischargePatient => "A03",
            EventCode::RegisterOutpatient => "A04",
            EventCode::PreAdmit => "A05",
            EventCode::ChangeToInpatient => "A06",
            EventCode::ChangeToOutpatient => "A07",
            EventCode::UpdateEncounter => "A08",
            EventCode::CancelAdmit => "A11",
            EventCode::CancelTransfer => "A12",
            EventCode::CancelDischarge => "A13",
            EventCode::PendingAdmit => "A14",
            EventCode::PendingDischarge => "A16",
            EventCode::LeaveOfAbsence => "A21",
            EventCode::ReturnFromLeave => "A22",
            EventCode::CreatePerson => "A28",
            EventCode::UpdatePerson => "A31",
            EventCode::CancelPreAdmit => "A38",
            EventCode::MergePatient => "A40",
            EventCode::ChangePatientIdentifier => "A47",
            EventCode::CancelLeaveOfAbsence => "A52",
            EventCode::CancelReturnFromLeave => "A53",
            EventCode::ChangeAttendingDoctor => "A54",
            EventCode::CancelChangeAttendingDoctor => "A55",
            EventCode::MovementUpdate => "Z99",
        }
    }

    /// Demographic maintenance events carry no visit context.
    pub fn is_identity(&self) -> bool {
        matches!(
            self,
            EventCode::CreatePerson
                | EventCode::UpdatePerson
                | EventCode::MergePatient
                | EventCode::ChangePatientIdentifier
        )
    }

    /// Movement events act on an encounter.
    pub fn is_movement(&self) -> bool {
        !self.is_identity()
    }

    /// Events that open an encounter: inpatient admission and
    /// outpatient registration.
    pub fn is_admission(&self) -> bool {
        matches!(
            self,
            EventCode::AdmitInpatient | EventCode::RegisterOutpatient
        )
    }

    /// The two patient-class flips.
    pub fn is_status_flip(&self) -> bool {
        matches!(
            self,
            EventCode::ChangeToInpatient | EventCode::ChangeToOutpatient
        )
    }

    /// Events that undo an earlier event.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            EventCode::CancelAdmit
                | EventCode::CancelTransfer
                | EventCode::CancelDischarge
                | EventCode::CancelPreAdmit
                | EventCode::CancelLeaveOfAbsence
                | EventCode::CancelReturnFromLeave
                | EventCode::CancelChangeAttendingDoctor
        )
    }

    /// Whether the movement this event describes must name an explicit
    /// care location. Discharges, cancellations and leave starts point
    /// away from the hospital, so none is required.
    pub fn requires_location(&self) -> bool {
        matches!(
            self,
            EventCode::AdmitInpatient
                | EventCode::TransferPatient
                | EventCode::ChangeToInpatient
                | EventCode::ReturnFromLeave
                | EventCode::MovementUpdate
        )
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventCode {
    type Err = String;

    /// Parse a trigger code, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        EventCode::ALL
            .iter()
            .find(|code| code.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("unknown trigger event: {s}"))
    }
}
