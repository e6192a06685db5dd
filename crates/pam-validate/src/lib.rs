//! Conformance engine for the regional ADT admission profile.
//!
//! Three entry points, all pure functions over in-memory values:
//!
//! - [`validate_message`] grades one parsed message against the
//!   structural profile (segment presence/order, field grammars);
//! - [`check_transition`] decides whether an admission event legally
//!   follows the previous one for an encounter;
//! - [`validate_scenario`] replays an ordered transcript, threading the
//!   workflow state across messages and layering coherence checks.
//!
//! Malformed input is never an error at this layer; it is the finding.
//! Reports serialize with `serde`; writing them anywhere is the
//! caller's business.

pub mod checks;
mod message;
mod scenario;
mod workflow;

pub use message::validate_message;
pub use scenario::validate_scenario;
pub use workflow::{TransitionVerdict, TransitionViolation, WorkflowState, check_transition};
