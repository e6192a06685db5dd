//! Value types shared across the ADT validation workspace: the parsed
//! message tree, the trigger-event enum, and the graded issue/report
//! structures every validator produces.

pub mod error;
pub mod event;
pub mod message;
pub mod report;

pub use error::{PamError, Result};
pub use event::EventCode;
pub use message::{Delimiters, EventDescriptor, Field, FieldValue, Message, Segment};
pub use report::{ConformanceLevel, Issue, MessageReport, ScenarioReport, Severity};
