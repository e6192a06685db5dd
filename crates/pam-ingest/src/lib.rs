//! Tolerant ingestion of raw ADT transcripts: ER7 decomposition into the
//! shared message tree, message-boundary splitting, and the per-message
//! fact extraction scenario replay runs on.

pub mod er7;
pub mod extract;

pub use er7::{parse_message, split_messages};
pub use extract::{ScenarioMessage, extract_scenario_message, parse_dtm};
