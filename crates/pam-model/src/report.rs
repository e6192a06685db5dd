//! Graded validation issues and the reports that aggregate them.
//!
//! Issues are appended in check order and never reordered; validity and
//! conformance level are derived from the issue list alone, so two runs
//! over the same message produce identical reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How severe a finding is for the receiving system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Non-conformant; the caller should reject or hold the message.
    Error,
    /// Structurally acceptable but risky; accept and flag.
    Warning,
    /// No action implied.
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One validation finding.
///
/// `code` is a stable machine token for the defect (repetition-indexed
/// findings carry a `.n` suffix); `message` is the human-readable
/// explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: String,
    pub message: String,
    pub severity: Severity,
}

impl Issue {
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, Severity::Error)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, Severity::Warning)
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message, Severity::Info)
    }
}

/// Overall grade of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConformanceLevel {
    Ok,
    Warn,
    Fail,
}

impl ConformanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConformanceLevel::Ok => "ok",
            ConformanceLevel::Warn => "warn",
            ConformanceLevel::Fail => "fail",
        }
    }
}

impl fmt::Display for ConformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn level_of(issues: &[Issue]) -> ConformanceLevel {
    if issues.iter().any(|issue| issue.severity == Severity::Error) {
        ConformanceLevel::Fail
    } else if issues.iter().any(|issue| issue.severity == Severity::Warning) {
        ConformanceLevel::Warn
    } else {
        ConformanceLevel::Ok
    }
}

/// Validation outcome for a single message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReport {
    /// Trigger event from the header, when one could be read.
    pub event: Option<String>,
    /// Message code from the header (expected `ADT`).
    pub message_code: Option<String>,
    pub issues: Vec<Issue>,
}

impl MessageReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .count()
    }

    /// A message is valid when no error-severity issue was found.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn level(&self) -> ConformanceLevel {
        level_of(&self.issues)
    }
}

/// Validation outcome for an ordered batch of messages replayed as one
/// encounter lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub messages: Vec<MessageReport>,
    /// Findings from the admission-workflow replay.
    pub workflow_issues: Vec<Issue>,
    /// Cross-message findings: identity, visit and chronology coherence.
    pub coherence_issues: Vec<Issue>,
}

impl ScenarioReport {
    /// A scenario is valid when every message is valid and neither the
    /// workflow nor the coherence pass found an error.
    pub fn is_valid(&self) -> bool {
        self.messages.iter().all(MessageReport::is_valid)
            && level_of(&self.workflow_issues) != ConformanceLevel::Fail
            && level_of(&self.coherence_issues) != ConformanceLevel::Fail
    }

    pub fn level(&self) -> ConformanceLevel {
        if !self.is_valid() {
            return ConformanceLevel::Fail;
        }
        let warned = self
            .messages
            .iter()
            .any(|report| report.level() == ConformanceLevel::Warn)
            || level_of(&self.workflow_issues) == ConformanceLevel::Warn
            || level_of(&self.coherence_issues) == ConformanceLevel::Warn;
        if warned {
            ConformanceLevel::Warn
        } else {
            ConformanceLevel::Ok
        }
    }

    pub fn error_count(&self) -> usize {
        let aggregate = self
            .workflow_issues
            .iter()
            .chain(&self.coherence_issues)
            .filter(|issue| issue.severity == Severity::Error)
            .count();
        aggregate
            + self
                .messages
                .iter()
                .map(MessageReport::error_count)
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_follows_worst_severity() {
        let mut report = MessageReport::default();
        assert_eq!(report.level(), ConformanceLevel::Ok);
        assert!(report.is_valid());

        report.issues.push(Issue::info("X_INFO", "optional present"));
        assert_eq!(report.level(), ConformanceLevel::Ok);

        report.issues.push(Issue::warning("X_WARN", "non-standard"));
        assert_eq!(report.level(), ConformanceLevel::Warn);
        assert!(report.is_valid());

        report.issues.push(Issue::error("X_ERR", "missing segment"));
        assert_eq!(report.level(), ConformanceLevel::Fail);
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn scenario_validity_folds_all_sources() {
        let mut scenario = ScenarioReport::default();
        assert!(scenario.is_valid());
        assert_eq!(scenario.level(), ConformanceLevel::Ok);

        scenario
            .coherence_issues
            .push(Issue::warning("COHERENCE_CHRONOLOGY.2", "out of order"));
        assert!(scenario.is_valid());
        assert_eq!(scenario.level(), ConformanceLevel::Warn);

        scenario
            .workflow_issues
            .push(Issue::error("WORKFLOW_TRANSITION.2", "illegal"));
        assert!(!scenario.is_valid());
        assert_eq!(scenario.level(), ConformanceLevel::Fail);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).expect("serialize severity");
        assert_eq!(json, "\"warning\"");
    }
}
