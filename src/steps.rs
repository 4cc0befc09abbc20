//! Canonical step vocabulary for the case-presentation workflow.
//!
//! The six SNAPPS steps form a fixed total order. That ordering is the
//! defining invariant of the engine: a session only ever advances by
//! committing the next step in [`StepKind::SEQUENCE`], never by skipping,
//! repeating, or reordering.
//!
//! # Examples
//!
//! ```rust
//! use caseflow::steps::StepKind;
//!
//! assert_eq!(StepKind::SEQUENCE[0], StepKind::Summarize);
//! assert_eq!(StepKind::Probe.position(), 3);
//! assert_eq!(StepKind::at(5), Some(StepKind::Select));
//! assert_eq!(StepKind::at(6), None);
//!
//! // Wire form is the upper-case string
//! assert_eq!(StepKind::Narrow.encode(), "NARROW");
//! assert_eq!("PLAN".parse::<StepKind>().unwrap(), StepKind::Plan);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the six canonical steps of the case-presentation exercise.
///
/// Serializes to the upper-case wire string (`"SUMMARIZE"`, `"NARROW"`, ...)
/// used by the external interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    /// Summarize the patient history and findings.
    Summarize,
    /// Narrow the differential to the leading possibilities.
    Narrow,
    /// Analyze the differential by comparing and contrasting.
    Analyze,
    /// Probe the preceptor with questions about uncertainties.
    Probe,
    /// Plan management for the patient.
    Plan,
    /// Select a case-related issue for self-directed learning.
    Select,
}

impl StepKind {
    /// Number of steps in a complete session.
    pub const COUNT: usize = 6;

    /// The canonical, non-negotiable step order.
    pub const SEQUENCE: [StepKind; StepKind::COUNT] = [
        StepKind::Summarize,
        StepKind::Narrow,
        StepKind::Analyze,
        StepKind::Probe,
        StepKind::Plan,
        StepKind::Select,
    ];

    /// Zero-based position of this step within [`Self::SEQUENCE`].
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            StepKind::Summarize => 0,
            StepKind::Narrow => 1,
            StepKind::Analyze => 2,
            StepKind::Probe => 3,
            StepKind::Plan => 4,
            StepKind::Select => 5,
        }
    }

    /// The step at the given canonical index, or `None` past the end.
    #[must_use]
    pub fn at(index: usize) -> Option<StepKind> {
        Self::SEQUENCE.get(index).copied()
    }

    /// Stable wire encoding, matching the serde representation.
    #[must_use]
    pub fn encode(self) -> &'static str {
        match self {
            StepKind::Summarize => "SUMMARIZE",
            StepKind::Narrow => "NARROW",
            StepKind::Analyze => "ANALYZE",
            StepKind::Probe => "PROBE",
            StepKind::Plan => "PLAN",
            StepKind::Select => "SELECT",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode())
    }
}

/// Error produced when decoding an unrecognized step string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized step kind: {0}")]
pub struct StepParseError(pub String);

impl FromStr for StepKind {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUMMARIZE" => Ok(StepKind::Summarize),
            "NARROW" => Ok(StepKind::Narrow),
            "ANALYZE" => Ok(StepKind::Analyze),
            "PROBE" => Ok(StepKind::Probe),
            "PLAN" => Ok(StepKind::Plan),
            "SELECT" => Ok(StepKind::Select),
            other => Err(StepParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_positions_agree() {
        for (i, step) in StepKind::SEQUENCE.iter().enumerate() {
            assert_eq!(step.position(), i);
            assert_eq!(StepKind::at(i), Some(*step));
        }
        assert_eq!(StepKind::at(StepKind::COUNT), None);
    }

    #[test]
    fn encode_round_trips_through_parse() {
        for step in StepKind::SEQUENCE {
            assert_eq!(step.encode().parse::<StepKind>(), Ok(step));
        }
        assert!("SHRUG".parse::<StepKind>().is_err());
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&StepKind::Summarize).unwrap();
        assert_eq!(json, "\"SUMMARIZE\"");
        let parsed: StepKind = serde_json::from_str("\"SELECT\"").unwrap();
        assert_eq!(parsed, StepKind::Select);
    }
}
