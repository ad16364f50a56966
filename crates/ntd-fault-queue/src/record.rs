//! Fault records.

use core::fmt;

use ntd_hal::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum FaultKind {
    /// No fault; the state of a freshly created working record. Never queued.
    #[default]
    None,
    /// Something lit that should not have.
    Short,
    /// A commanded node failed to light.
    Open,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::None => write!(f, "NONE"),
            FaultKind::Short => write!(f, "SHORT"),
            FaultKind::Open => write!(f, "OPEN"),
        }
    }
}

/// One finding of the segment test.
///
/// Records are plain values: appending copies them, so a working record
/// can be reused between checks without aliasing anything in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaultRecord {
    /// Fault class.
    pub kind: FaultKind,
    /// Segment under test.
    pub segment: u8,
    /// Node the sequencer was driving when the fault was observed.
    pub commanded: Node,
    /// Node actually detected. Equal to `commanded` for open faults.
    pub observed: Node,
}

impl FaultRecord {
    /// A blank working record for `segment`.
    #[must_use]
    pub const fn working(segment: u8) -> Self {
        Self {
            kind: FaultKind::None,
            segment,
            commanded: Node::Blank,
            observed: Node::Blank,
        }
    }

    /// An open fault: `node` was commanded and did not light.
    #[must_use]
    pub const fn open(segment: u8, node: Node) -> Self {
        Self {
            kind: FaultKind::Open,
            segment,
            commanded: node,
            observed: node,
        }
    }

    /// A short fault: `observed` lit while `commanded` was driven.
    #[must_use]
    pub const fn short(segment: u8, commanded: Node, observed: Node) -> Self {
        Self {
            kind: FaultKind::Short,
            segment,
            commanded,
            observed,
        }
    }

    /// Whether this record describes an actual fault.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        !matches!(self.kind, FaultKind::None)
    }
}

impl Default for FaultRecord {
    fn default() -> Self {
        Self::working(0)
    }
}

impl fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on segment {}: commanded {}, observed {}",
            self.kind, self.segment, self.commanded, self.observed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_record_is_not_a_fault() {
        let rec = FaultRecord::working(3);
        assert!(!rec.is_fault());
        assert_eq!(rec.segment, 3);
        assert_eq!(rec.commanded, Node::Blank);
    }

    #[test]
    fn test_open_mirrors_commanded() {
        let rec = FaultRecord::open(1, Node::HighVoltage);
        assert_eq!(rec.kind, FaultKind::Open);
        assert_eq!(rec.commanded, rec.observed);
    }

    #[test]
    fn test_display() {
        let rec = FaultRecord::short(2, Node::Blank, Node::DecimalPoint);
        assert_eq!(
            rec.to_string(),
            "SHORT on segment 2: commanded BLANK DIGIT, observed DECIMAL POINT"
        );
    }
}
