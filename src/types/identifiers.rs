//! Identifier types for the entry queue simulator
//!
//! This module contains the dense index identifiers for people and gates, and the
//! UUID-based identifier that tags a single simulation run.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Internal serial number of a person, a dense index in `0..population_size`
///
/// External serials are 7-digit numbers biased by a fixed offset; use
/// [`SerialNumber::from_external`] to validate and convert them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SerialNumber(pub usize);

impl SerialNumber {
    /// Convert an external serial into an internal one
    ///
    /// Returns `None` when `raw - offset` falls outside `0..population_size`.
    pub fn from_external(raw: i64, offset: u64, population_size: usize) -> Option<Self> {
        let internal = raw.checked_sub(i64::try_from(offset).ok()?)?;
        if internal < 0 {
            return None;
        }
        let index = usize::try_from(internal).ok()?;
        (index < population_size).then_some(Self(index))
    }

    /// The external (offset-biased) serial for this person
    pub fn to_external(self, offset: u64) -> u64 {
        offset + self.0 as u64
    }

    /// The arena index of this person
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SERIAL_{}", self.0)
    }
}

/// Zero-based index of an entry gate
///
/// Displayed 1-based (`Gate 1`, `Gate 2`, ...) since that is what people at the
/// venue read on the signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GateId(pub usize);

impl GateId {
    /// The arena index of this gate
    pub fn index(self) -> usize {
        self.0
    }

    /// The 1-based gate number shown to people
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gate {}", self.number())
    }
}

/// Unique identifier for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUN_{}", self.0.simple())
    }
}

impl Serialize for RunId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("RUN_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for RunId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("RUN_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(RunId(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_from_external_in_range() {
        assert_eq!(SerialNumber::from_external(1_000_005, 1_000_000, 10), Some(SerialNumber(5)));
        assert_eq!(SerialNumber::from_external(1_000_000, 1_000_000, 10), Some(SerialNumber(0)));
        assert_eq!(SerialNumber::from_external(1_000_009, 1_000_000, 10), Some(SerialNumber(9)));
    }

    #[test]
    fn test_serial_from_external_out_of_range() {
        assert_eq!(SerialNumber::from_external(1_000_010, 1_000_000, 10), None);
        assert_eq!(SerialNumber::from_external(999_999, 1_000_000, 10), None);
        assert_eq!(SerialNumber::from_external(5, 1_000_000, 10), None);
        assert_eq!(SerialNumber::from_external(-1, 1_000_000, 10), None);
    }

    #[test]
    fn test_serial_round_trips_through_offset() {
        let serial = SerialNumber(7);
        assert_eq!(serial.to_external(1_000_000), 1_000_007);
        assert_eq!(SerialNumber::from_external(1_000_007, 1_000_000, 10), Some(serial));
    }

    #[test]
    fn test_gate_display_is_one_based() {
        assert_eq!(GateId(0).to_string(), "Gate 1");
        assert_eq!(GateId(1).number(), 2);
    }

    #[test]
    fn test_run_id_serialization() {
        let id = RunId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.contains("RUN_"));
        let back: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
