//! Error types and handling
//!
//! This module contains the error types for the simulation, the admission desk
//! and person status transitions.

use thiserror::Error;

use crate::types::{ConfigError, ConfigValidationError, GateId, SerialNumber};

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// The admission worker could not be started or stopped cleanly
    #[error("Admission worker error: {0}")]
    WorkerError(String),

    /// Gate index outside the configured gates
    #[error("Unknown gate: {0}")]
    UnknownGate(GateId),

    /// A person status invariant was broken
    #[error("Invariant violation: {0}")]
    InvariantViolation(#[from] PersonTransitionError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigError> for SimulationError {
    fn from(error: ConfigError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a worker error
    pub fn worker_error(msg: impl Into<String>) -> Self {
        Self::WorkerError(msg.into())
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::WorkerError(_) => false,
            SimulationError::UnknownGate(_) => false,
            SimulationError::InvariantViolation(_) => false,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::WorkerError(_) => "Admission Worker",
            SimulationError::UnknownGate(_) => "Gate",
            SimulationError::InvariantViolation(_) => "Invariant",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

/// A person status transition that would break the record's invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonTransitionError {
    /// Serial outside the population
    #[error("{0} is not part of the population")]
    UnknownSerial(SerialNumber),

    /// The person is already inside
    #[error("{0} has already entered")]
    AlreadyEntered(SerialNumber),

    /// The person is already waiting somewhere
    #[error("{serial} is already queued at {gate}")]
    AlreadyQueued {
        /// Person involved
        serial: SerialNumber,
        /// Gate currently holding the person
        gate: GateId,
    },

    /// Entry requested for someone not in any queue
    #[error("{0} was admitted without being queued")]
    NotQueued(SerialNumber),

    /// Popped from a gate other than the one on record
    #[error("{serial} was popped from {actual} but is recorded at {expected}")]
    GateMismatch {
        /// Person involved
        serial: SerialNumber,
        /// Gate on record
        expected: GateId,
        /// Gate the person was popped from
        actual: GateId,
    },
}

/// Reasons a serial is turned away at the admission desk
///
/// None of these change any state; the desk reports them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// Input was not a number
    #[error("Malformed serial number: {0:?}")]
    Malformed(String),

    /// Number outside the accepted serial range
    #[error("Invalid serial number {input} (expected {min}..={max})")]
    OutOfRange {
        /// The number as entered
        input: i64,
        /// Smallest accepted external serial
        min: u64,
        /// Largest accepted external serial
        max: u64,
    },

    /// Re-entry attempt
    #[error("{0} has already entered. Re-entry not allowed")]
    AlreadyEntered(SerialNumber),

    /// Already waiting in a queue; switching gates is not supported
    #[error("{serial} is already queued at {gate}")]
    AlreadyQueued {
        /// Person involved
        serial: SerialNumber,
        /// Gate currently holding the person
        gate: GateId,
    },

    /// Shared state rejected a transition the desk had already checked
    #[error("Admission failed: {0}")]
    Internal(String),
}

impl From<PersonTransitionError> for AdmissionError {
    fn from(error: PersonTransitionError) -> Self {
        match error {
            PersonTransitionError::AlreadyEntered(serial) => AdmissionError::AlreadyEntered(serial),
            PersonTransitionError::AlreadyQueued { serial, gate } => {
                AdmissionError::AlreadyQueued { serial, gate }
            }
            other => AdmissionError::Internal(other.to_string()),
        }
    }
}

impl From<SimulationError> for AdmissionError {
    fn from(error: SimulationError) -> Self {
        AdmissionError::Internal(error.to_string())
    }
}

impl AdmissionError {
    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AdmissionError::Internal(_))
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            AdmissionError::Malformed(_) | AdmissionError::OutOfRange { .. } => "Invalid Serial",
            AdmissionError::AlreadyEntered(_) => "Re-entry",
            AdmissionError::AlreadyQueued { .. } => "Duplicate Queue",
            AdmissionError::Internal(_) => "Internal",
        }
    }
}
