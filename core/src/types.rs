//! Shared primitive types used across the dashboard core.

/// A two-letter state postal code.
pub type StateCode = String;

/// A stable identifier for a generated record (`s-000042`).
pub type RecordId = String;

/// The canonical dashboard session identifier.
pub type SessionId = String;
