//! Common error infrastructure for delve-core.
//!
//! Domain-specific errors (e.g. `ActionError`, `EngineError`) are defined in
//! their respective modules alongside the code they guard. This module only
//! provides the shared classification used to decide how a failure is handled.
//!
//! # Design Principles
//!
//! - **Type Safety**: each layer has its own error enum with specific variants
//! - **Severity Classification**: `Impossible` failures are part of normal play
//!   and are surfaced to the player; everything else is a bug and propagates

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The command cannot be performed right now; no state was changed.
    ///
    /// Examples: destination blocked, nothing to pick up, already at full health
    Impossible,

    /// Unexpected state inconsistency.
    ///
    /// Examples: command references a missing actor, actor lacks a required component.
    /// These indicate bugs and should be investigated.
    Internal,

    /// Engine cannot continue.
    ///
    /// Examples: a required oracle was not provided
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Impossible => "impossible",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the failure is an expected, recoverable game condition.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Impossible)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all delve-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for logging and for asserting on failures in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
