//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (e.g. [`crate::engine::IntentError`],
//! [`crate::weapon::ReloadError`]) live next to the operations they guard and
//! implement [`GameError`] so drivers can classify them uniformly.
//!
//! Nothing in the core is fatal: precondition failures leave state untouched,
//! bad data is replaced by a safe default with a warning, and invariant
//! violations are clamped at the point of mutation.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request may succeed later or with a different choice.
    ///
    /// Examples: no action points left, empty magazine.
    Recoverable,

    /// The request itself is invalid and should not be retried unchanged.
    ///
    /// Examples: unknown target, redundant stance switch.
    Validation,

    /// Unexpected state inconsistency; indicates a bug in the caller or core.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all tactics-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_is_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Internal.is_recoverable());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
