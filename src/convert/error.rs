use alloc::borrow::Cow;
use core::fmt;

// -----------------------------------------------------------------------------
// ConvertError

/// An error from a value conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No rule is registered for the target type and the source value does
    /// not already have it.
    Unsupported {
        /// The source value's type.
        from: &'static str,
        /// The requested target type.
        to: &'static str,
    },
    /// A rule ran and rejected the source value.
    Invalid {
        /// The requested target type.
        to: &'static str,
        /// What the rule objected to.
        detail: Cow<'static, str>,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Unsupported { from, to } => {
                write!(f, "no conversion from `{from}` to `{to}`")
            }
            ConvertError::Invalid { to, detail } => {
                write!(f, "cannot convert to `{to}`: {detail}")
            }
        }
    }
}

impl core::error::Error for ConvertError {}
