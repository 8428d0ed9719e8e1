// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy shared by every quantity and spatial type.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type MathResult<T> = Result<T, MathError>;

/// Coarse classification of a [`MathError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MathErrorKind {
    /// Fixed-point arithmetic left the `i64` range.
    Overflow,
    /// A caller-supplied operand was rejected (non-finite, zero divisor, bad index).
    InvalidArgument,
    /// The operation is undefined for the current value (zero-length normalize,
    /// singular inverse, degenerate camera).
    InvalidState,
}

/// Errors emitted by the kernel.
///
/// Every variant names the operation that failed and the offending values so
/// the message is useful without a backtrace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// The 64-bit fixed-point representation would overflow.
    #[error("overflow in {op}: {detail}")]
    Overflow {
        /// Operation that overflowed, e.g. `Length::checked_add`.
        op: &'static str,
        /// Operands involved.
        detail: String,
    },
    /// An argument was rejected before any state changed.
    #[error("invalid argument to {op}: {detail}")]
    InvalidArgument {
        /// Operation that rejected the argument.
        op: &'static str,
        /// Description of the rejected value.
        detail: String,
    },
    /// The receiver is in a state where the operation is undefined.
    #[error("invalid state for {op}: {detail}")]
    InvalidState {
        /// Operation that was attempted.
        op: &'static str,
        /// Description of the degenerate state.
        detail: String,
    },
}

impl MathError {
    /// Builds an [`MathError::Overflow`].
    pub fn overflow(op: &'static str, detail: impl Into<String>) -> Self {
        Self::Overflow {
            op,
            detail: detail.into(),
        }
    }

    /// Builds an [`MathError::InvalidArgument`].
    pub fn invalid_argument(op: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            op,
            detail: detail.into(),
        }
    }

    /// Builds an [`MathError::InvalidState`].
    pub fn invalid_state(op: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            op,
            detail: detail.into(),
        }
    }

    /// Returns the error classification.
    pub fn kind(&self) -> MathErrorKind {
        match self {
            Self::Overflow { .. } => MathErrorKind::Overflow,
            Self::InvalidArgument { .. } => MathErrorKind::InvalidArgument,
            Self::InvalidState { .. } => MathErrorKind::InvalidState,
        }
    }

    /// Name of the operation that failed.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Overflow { op, .. }
            | Self::InvalidArgument { op, .. }
            | Self::InvalidState { op, .. } => op,
        }
    }
}

/// Rejects NaN and infinities with an [`MathError::InvalidArgument`].
pub(crate) fn ensure_finite(op: &'static str, name: &str, value: f64) -> MathResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::invalid_argument(
            op,
            format!("{name} must be finite, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_operation_and_detail() {
        let err =
            MathError::invalid_argument("Length::checked_div", "cannot divide a Length by zero");
        assert_eq!(
            err.to_string(),
            "invalid argument to Length::checked_div: cannot divide a Length by zero"
        );
        assert_eq!(err.kind(), MathErrorKind::InvalidArgument);
        assert_eq!(err.op(), "Length::checked_div");
    }

    #[test]
    fn ensure_finite_rejects_nan_and_infinity() {
        assert!(ensure_finite("t", "x", 1.0).is_ok());
        assert!(ensure_finite("t", "x", f64::NAN).is_err());
        assert!(ensure_finite("t", "x", f64::NEG_INFINITY).is_err());
    }
}
