use thiserror::Error;

/// Failures raised by the scoring core.
///
/// Degenerate numeric conditions (zero scale, zero variance, zero acceleration
/// denominator) never reach this type; they resolve to sentinels where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("dimension mismatch in {context}: expected length {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("missing gradient for component '{0}'")]
    MissingKey(String),
    #[error("unknown component key '{0}'")]
    UnknownKey(String),
    #[error("empty input: {0}")]
    EmptyInput(&'static str),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

pub type ScoringResult<T> = Result<T, ScoringError>;

pub(crate) fn ensure_finite(values: &[f64], context: &'static str) -> ScoringResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ScoringError::NonFinite(context))
    }
}

pub(crate) fn ensure_same_len(
    expected: usize,
    found: usize,
    context: &'static str,
) -> ScoringResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ScoringError::DimensionMismatch {
            context,
            expected,
            found,
        })
    }
}
