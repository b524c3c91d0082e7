//! Error type shared by every stage of the pipeline.

use thiserror::Error;

/// Failures local to a single recompute cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A numeric input is outside the domain the stage accepts.
    #[error("invalid {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A zero-length waveform reached a stage that needs samples.
    #[error("{stage} received an empty waveform")]
    EmptyInput { stage: &'static str },

    /// Cutoff is at or above the Nyquist frequency for the sample rate.
    #[error("cutoff {cutoff_hz} Hz is not below the Nyquist frequency {nyquist_hz} Hz")]
    UnsupportedFilterConfiguration { cutoff_hz: f64, nyquist_hz: f64 },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinities before any arithmetic sees them.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(name, value, "must be finite"))
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid(name, value, "must be greater than zero"))
    }
}
