//! Error types for the Wardsight monitoring pipeline.
//!
//! Estimators themselves are infallible by design: a degenerate or absent
//! input yields a documented neutral result, not an error. Errors exist
//! only at the acquisition and configuration boundaries, where the
//! monitoring loop has to decide between retrying and shutting down.

use thiserror::Error;

/// A specialized `Result` type for monitoring operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Top-level error type for the monitoring pipeline.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MonitorError {
    /// Frame acquisition failed. Terminal for the monitoring loop; the
    /// per-metric estimator state remains valid.
    #[error("Acquisition error: {message}")]
    Acquisition {
        /// Description of the acquisition failure
        message: String,
    },

    /// A capability provider misbehaved for one channel.
    #[error("Provider error on channel '{channel}': {message}")]
    Provider {
        /// The input channel the provider serves
        channel: &'static str,
        /// Description of the provider fault
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Invalid state for the requested operation
    #[error("Invalid state: expected {expected}, found {actual}")]
    InvalidState {
        /// Expected state
        expected: String,
        /// Actual state
        actual: String,
    },
}

impl MonitorError {
    /// Creates a new acquisition error.
    #[must_use]
    pub fn acquisition(message: impl Into<String>) -> Self {
        Self::Acquisition {
            message: message.into(),
        }
    }

    /// Creates a new provider error.
    #[must_use]
    pub fn provider(channel: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            channel,
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new invalid state error.
    #[must_use]
    pub fn invalid_state(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidState {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns `true` if the monitoring loop may continue after this error.
    ///
    /// A provider fault affects a single channel for a single cycle; the
    /// affected estimator falls back to its neutral result. Acquisition
    /// failure means there are no more frames, and configuration or state
    /// errors indicate a caller bug.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Provider { .. } => true,
            Self::Acquisition { .. }
            | Self::Configuration { .. }
            | Self::InvalidState { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_error_display() {
        let err = MonitorError::acquisition("camera disconnected");
        assert!(err.to_string().contains("Acquisition error"));
        assert!(err.to_string().contains("camera disconnected"));
    }

    #[test]
    fn provider_error_is_recoverable() {
        let err = MonitorError::provider("landmarks", "detector returned NaN coordinates");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("landmarks"));
    }

    #[test]
    fn acquisition_error_is_terminal() {
        assert!(!MonitorError::acquisition("end of stream").is_recoverable());
        assert!(!MonitorError::configuration("fps must be positive").is_recoverable());
    }
}
