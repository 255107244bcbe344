//! Error types used by the priobus hub and subscriber handlers.
//!
//! This module defines two main error enums:
//!
//! - [`HandlerError`] — errors reported by individual subscriber handlers.
//! - [`HubError`] — errors raised by the hub itself (closed lifecycle state,
//!   or a handler failure surfaced through synchronous dispatch).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging
//! and metrics.

use thiserror::Error;

/// # Errors produced by subscriber handlers.
///
/// A handler returns [`HandlerError::Failed`] to report that it could not
/// process an event. [`HandlerError::Panicked`] is synthesized by the async
/// fan-out path when a handler panics; handlers never construct it themselves.
///
/// The hub performs no retries; retry policy, if desired, belongs to the
/// handler implementation.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum HandlerError {
    /// Handler could not process the event.
    #[error("handler failed: {reason}")]
    Failed {
        /// The underlying failure message.
        reason: String,
    },

    /// Handler panicked while processing the event (async fan-out only).
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic payload rendered as a string.
        info: String,
    },
}

impl HandlerError {
    /// Creates a [`HandlerError::Failed`] from any message.
    ///
    /// # Example
    /// ```
    /// use priobus::HandlerError;
    ///
    /// let err = HandlerError::failed("connection refused");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn failed(reason: impl Into<String>) -> Self {
        HandlerError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failed { .. } => "handler_failed",
            HandlerError::Panicked { .. } => "handler_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Failed { reason } => format!("error: {reason}"),
            HandlerError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

/// # Errors produced by the event hub.
///
/// These represent failures of a dispatch call as seen by the producer:
/// either the hub has been closed, or (synchronous dispatch only) a handler
/// reported an error and delivery was halted.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HubError {
    /// Operation attempted after [`Hub::close`](crate::Hub::close).
    ///
    /// Returned instead of blocking forever; the closed state is terminal.
    #[error("event hub is closed")]
    Closed,

    /// A handler failed during synchronous dispatch.
    ///
    /// Delivery stops at the failing handler; subscribers later in the
    /// priority order are not invoked.
    #[error("dispatch halted: {0}")]
    Handler(#[from] HandlerError),
}

impl HubError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use priobus::HubError;
    ///
    /// assert_eq!(HubError::Closed.as_label(), "hub_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::Closed => "hub_closed",
            HubError::Handler(_) => "hub_handler_error",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HubError::Closed => "hub is closed".to_string(),
            HubError::Handler(err) => err.as_message(),
        }
    }

    /// True if the error is a halted synchronous dispatch.
    ///
    /// # Example
    /// ```
    /// use priobus::{HandlerError, HubError};
    ///
    /// let err = HubError::from(HandlerError::failed("boom"));
    /// assert!(err.is_handler_error());
    /// assert!(!HubError::Closed.is_handler_error());
    /// ```
    pub fn is_handler_error(&self) -> bool {
        matches!(self, HubError::Handler(_))
    }
}
