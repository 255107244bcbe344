//! # Simple logging sink for debugging and demos.
//!
//! [`LogSink`] prints asynchronous handler failures to stderr in a
//! human-readable format. This is primarily useful for development,
//! debugging, and examples; it is also the hub's default sink when none is
//! injected.
//!
//! ## Output format
//! ```text
//! [priobus] [handler_failed] subscriber=audit key=user.created err="error: boom"
//! [priobus] [handler_panicked] subscriber=cache key=user.created err="panic: index out of bounds"
//! ```

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::EventRef;
use crate::subscribers::ErrorSink;

/// Simple stderr logging sink.
///
/// Not intended for production use — implement a custom
/// [`ErrorSink`](crate::ErrorSink) for structured logging or metrics.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl ErrorSink for LogSink {
    async fn report(&self, subscriber: &str, event: EventRef, error: HandlerError) {
        eprintln!(
            "[priobus] [{}] subscriber={} key={} err={:?}",
            error.as_label(),
            subscriber,
            event.key(),
            error.as_message(),
        );
    }
}
