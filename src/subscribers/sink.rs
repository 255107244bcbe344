//! # Error sink for asynchronous handler failures.
//!
//! Asynchronous dispatch is fire-and-forget: no caller is waiting on a
//! handler's result, so failures cannot be returned. [`ErrorSink`] is the
//! side channel they are surfaced through instead — the hub reports every
//! handler error and every caught handler panic here, never dropping them
//! silently.
//!
//! The default sink is [`LogSink`](crate::LogSink); inject a custom one via
//! [`HubBuilder::with_sink`](crate::HubBuilder::with_sink) for metrics,
//! alerting, or test capture.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use priobus::{ErrorSink, Event, EventRef, HandlerError};
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl ErrorSink for Metrics {
//!     async fn report(&self, subscriber: &str, event: EventRef, error: HandlerError) {
//!         // increment a counter labelled by error.as_label(), ...
//!         let _ = (subscriber, event.key(), error.as_label());
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::EventRef;

/// Shared handle to an error sink (`Arc<dyn ErrorSink>`).
pub type SinkRef = Arc<dyn ErrorSink>;

/// Consumer of asynchronous handler failures.
///
/// Called from the fire-and-forget fan-out tasks, one call per failure.
/// Implementations should be fast and must not panic; a slow sink delays
/// only the reporting task, not event delivery.
#[async_trait]
pub trait ErrorSink: Send + Sync + 'static {
    /// Reports one handler failure for one event.
    ///
    /// `subscriber` is the failing subscriber's [`name`](crate::Subscribe::name);
    /// `error` is either the returned [`HandlerError`] or a synthesized
    /// [`HandlerError::Panicked`] when the handler panicked.
    async fn report(&self, subscriber: &str, event: EventRef, error: HandlerError);
}
