//! # Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for plugging event handlers into the
//! hub. A subscriber is bound to exactly one topic key at registration time
//! and carries an integer priority; lower priorities run first, insertion
//! order breaks ties within a priority.
//!
//! ## Rules
//! - One subscriber object registers under one `(key, priority)` bucket;
//!   register a new object to listen on a different key.
//! - Synchronous dispatch awaits `handle` in priority order and halts at the
//!   first error (fail-fast).
//! - Asynchronous dispatch runs `handle` as an independent fire-and-forget
//!   task; errors go to the hub's [`ErrorSink`](crate::ErrorSink).
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use priobus::{Event, EventKey, EventRef, HandlerError, Subscribe};
//!
//! struct Audit {
//!     key: EventKey,
//! }
//!
//! #[async_trait]
//! impl Subscribe for Audit {
//!     fn key(&self) -> &EventKey {
//!         &self.key
//!     }
//!
//!     fn priority(&self) -> i32 {
//!         10
//!     }
//!
//!     async fn handle(&self, event: EventRef) -> Result<(), HandlerError> {
//!         // record event.key(), downcast event.payload(), ...
//!         let _ = event.key();
//!         Ok(())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{EventKey, EventRef};

/// Shared handle to a subscriber (`Arc<dyn Subscribe>`).
pub type SubscriberRef = Arc<dyn Subscribe>;

/// # Prioritized handler for one topic key.
///
/// Registered via [`Hub::subscribe`](crate::Hub::subscribe); invoked for
/// every event dispatched under [`key`](Subscribe::key). The hub never
/// unregisters subscribers; they live as long as the hub does.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - A handler that never returns stalls synchronous dispatch for its
///   callers; that is a handler defect, the hub adds no timeout.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Returns the topic key this subscriber listens on.
    fn key(&self) -> &EventKey;

    /// Returns the delivery priority; lower values run first.
    ///
    /// Subscribers sharing a priority fire in subscription order.
    ///
    /// Default: 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns the subscriber name used in sink reports and logs.
    ///
    /// Prefer short, descriptive names (e.g., "audit", "metrics", "cache").
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Processes a single event.
    ///
    /// In synchronous dispatch the returned error halts delivery and is
    /// surfaced to the producer. In asynchronous dispatch it is reported to
    /// the hub's error sink and other subscribers are unaffected.
    async fn handle(&self, event: EventRef) -> Result<(), HandlerError>;
}
