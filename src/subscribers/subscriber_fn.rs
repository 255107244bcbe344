//! # Function-backed subscriber (`SubscriberFn`)
//!
//! [`SubscriberFn`] wraps a closure `F: Fn(EventRef) -> Fut`, producing a
//! fresh future per delivered event. This avoids shared mutable state; if a
//! handler needs state across events, capture an `Arc<...>` explicitly
//! inside the closure.
//!
//! ## Example
//! ```rust
//! use priobus::{Event, EventRef, HandlerError, Subscribe, SubscriberFn, SubscriberRef};
//!
//! let sub: SubscriberRef = SubscriberFn::arc("audit", "user.created", 10, |ev: EventRef| async move {
//!     if ev.payload().downcast_ref::<String>().is_none() {
//!         return Err(HandlerError::failed("unexpected payload type"));
//!     }
//!     Ok(())
//! });
//!
//! assert_eq!(sub.name(), "audit");
//! assert_eq!(sub.priority(), 10);
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::events::{EventKey, EventRef};
use crate::subscribers::Subscribe;

/// Function-backed subscriber implementation.
///
/// Wraps a closure that *creates* a new future per event, pinned to a fixed
/// topic key and priority.
#[derive(Debug)]
pub struct SubscriberFn<F> {
    name: Cow<'static, str>,
    key: EventKey,
    priority: i32,
    f: F,
}

impl<F> SubscriberFn<F> {
    /// Creates a new function-backed subscriber.
    ///
    /// Prefer [`SubscriberFn::arc`] when you immediately need a
    /// [`SubscriberRef`](crate::SubscriberRef).
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        key: impl Into<EventKey>,
        priority: i32,
        f: F,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            priority,
            f,
        }
    }

    /// Creates the subscriber and returns it as a shared handle.
    pub fn arc(
        name: impl Into<Cow<'static, str>>,
        key: impl Into<EventKey>,
        priority: i32,
        f: F,
    ) -> Arc<Self> {
        Arc::new(Self::new(name, key, priority, f))
    }
}

#[async_trait]
impl<F, Fut> Subscribe for SubscriberFn<F>
where
    F: Fn(EventRef) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn key(&self) -> &EventKey {
        &self.key
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: EventRef) -> Result<(), HandlerError> {
        (self.f)(event).await
    }
}
