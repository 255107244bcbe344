//! # Event contract: topic keys, the [`Event`] trait, and [`Envelope`].
//!
//! An event is an immutable `(key, payload)` pair. The hub routes on the
//! [`EventKey`] alone and never inspects payloads; consumers downcast the
//! payload via [`Event::payload`].
//!
//! ## Example
//! ```rust
//! use priobus::{Envelope, Event, EventKey};
//!
//! let ev = Envelope::new("user.created", 42u32);
//! assert_eq!(ev.key(), &EventKey::from("user.created"));
//! assert_eq!(ev.payload().downcast_ref::<u32>(), Some(&42));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque topic identifier.
///
/// Keys partition events and subscribers into independent delivery groups.
/// Equality is exact-match; there is no hierarchy and no wildcard matching.
/// Cheap to clone (`Arc<str>` internally).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey(Arc<str>);

impl EventKey {
    /// Creates a key from anything convertible to `Arc<str>`.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventKey {
    fn from(key: &str) -> Self {
        Self(Arc::from(key))
    }
}

impl From<String> for EventKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// # Typed event routed by the hub.
///
/// Implementors expose a topic [`key`](Event::key) and an opaque
/// [`payload`](Event::payload). The hub only reads the key; payloads pass
/// through untouched and are downcast by the receiving subscriber.
///
/// Most callers use the ready-made [`Envelope`] instead of implementing
/// this trait directly.
pub trait Event: Send + Sync + 'static {
    /// Returns the topic key this event is published under.
    fn key(&self) -> &EventKey;

    /// Returns the payload as an opaque `Any` for subscriber-side downcasting.
    fn payload(&self) -> &dyn Any;
}

/// Shared handle to an event (`Arc<dyn Event>`).
///
/// Events travel through the hub as this type: the async queue and the
/// concurrent fan-out tasks all hold clones of one allocation.
pub type EventRef = Arc<dyn Event>;

/// Ready-made `(key, payload)` event.
///
/// Wraps any `Send + Sync + 'static` payload. Use [`Envelope::arc`] when you
/// immediately need an [`EventRef`] for dispatch.
///
/// ## Example
/// ```rust
/// use priobus::{Envelope, Event, EventRef};
///
/// let ev: EventRef = Envelope::arc("metrics.flush", String::from("hourly"));
/// assert_eq!(ev.key().as_str(), "metrics.flush");
/// ```
#[derive(Debug)]
pub struct Envelope<T> {
    key: EventKey,
    payload: T,
}

impl<T: Send + Sync + 'static> Envelope<T> {
    /// Creates a new envelope for the given topic key.
    pub fn new(key: impl Into<EventKey>, payload: T) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }

    /// Creates the envelope and returns it as a shared handle.
    pub fn arc(key: impl Into<EventKey>, payload: T) -> Arc<Self> {
        Arc::new(Self::new(key, payload))
    }
}

impl<T: Send + Sync + 'static> Event for Envelope<T> {
    fn key(&self) -> &EventKey {
        &self.key
    }

    fn payload(&self) -> &dyn Any {
        &self.payload
    }
}
