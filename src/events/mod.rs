//! Event contracts: topic keys, the [`Event`] trait, and the ready-made
//! [`Envelope`] implementation.

mod event;

pub use event::{Envelope, Event, EventKey, EventRef};
