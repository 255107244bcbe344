//! # Subscriber contracts and failure reporting.
//!
//! This module provides the [`Subscribe`] trait, a closure adapter
//! ([`SubscriberFn`]), and the [`ErrorSink`] side channel through which
//! asynchronous handler failures are surfaced.
//!
//! ## Event flow
//! ```text
//! Sync path:
//!   producer ── dispatch_sync(Event) ──► registry lookup ──► handle() in
//!   priority order on the caller's task; first Err halts delivery.
//!
//! Async path:
//!   producer ── dispatch_async(Event) ──► [FIFO queue] ──► worker
//!                                            │
//!                        one spawned task per subscriber (fire-and-forget)
//!                                            │
//!                              handle() ── Err/panic ──► ErrorSink
//! ```

mod log;
mod sink;
mod subscriber;
mod subscriber_fn;

pub use log::LogSink;
pub use sink::{ErrorSink, SinkRef};
pub use subscriber::{Subscribe, SubscriberRef};
pub use subscriber_fn::SubscriberFn;
