//! # priobus
//!
//! **Priobus** is an in-process publish/subscribe event hub for Rust.
//!
//! Producers emit typed events under a topic key; subscribers register for
//! one key with an integer priority and receive callbacks in ascending
//! priority order (insertion order breaks ties). There is no network, no
//! persistence, and no cross-process concern — the hub exists to decouple
//! components within one running process.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Producer   │   │   Producer   │   │   Producer   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ dispatch_sync    │ dispatch_async   │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Hub                                                              │
//! │  - Registry (per-key priority buckets, write-locked mutation)     │
//! │  - bounded FIFO queue + one background worker (async path)        │
//! │  - closed-token (terminal close(), fail-fast afterwards)          │
//! └──────┬────────────────────────────────────┬───────────────────────┘
//!        │ sync: caller's task                │ async: worker
//!        ▼                                    ▼
//!   handle() ─ handle() ─ handle()      ┌───────────────┐
//!   (priority order, fail-fast:         │ tokio::spawn  │ one task per
//!    first Err returned to caller)      │ per subscriber│ handler, never
//!                                       └───────┬───────┘ awaited
//!                                               │
//!                                 Err / panic ──► ErrorSink (LogSink by default)
//! ```
//!
//! ## Delivery guarantees
//! - At most once per currently-registered subscriber per dispatch call.
//! - Synchronous dispatch: strict priority order on the caller's task,
//!   halted at the first handler error.
//! - Asynchronous dispatch: events enter processing strictly FIFO; handler
//!   completion order is unspecified and may interleave.
//! - Zero subscribers for a key is a successful no-op in both modes.
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits            |
//! |-----------------|----------------------------------------------------------|-------------------------------|
//! | **Events**      | Typed `(key, payload)` pairs, payload opaque to the hub. | [`Event`], [`Envelope`], [`EventKey`] |
//! | **Subscribers** | Prioritized handlers for one key.                        | [`Subscribe`], [`SubscriberFn`] |
//! | **Dispatch**    | Blocking fail-fast, or queued concurrent fan-out.        | [`Hub`]                       |
//! | **Failures**    | Typed errors; async failures surface via a sink.         | [`HubError`], [`HandlerError`], [`ErrorSink`] |
//! | **Lifecycle**   | Explicit close; process-wide accessor for wiring.        | [`Hub::close`], [`instance`]  |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use priobus::{Envelope, Event, EventRef, HandlerError, Hub, HubConfig, SubscriberFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hub = Hub::new(HubConfig::default());
//!
//!     // Runs first (priority 0), sees the typed payload.
//!     hub.subscribe(SubscriberFn::arc("greeter", "user.created", 0, |ev: EventRef| async move {
//!         let name = ev
//!             .payload()
//!             .downcast_ref::<String>()
//!             .ok_or_else(|| HandlerError::failed("unexpected payload"))?;
//!         println!("welcome, {name}");
//!         Ok(())
//!     }))
//!     .await;
//!
//!     // Blocking, ordered, fail-fast delivery:
//!     hub.dispatch_sync(Envelope::arc("user.created", String::from("ada")))
//!         .await?;
//!
//!     // Queued, concurrent delivery (failures go to the error sink):
//!     hub.dispatch_async(Envelope::arc("user.created", String::from("grace")))
//!         .await?;
//!
//!     hub.close().await;
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use core::{instance, reset_instance, Hub, HubBuilder, HubConfig};
pub use error::{HandlerError, HubError};
pub use events::{Envelope, Event, EventKey, EventRef};
pub use subscribers::{ErrorSink, LogSink, SinkRef, Subscribe, SubscriberFn, SubscriberRef};
