//! # Process-wide hub accessor.
//!
//! [`instance`] lazily creates one default-configured [`Hub`] on first use
//! and returns the same handle thereafter. [`reset_instance`] (test-only
//! plumbing) discards the stored reference so the next access builds a
//! fresh hub.
//!
//! The singleton holds no logic of its own; route all process-wide access
//! through these functions so tests can reset deterministically instead of
//! mutating ambient globals.

use std::sync::{Arc, Mutex, PoisonError};

use super::hub::Hub;
use crate::core::HubConfig;

static INSTANCE: Mutex<Option<Arc<Hub>>> = Mutex::new(None);

/// Returns the process-wide hub, creating it on first access.
///
/// The hub is built with [`HubConfig::default`] and the default
/// [`LogSink`](crate::LogSink); first access must happen within a tokio
/// runtime (the background worker is spawned then).
pub fn instance() -> Arc<Hub> {
    let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
    match slot.as_ref() {
        Some(hub) => Arc::clone(hub),
        None => {
            let hub = Hub::new(HubConfig::default());
            *slot = Some(Arc::clone(&hub));
            hub
        }
    }
}

/// Discards the stored hub reference (test-only).
///
/// Does not close the previous hub; callers that own other handles to it
/// should [`close`](Hub::close) it themselves. The next [`instance`] call
/// creates a fresh hub.
pub fn reset_instance() {
    let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}
