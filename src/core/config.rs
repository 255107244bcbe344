//! # Hub configuration.
//!
//! Provides [`HubConfig`], the settings consumed by
//! [`HubBuilder::build`](crate::HubBuilder::build).
//!
//! ## Sentinel values
//! - `queue_capacity` is clamped to a minimum of 1 by the builder.

/// Configuration for the event hub.
///
/// ## Field semantics
/// - `queue_capacity`: size of the bounded asynchronous dispatch queue.
///   When the queue is full, `dispatch_async` blocks the producer until the
///   background worker frees a slot (backpressure, not loss). Minimum 1.
///
/// All fields are public for flexibility; prefer the clamp accessor over
/// repeating sentinel checks.
#[derive(Clone, Debug)]
pub struct HubConfig {
    /// Capacity of the asynchronous dispatch queue.
    pub queue_capacity: usize,
}

impl HubConfig {
    /// Returns the queue capacity clamped to a minimum of 1.
    ///
    /// The builder uses this value to avoid constructing an invalid channel.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for HubConfig {
    /// Default configuration:
    ///
    /// - `queue_capacity = 1024` (good baseline)
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_clamps_to_one() {
        let cfg = HubConfig { queue_capacity: 0 };
        assert_eq!(cfg.queue_capacity_clamped(), 1);
    }

    #[test]
    fn default_capacity_passes_through() {
        assert_eq!(HubConfig::default().queue_capacity_clamped(), 1024);
    }
}
