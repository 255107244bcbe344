//! Builder wiring for the event hub.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::hub::{spawn_worker, Hub};
use super::registry::Registry;
use crate::core::HubConfig;
use crate::events::EventRef;
use crate::subscribers::{LogSink, SinkRef};

/// Builder for constructing a [`Hub`] with an optional custom error sink.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use priobus::{HubBuilder, HubConfig, LogSink};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let hub = HubBuilder::new(HubConfig::default())
///         .with_sink(Arc::new(LogSink))
///         .build();
///     hub.close().await;
/// }
/// ```
pub struct HubBuilder {
    config: HubConfig,
    sink: Option<SinkRef>,
}

impl HubBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(config: HubConfig) -> Self {
        Self { config, sink: None }
    }

    /// Sets the error sink for asynchronous handler failures.
    ///
    /// Defaults to [`LogSink`] when not set.
    pub fn with_sink(mut self, sink: SinkRef) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the hub and spawns its background worker.
    ///
    /// Initializes an empty registry, the bounded dispatch queue, and
    /// exactly one worker bound to that queue. Must be called within a
    /// tokio runtime.
    pub fn build(self) -> Arc<Hub> {
        let (tx, rx) = mpsc::channel::<EventRef>(self.config.queue_capacity_clamped());
        let registry = Arc::new(Registry::new());
        let closed = CancellationToken::new();
        let sink = self.sink.unwrap_or_else(|| Arc::new(LogSink));

        let worker = spawn_worker(Arc::clone(&registry), sink, rx, closed.clone());

        Arc::new(Hub::new_internal(registry, tx, closed, worker))
    }
}
