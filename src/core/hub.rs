//! # Hub: subscription registry, dispatch entry points, and lifecycle.
//!
//! The [`Hub`] owns the registry, the bounded asynchronous dispatch queue,
//! and exactly one background worker draining that queue. Producers choose
//! between two delivery modes per call:
//!
//! ```text
//! dispatch_sync(Event):
//!   caller task ──► lookup(key) ──► handle() ── handle() ── handle()
//!                                   (ascending priority, fail-fast)
//!
//! dispatch_async(Event):
//!   caller task ──► [bounded FIFO queue] ──► worker ──► lookup(key)
//!                                               │
//!                      tokio::spawn per subscriber (fire-and-forget)
//!                                               │
//!                                Err / panic ──► ErrorSink
//! ```
//!
//! ## Ordering guarantees
//! - Synchronous handlers for one dispatch run strictly in priority order on
//!   the caller's task.
//! - Asynchronous events are dequeued strictly FIFO and their handler tasks
//!   are *started* in priority order, but completion order is unspecified
//!   and may interleave across events and subscribers.
//!
//! ## Shutdown
//! `close()` cancels the hub's closed-token; the worker observes it, prints
//! a closure notice, and exits without draining the backlog. New dispatches
//! (sync and async) fail fast with [`HubError::Closed`] — they never hang.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::registry::Registry;
use crate::core::{HubBuilder, HubConfig};
use crate::error::{HandlerError, HubError};
use crate::events::{EventKey, EventRef};
use crate::subscribers::{SinkRef, SubscriberRef};

/// In-process publish/subscribe event hub.
///
/// Created via [`Hub::new`] or [`HubBuilder`]; shared as `Arc<Hub>`.
/// All methods take `&self`; the hub is safe to call from any number of
/// concurrent tasks.
pub struct Hub {
    registry: Arc<Registry>,
    queue: mpsc::Sender<EventRef>,
    closed: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Hub {
    /// Creates a hub with the given configuration and the default
    /// [`LogSink`](crate::LogSink).
    ///
    /// Shorthand for `HubBuilder::new(config).build()`; must be called
    /// within a tokio runtime (the background worker is spawned here).
    pub fn new(config: HubConfig) -> Arc<Self> {
        HubBuilder::new(config).build()
    }

    pub(crate) fn new_internal(
        registry: Arc<Registry>,
        queue: mpsc::Sender<EventRef>,
        closed: CancellationToken,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            registry,
            queue,
            closed,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Registers a subscriber for its topic key.
    ///
    /// Append-only: there is no unsubscribe, and subscribing the same object
    /// twice yields two invocations per dispatch. Safe to call concurrently
    /// with other `subscribe` calls and with dispatch.
    pub async fn subscribe(&self, subscriber: SubscriberRef) {
        self.registry.insert(subscriber).await;
    }

    /// Delivers the event to all subscribers of its key, in ascending
    /// priority order, on the caller's task.
    ///
    /// Stops at the first handler error and returns it (fail-fast);
    /// subscribers later in the order are not invoked. Zero subscribers is
    /// a successful no-op. Fails with [`HubError::Closed`] after
    /// [`close`](Hub::close).
    pub async fn dispatch_sync(&self, event: EventRef) -> Result<(), HubError> {
        if self.closed.is_cancelled() {
            return Err(HubError::Closed);
        }
        let subscribers = self.registry.lookup(event.key()).await;
        for subscriber in subscribers {
            subscriber.handle(Arc::clone(&event)).await?;
        }
        Ok(())
    }

    /// Queues the event for concurrent delivery by the background worker.
    ///
    /// Returns as soon as the event is enqueued; handler failures are
    /// reported to the hub's [`ErrorSink`](crate::ErrorSink), not to the
    /// caller. Blocks only while the bounded queue is full. Fails with
    /// [`HubError::Closed`] after [`close`](Hub::close) — never hangs on a
    /// closed hub.
    pub async fn dispatch_async(&self, event: EventRef) -> Result<(), HubError> {
        if self.closed.is_cancelled() {
            return Err(HubError::Closed);
        }
        // The worker drops its receiver on close; a send that loses that
        // race surfaces as Closed as well.
        self.queue.send(event).await.map_err(|_| HubError::Closed)
    }

    /// True once [`close`](Hub::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Returns the number of subscribers registered for `key`.
    pub async fn subscriber_count(&self, key: &EventKey) -> usize {
        self.registry.subscriber_count(key).await
    }

    /// Returns the sorted list of topic keys with at least one subscriber.
    pub async fn topics(&self) -> Vec<EventKey> {
        self.registry.topics().await
    }

    /// Closes the hub: `running → closed` (terminal).
    ///
    /// Stops the background worker and awaits its termination. Events still
    /// sitting in the queue are dropped, not delivered; subsequent
    /// `dispatch_sync`/`dispatch_async` calls fail with
    /// [`HubError::Closed`]. Idempotent — a second call is a no-op.
    pub async fn close(&self) {
        self.closed.cancel();
        let worker = self.worker.lock().await.take();
        if let Some(handle) = worker {
            let _ = handle.await;
        }
    }
}

/// Spawns the single background worker bound to the queue receiver.
///
/// The worker dequeues strictly FIFO and fans each event out as independent
/// handler tasks. The biased select makes the closed-token win over a ready
/// queue slot, so close stops delivery promptly instead of draining.
pub(crate) fn spawn_worker(
    registry: Arc<Registry>,
    sink: SinkRef,
    mut queue: mpsc::Receiver<EventRef>,
    closed: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = closed.cancelled() => break,
                event = queue.recv() => match event {
                    Some(event) => fan_out(&registry, &sink, event).await,
                    None => break,
                },
            }
        }
        eprintln!("[priobus] event hub closed");
    })
}

/// Starts one fire-and-forget task per subscriber of the event's key.
///
/// Tasks are spawned in priority order but never awaited; failures and
/// caught panics go to the sink.
async fn fan_out(registry: &Registry, sink: &SinkRef, event: EventRef) {
    let subscribers = registry.lookup(event.key()).await;
    for subscriber in subscribers {
        let event = Arc::clone(&event);
        let sink = Arc::clone(sink);
        tokio::spawn(async move {
            let fut = subscriber.handle(Arc::clone(&event));
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => sink.report(subscriber.name(), event, err).await,
                Err(panic) => {
                    let err = HandlerError::Panicked {
                        info: panic_message(panic),
                    };
                    sink.report(subscriber.name(), event, err).await;
                }
            }
        });
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::events::{Envelope, EventRef};
    use crate::subscribers::{ErrorSink, Subscribe, SubscriberFn};

    /// Appends its payload label to a shared buffer; payload is
    /// `(label, delay_ms)` so tests can slow individual events down.
    struct Recorder {
        key: EventKey,
        priority: i32,
        buf: Arc<StdMutex<String>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        fn key(&self) -> &EventKey {
            &self.key
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn name(&self) -> &str {
            "recorder"
        }

        async fn handle(&self, event: EventRef) -> Result<(), HandlerError> {
            let (label, delay_ms) = event
                .payload()
                .downcast_ref::<(&str, u64)>()
                .ok_or_else(|| HandlerError::failed("unexpected payload"))?;
            if *delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
            }
            self.buf.lock().unwrap().push_str(label);
            Ok(())
        }
    }

    fn recorder(key: &str, priority: i32, buf: &Arc<StdMutex<String>>) -> SubscriberRef {
        Arc::new(Recorder {
            key: key.into(),
            priority,
            buf: Arc::clone(buf),
        })
    }

    fn tagged(key: &str, delay_ms: u64, label: &'static str) -> EventRef {
        Envelope::arc(key, (label, delay_ms))
    }

    /// Panics on every event; used to exercise panic isolation.
    struct Crashy {
        key: EventKey,
    }

    #[async_trait]
    impl Subscribe for Crashy {
        fn key(&self) -> &EventKey {
            &self.key
        }

        fn name(&self) -> &str {
            "crashy"
        }

        async fn handle(&self, _event: EventRef) -> Result<(), HandlerError> {
            panic!("kaboom")
        }
    }

    /// Captures sink reports as "subscriber:label" strings.
    struct CollectSink {
        seen: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl ErrorSink for CollectSink {
        async fn report(&self, subscriber: &str, _event: EventRef, error: HandlerError) {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{subscriber}:{}", error.as_label()));
        }
    }

    #[tokio::test]
    async fn sync_dispatch_runs_handlers_in_priority_order() {
        let hub = Hub::new(HubConfig::default());
        let buf = Arc::new(StdMutex::new(String::new()));
        for priority in [1, 2, -1, 0] {
            let buf = Arc::clone(&buf);
            hub.subscribe(SubscriberFn::arc(
                format!("p{priority}"),
                "ordered",
                priority,
                move |_ev: EventRef| {
                    let buf = Arc::clone(&buf);
                    async move {
                        buf.lock().unwrap().push_str(&priority.to_string());
                        Ok::<_, HandlerError>(())
                    }
                },
            ))
            .await;
        }

        // Two dispatches with no intervening subscribes: order is stable.
        hub.dispatch_sync(Envelope::arc("ordered", ()))
            .await
            .expect("dispatch failed");
        hub.dispatch_sync(Envelope::arc("ordered", ()))
            .await
            .expect("dispatch failed");

        assert_eq!(*buf.lock().unwrap(), "-1012-1012");
        hub.close().await;
    }

    #[tokio::test]
    async fn sync_dispatch_same_priority_fires_in_subscription_order() {
        let hub = Hub::new(HubConfig::default());
        let buf = Arc::new(StdMutex::new(String::new()));
        hub.subscribe(recorder("t", 0, &buf)).await;
        hub.subscribe(recorder("t", 0, &buf)).await;

        hub.dispatch_sync(tagged("t", 0, "x"))
            .await
            .expect("dispatch failed");

        assert_eq!(*buf.lock().unwrap(), "xx");
        hub.close().await;
    }

    #[tokio::test]
    async fn sync_dispatch_stops_at_first_handler_error() {
        let hub = Hub::new(HubConfig::default());
        let buf = Arc::new(StdMutex::new(String::new()));

        let ok = |label: &'static str, buf: &Arc<StdMutex<String>>| {
            let buf = Arc::clone(buf);
            move |_ev: EventRef| {
                let buf = Arc::clone(&buf);
                async move {
                    buf.lock().unwrap().push_str(label);
                    Ok::<_, HandlerError>(())
                }
            }
        };
        hub.subscribe(SubscriberFn::arc("a", "t", 0, ok("A", &buf)))
            .await;
        hub.subscribe(SubscriberFn::arc("b", "t", 1, |_ev: EventRef| async {
            Err(HandlerError::failed("boom"))
        }))
        .await;
        hub.subscribe(SubscriberFn::arc("c", "t", 2, ok("C", &buf)))
            .await;

        let err = hub
            .dispatch_sync(Envelope::arc("t", ()))
            .await
            .expect_err("dispatch should halt");

        assert!(matches!(
            err,
            HubError::Handler(HandlerError::Failed { ref reason }) if reason == "boom"
        ));
        // C never ran.
        assert_eq!(*buf.lock().unwrap(), "A");
        hub.close().await;
    }

    #[tokio::test]
    async fn dispatch_without_subscribers_is_a_noop() {
        let hub = Hub::new(HubConfig::default());

        hub.dispatch_sync(Envelope::arc("empty", ()))
            .await
            .expect("sync no-op failed");
        hub.dispatch_async(Envelope::arc("empty", ()))
            .await
            .expect("async no-op failed");

        tokio::time::sleep(Duration::from_millis(20)).await;
        hub.close().await;
    }

    #[tokio::test]
    async fn async_dispatch_dequeues_fifo_but_completes_out_of_order() {
        let hub = Hub::new(HubConfig::default());
        let buf = Arc::new(StdMutex::new(String::new()));
        hub.subscribe(recorder("t", 0, &buf)).await;

        // A is dequeued and started first but sleeps; B finishes first.
        hub.dispatch_async(tagged("t", 100, "A"))
            .await
            .expect("dispatch failed");
        hub.dispatch_async(tagged("t", 0, "B"))
            .await
            .expect("dispatch failed");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*buf.lock().unwrap(), "BA");
        hub.close().await;
    }

    #[tokio::test]
    async fn async_handler_errors_reach_the_sink() {
        let sink = Arc::new(CollectSink {
            seen: StdMutex::new(Vec::new()),
        });
        let hub = HubBuilder::new(HubConfig::default())
            .with_sink(Arc::clone(&sink) as SinkRef)
            .build();
        hub.subscribe(SubscriberFn::arc("flaky", "t", 0, |_ev: EventRef| async {
            Err(HandlerError::failed("boom"))
        }))
        .await;

        hub.dispatch_async(Envelope::arc("t", ()))
            .await
            .expect("dispatch failed");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*sink.seen.lock().unwrap(), vec!["flaky:handler_failed"]);
        hub.close().await;
    }

    #[tokio::test]
    async fn async_handler_panics_reach_the_sink() {
        let sink = Arc::new(CollectSink {
            seen: StdMutex::new(Vec::new()),
        });
        let hub = HubBuilder::new(HubConfig::default())
            .with_sink(Arc::clone(&sink) as SinkRef)
            .build();
        hub.subscribe(Arc::new(Crashy { key: "t".into() })).await;

        hub.dispatch_async(Envelope::arc("t", ()))
            .await
            .expect("dispatch failed");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*sink.seen.lock().unwrap(), vec!["crashy:handler_panicked"]);
        hub.close().await;
    }

    #[tokio::test]
    async fn close_terminates_worker_and_rejects_dispatch() {
        let hub = Hub::new(HubConfig::default());
        let buf = Arc::new(StdMutex::new(String::new()));
        hub.subscribe(recorder("t", 0, &buf)).await;

        hub.close().await;
        assert!(hub.is_closed());

        let err = hub
            .dispatch_async(tagged("t", 0, "x"))
            .await
            .expect_err("closed hub must reject async dispatch");
        assert!(matches!(err, HubError::Closed));

        let err = hub
            .dispatch_sync(tagged("t", 0, "y"))
            .await
            .expect_err("closed hub must reject sync dispatch");
        assert!(matches!(err, HubError::Closed));

        // Worker is gone; nothing was ever delivered.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*buf.lock().unwrap(), "");

        // Idempotent.
        hub.close().await;
    }

    #[tokio::test]
    async fn subscriber_count_and_topics_reflect_registrations() {
        let hub = Hub::new(HubConfig::default());
        let buf = Arc::new(StdMutex::new(String::new()));
        hub.subscribe(recorder("orders", 0, &buf)).await;
        hub.subscribe(recorder("orders", 1, &buf)).await;
        hub.subscribe(recorder("billing", 0, &buf)).await;

        assert_eq!(hub.subscriber_count(&"orders".into()).await, 2);
        assert_eq!(
            hub.topics().await,
            vec![EventKey::from("billing"), EventKey::from("orders")]
        );
        hub.close().await;
    }
}
