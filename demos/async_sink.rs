//! Asynchronous dispatch with a custom error sink.
//!
//! Events enter the queue FIFO; handlers run as independent tasks, so a
//! slow handler does not delay later events. Failures never reach the
//! producer — they are reported to the injected sink instead.
//!
//! Run with: `cargo run --example async_sink`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use priobus::{
    Envelope, Event, EventRef, ErrorSink, HandlerError, HubBuilder, HubConfig, SubscriberFn,
};

struct StderrSink;

#[async_trait]
impl ErrorSink for StderrSink {
    async fn report(&self, subscriber: &str, event: EventRef, error: HandlerError) {
        eprintln!(
            "async failure: subscriber={subscriber} key={} error={error}",
            event.key()
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let hub = HubBuilder::new(HubConfig { queue_capacity: 64 })
        .with_sink(Arc::new(StderrSink))
        .build();

    hub.subscribe(SubscriberFn::arc(
        "slow-indexer",
        "doc.saved",
        0,
        |ev: EventRef| async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            println!("indexed {}", ev.key());
            Ok::<_, HandlerError>(())
        },
    ))
    .await;

    hub.subscribe(SubscriberFn::arc(
        "flaky-webhook",
        "doc.saved",
        10,
        |_ev: EventRef| async { Err(HandlerError::failed("upstream 503")) },
    ))
    .await;

    for i in 0..3 {
        hub.dispatch_async(Envelope::arc("doc.saved", i)).await?;
    }

    // Give the fire-and-forget handlers a moment before shutting down.
    tokio::time::sleep(Duration::from_millis(300)).await;
    hub.close().await;
    Ok(())
}
