//! Synchronous, priority-ordered dispatch.
//!
//! Three subscribers on one key fire lowest-priority-first; a failing
//! handler halts delivery and surfaces its error to the producer.
//!
//! Run with: `cargo run --example priority_sync`

use priobus::{Envelope, Event, EventRef, HandlerError, Hub, HubConfig, SubscriberFn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let hub = Hub::new(HubConfig::default());

    for (name, priority) in [("validate", -10), ("persist", 0), ("notify", 10)] {
        hub.subscribe(SubscriberFn::arc(
            name,
            "order.placed",
            priority,
            move |ev: EventRef| async move {
                let order = ev
                    .payload()
                    .downcast_ref::<String>()
                    .ok_or_else(|| HandlerError::failed("unexpected payload"))?;
                println!("[{name}] (priority {priority}) handling order {order}");
                Ok(())
            },
        ))
        .await;
    }

    hub.dispatch_sync(Envelope::arc("order.placed", String::from("#4711")))
        .await?;

    // A failure at priority 0 stops `notify` from ever running.
    hub.subscribe(SubscriberFn::arc(
        "audit",
        "order.cancelled",
        0,
        |_ev: EventRef| async { Err(HandlerError::failed("audit store unreachable")) },
    ))
    .await;

    let err = hub
        .dispatch_sync(Envelope::arc("order.cancelled", String::from("#4711")))
        .await
        .expect_err("audit failure should halt dispatch");
    println!("dispatch halted: {err}");

    hub.close().await;
    Ok(())
}
