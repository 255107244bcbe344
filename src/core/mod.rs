//! Hub core: registry, dispatch, and lifecycle.
//!
//! Internal modules:
//! - [`registry`]: per-key priority buckets with snapshot lookup;
//! - [`hub`]: dispatch entry points and the background worker loop;
//! - [`builder`]: wires registry, queue, worker, and error sink together;
//! - [`config`]: hub settings;
//! - [`instance`]: process-wide accessor with test-only reset.

mod builder;
mod config;
mod hub;
mod instance;
mod registry;

pub use builder::HubBuilder;
pub use config::HubConfig;
pub use hub::Hub;
pub use instance::{instance, reset_instance};
