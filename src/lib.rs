//! Diagnostic visualization client for the rewind viewer.
//!
//! Opens one TCP connection to a locally running viewer and streams drawing
//! commands describing an evolving battlefield state. Commands are grouped
//! into frames by an explicit end-of-frame sentinel; the wire model itself
//! lives in the `commands` crate. The protocol is write-only and fully
//! synchronous — every primitive flushes before returning, and stream order
//! is the only ordering the viewer sees.

pub mod client;
pub mod demo;

pub use client::{ClientError, DEFAULT_HOST, DEFAULT_PORT, RewindClient};
