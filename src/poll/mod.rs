//! Poll-until-ready driver
//!
//! Re-runs a refresh callback on a fixed interval for as long as a watched
//! resource status is `processing`. The returned `PollHandle` stops the
//! driver when cancelled or dropped.

mod driver;

pub use driver::{start_polling, PollConfig, PollHandle, DEFAULT_POLL_INTERVAL};
