//! Application-level orchestration.
//!
//! `session` holds the stage state machine; `controller` runs it as an async
//! task that paces animations and talks to presentation layers over channels.

mod controller;
mod session;

pub(crate) use controller::{run_controller, UiCommand};
