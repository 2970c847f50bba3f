//! Shared Status Snapshot
//!
//! The control loop publishes its latest reading and find state here each
//! tick; the listener task reads it when answering `/status` and the page.
//! The loop is the only writer.

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};
use locator_core::http::StatusView;
use locator_core::sample::DistanceSample;

/// Last published device status
pub static STATUS: Mutex<CriticalSectionRawMutex, StatusView> = Mutex::new(StatusView {
    sample: DistanceSample::NoEcho,
    finding: false,
});
