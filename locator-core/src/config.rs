//! Logic-level tunables
//!
//! Constants the state machine and measurement law depend on. Hardware and
//! network timings live with the firmware crate.

use embassy_time::Duration;

/// Distance below which an obstacle alert is triggered
pub const PROXIMITY_THRESHOLD_CM: f32 = 50.0;

/// Maximum wait for the echo pulse (30ms ≈ 5m round trip at 343 m/s)
pub const ECHO_TIMEOUT: Duration = Duration::from_micros(30_000);

/// How long a remote find request stays armed without a `/stop`
pub const FIND_WINDOW: Duration = Duration::from_secs(30);
