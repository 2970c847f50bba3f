//! Tunable Parameters
//!
//! The firmware's configuration surface in one place. Everything here is a
//! compile-time constant; nothing is runtime-mutable. Behavioral constants
//! shared with the host-testable logic (proximity threshold, echo timeout,
//! find window) live in `locator_core::config`.

use embassy_time::Duration;

/// Settle time with the trigger line low before pulsing
pub const TRIGGER_SETTLE: Duration = Duration::from_micros(2);

/// Width of the trigger pulse
pub const TRIGGER_PULSE: Duration = Duration::from_micros(10);

/// Fixed sleep between control loop iterations
pub const TICK_PERIOD: Duration = Duration::from_millis(200);

/// Socket read/write timeout while servicing one exchange
pub const SOCKET_TIMEOUT: Duration = Duration::from_millis(500);

/// Backoff before re-listening after an accept error
pub const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(200);

/// TCP port the listener accepts on
pub const HTTP_PORT: u16 = 80;

/// Obstacle alert: short rapid chirp, repeating naturally with the tick
pub const OBSTACLE_PULSE: PulseTiming = PulseTiming {
    on: Duration::from_millis(100),
    off: Duration::from_millis(100),
    repeats: 1,
};

/// Find-me alert: longer tone so it is distinguishable from the obstacle
/// chirp by ear
pub const FINDING_PULSE: PulseTiming = PulseTiming {
    on: Duration::from_millis(400),
    off: Duration::from_millis(200),
    repeats: 1,
};

/// One timed on/off alert pattern
#[derive(Debug, Clone, Copy)]
pub struct PulseTiming {
    pub on: Duration,
    pub off: Duration,
    pub repeats: u8,
}

/// Network bring-up strategy selected at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetworkMode {
    /// Join the configured network; falls back to access point on failure
    Station,
    /// Self-hosted WPA2 access point
    AccessPoint,
    /// No radio: sensor/alert-only operation, no listener
    Standalone,
}

/// Bring-up strategy used at boot
pub const NETWORK_MODE: NetworkMode = NetworkMode::AccessPoint;

/// Station credentials
pub const WIFI_SSID: &str = "bot";
pub const WIFI_PASSWORD: &str = "00000000";

/// Access point credentials (WPA2 requires 8+ characters)
pub const AP_SSID: &str = "StickLocator";
pub const AP_PASSWORD: &str = "12345678";

/// Wi-Fi channel used in access point mode
pub const AP_CHANNEL: u8 = 5;

/// Bounded wait for a station join + DHCP lease
pub const STATION_JOIN_TIMEOUT: Duration = Duration::from_secs(10);
