//! Alert State Machine
//!
//! Holds the locator's alert mode and the remote find-request state, plus
//! the per-tick decision function that arbitrates between them.
//!
//! # Ownership
//! `FindRequestState` is owned by the control loop task and mutated only
//! there. The listener never touches it; it queues a [`Command`] that the
//! loop drains and applies on its own thread of control.
//!
//! # Precedence
//! Obstacle proximity is a safety signal and always wins over an active
//! find request. Find mode only fires while armed and unexpired; everything
//! else is idle.

use crate::config::{FIND_WINDOW, PROXIMITY_THRESHOLD_CM};
use crate::http::Command;
use crate::sample::DistanceSample;
use defmt::Format;
use embassy_time::Instant;

/// Alert mode active for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Format)]
pub enum AlertMode {
    /// Outputs silent
    Idle,
    /// Valid distance sample below the proximity threshold
    ObstacleNear,
    /// Remote find request armed and unexpired
    Finding,
}

/// Remote find-request state, armed by `/find` and cleared by `/stop` or
/// expiry of the find window
#[derive(Debug, Clone, Copy, Format)]
pub struct FindRequestState {
    active: bool,
    armed_at: Instant,
}

impl FindRequestState {
    /// Initial state: not armed
    pub const fn new() -> Self {
        Self {
            active: false,
            armed_at: Instant::from_ticks(0),
        }
    }

    /// Arms (or re-arms) the request. Re-arming replaces `armed_at`, so
    /// only the latest request governs expiry.
    pub fn arm(&mut self, now: Instant) {
        self.active = true;
        self.armed_at = now;
    }

    /// Explicit clear, as done by `/stop`
    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Whether the request is armed and still inside the find window
    pub fn is_active(&self, now: Instant) -> bool {
        self.active && now.saturating_duration_since(self.armed_at) < FIND_WINDOW
    }

    /// Drops an armed request whose window has elapsed
    pub fn clear_if_expired(&mut self, now: Instant) {
        if self.active && !self.is_active(now) {
            self.active = false;
        }
    }

    /// Raw armed flag, for the `/status` payload
    pub fn is_armed(&self) -> bool {
        self.active
    }
}

/// Decides the alert mode for one tick.
///
/// Evaluated once per tick after the distance measurement, before any
/// alert output is driven.
pub fn decide_mode(sample: DistanceSample, find: &FindRequestState, now: Instant) -> AlertMode {
    if let DistanceSample::Centimeters(distance) = sample {
        if distance < PROXIMITY_THRESHOLD_CM {
            return AlertMode::ObstacleNear;
        }
    }
    if find.is_active(now) {
        AlertMode::Finding
    } else {
        AlertMode::Idle
    }
}

/// Applies one queued listener command to the find state.
///
/// Commands are queued by the listener and drained by the control loop
/// once per tick, so several may be applied back to back; each is applied
/// with the drain time as `now`. Returns whether the outputs must be
/// silenced immediately (`/stop` demands it regardless of mode).
pub fn apply_command(find: &mut FindRequestState, command: Command, now: Instant) -> bool {
    match command {
        Command::ArmFind => {
            find.arm(now);
            false
        }
        Command::StopFind => {
            find.clear();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_time::Duration;

    fn at(secs: u64) -> Instant {
        Instant::from_secs(secs)
    }

    #[test]
    fn obstacle_wins_over_active_find() {
        let mut find = FindRequestState::new();
        find.arm(at(10));
        let mode = decide_mode(DistanceSample::Centimeters(30.0), &find, at(11));
        assert_eq!(mode, AlertMode::ObstacleNear);
    }

    #[test]
    fn clear_path_with_active_find_is_finding() {
        let mut find = FindRequestState::new();
        find.arm(at(10));
        let mode = decide_mode(DistanceSample::Centimeters(200.0), &find, at(11));
        assert_eq!(mode, AlertMode::Finding);
    }

    #[test]
    fn no_echo_with_active_find_is_finding() {
        let mut find = FindRequestState::new();
        find.arm(at(10));
        assert_eq!(
            decide_mode(DistanceSample::NoEcho, &find, at(11)),
            AlertMode::Finding
        );
    }

    #[test]
    fn find_expires_after_window() {
        let mut find = FindRequestState::new();
        find.arm(at(100));
        assert!(find.is_active(at(100) + Duration::from_secs(29)));
        let later = at(100) + Duration::from_secs(31);
        assert!(!find.is_active(later));
        assert_eq!(
            decide_mode(DistanceSample::Centimeters(200.0), &find, later),
            AlertMode::Idle
        );
        find.clear_if_expired(later);
        assert!(!find.is_armed());
    }

    #[test]
    fn rearm_replaces_armed_at() {
        let mut find = FindRequestState::new();
        find.arm(at(100));
        find.arm(at(120));
        // 25s after the second arm, 45s after the first: still active, so
        // only the latest arm governs expiry.
        assert!(find.is_active(at(145)));
        assert!(!find.is_active(at(151)));
    }

    #[test]
    fn stop_clears_regardless_of_window() {
        let mut find = FindRequestState::new();
        find.arm(at(100));
        find.clear();
        assert!(!find.is_armed());
        assert!(!find.is_active(at(101)));
    }

    #[test]
    fn idle_without_find() {
        let find = FindRequestState::new();
        assert_eq!(
            decide_mode(DistanceSample::Centimeters(200.0), &find, at(1)),
            AlertMode::Idle
        );
        assert_eq!(
            decide_mode(DistanceSample::NoEcho, &find, at(1)),
            AlertMode::Idle
        );
    }

    #[test]
    fn zero_distance_is_an_obstacle_not_unknown() {
        let find = FindRequestState::new();
        assert_eq!(
            decide_mode(DistanceSample::Centimeters(0.0), &find, at(1)),
            AlertMode::ObstacleNear
        );
    }

    #[test]
    fn stop_command_demands_silence() {
        let mut find = FindRequestState::new();
        find.arm(at(10));
        assert!(apply_command(&mut find, Command::StopFind, at(11)));
        assert!(!find.is_armed());
    }

    #[test]
    fn commands_queued_during_a_busy_tick_apply_in_order() {
        // The listener queues commands while the loop is mid-tick; the
        // drain applies them back to back with the drain time as now.
        let mut find = FindRequestState::new();
        let drain = at(50);
        assert!(!apply_command(&mut find, Command::ArmFind, drain));
        assert!(apply_command(&mut find, Command::StopFind, drain));
        assert!(!find.is_active(drain));

        // Arriving in the other order leaves find armed from the drain
        // time, not from when the requests were sent.
        assert!(apply_command(&mut find, Command::StopFind, drain));
        assert!(!apply_command(&mut find, Command::ArmFind, drain));
        assert!(find.is_active(drain + Duration::from_secs(29)));
        assert!(!find.is_active(drain + Duration::from_secs(31)));
    }
}
