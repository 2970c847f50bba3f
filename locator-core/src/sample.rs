//! Distance Samples
//!
//! The pulse-width-to-distance law for the ultrasonic rangefinder. Zero is
//! a legitimate close-range reading and must never be conflated with
//! "no echo"; the two are distinct variants.

use crate::config::ECHO_TIMEOUT;
use defmt::Format;
use embassy_time::Duration;

/// Speed of sound, 343 m/s expressed in cm/µs
const SOUND_CM_PER_US: f32 = 0.0343;

/// One distance measurement
#[derive(Debug, Clone, Copy, PartialEq, Format)]
pub enum DistanceSample {
    /// Distance to the nearest obstacle
    Centimeters(f32),
    /// No echo edge pair completed within the timeout window
    NoEcho,
}

/// Converts an echo pulse width to a distance sample.
///
/// The width covers the round trip, so it is halved. Widths at or beyond
/// the echo timeout are reported as [`DistanceSample::NoEcho`].
pub fn sample_from_pulse(width: Duration) -> DistanceSample {
    if width >= ECHO_TIMEOUT {
        return DistanceSample::NoEcho;
    }
    let distance = (width.as_micros() as f32 * SOUND_CM_PER_US) / 2.0;
    DistanceSample::Centimeters(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cm(sample: DistanceSample) -> f32 {
        match sample {
            DistanceSample::Centimeters(d) => d,
            DistanceSample::NoEcho => panic!("expected a numeric sample"),
        }
    }

    #[test]
    fn pulse_width_maps_to_half_round_trip() {
        // 1000µs round trip -> 17.15cm
        let d = cm(sample_from_pulse(Duration::from_micros(1000)));
        assert!((d - 17.15).abs() < 0.01);
    }

    #[test]
    fn short_pulse_is_a_small_distance_not_no_echo() {
        let d = cm(sample_from_pulse(Duration::from_micros(1)));
        assert!(d > 0.0 && d < 0.02);
    }

    #[test]
    fn width_at_timeout_is_no_echo() {
        assert_eq!(sample_from_pulse(ECHO_TIMEOUT), DistanceSample::NoEcho);
        assert_eq!(
            sample_from_pulse(ECHO_TIMEOUT + Duration::from_micros(1)),
            DistanceSample::NoEcho
        );
    }

    #[test]
    fn width_just_inside_timeout_is_numeric() {
        let d = cm(sample_from_pulse(Duration::from_micros(29_999)));
        // ~514cm, the far edge of the usable range
        assert!((d - 514.38).abs() < 0.1);
    }
}
