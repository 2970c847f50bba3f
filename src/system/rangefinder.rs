//! Ultrasonic Rangefinder
//!
//! Drives the HC-SR04: a 10µs trigger pulse, then the echo pin goes high
//! for the round-trip time of the sound burst. The pulse-width-to-distance
//! conversion lives in `locator_core::sample` where it is tested on the
//! host; this module only produces the pulse width.
//!
//! A missing or out-of-range target never raises an error; it reads as
//! [`DistanceSample::NoEcho`], which is an ordinary outcome of a tick.

use crate::system::config::{TRIGGER_PULSE, TRIGGER_SETTLE};
use crate::system::resources::RangefinderResources;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{with_timeout, Instant, Timer};
use locator_core::config::ECHO_TIMEOUT;
use locator_core::sample::{sample_from_pulse, DistanceSample};

/// HC-SR04 trigger/echo pin pair
pub struct Rangefinder<'d> {
    trigger: Output<'d>,
    echo: Input<'d>,
}

impl<'d> Rangefinder<'d> {
    /// Takes ownership of the sensor pins, trigger idle low
    pub fn new(r: RangefinderResources) -> Self {
        Self {
            trigger: Output::new(r.trigger_pin, Level::Low),
            echo: Input::new(r.echo_pin, Pull::None),
        }
    }

    /// Fires one measurement cycle and returns the resulting sample.
    ///
    /// Blocks for at most roughly twice [`ECHO_TIMEOUT`] when no target
    /// reflects the burst.
    pub async fn measure(&mut self) -> DistanceSample {
        self.trigger.set_low();
        Timer::after(TRIGGER_SETTLE).await;
        self.trigger.set_high();
        Timer::after(TRIGGER_PULSE).await;
        self.trigger.set_low();

        // Rising edge starts the pulse; a timeout on either edge means the
        // burst never came back.
        if with_timeout(ECHO_TIMEOUT, self.echo.wait_for_high())
            .await
            .is_err()
        {
            return DistanceSample::NoEcho;
        }
        let rise = Instant::now();
        if with_timeout(ECHO_TIMEOUT, self.echo.wait_for_low())
            .await
            .is_err()
        {
            return DistanceSample::NoEcho;
        }

        sample_from_pulse(Instant::now() - rise)
    }
}
