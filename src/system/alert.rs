//! Alert Output Control
//!
//! Owns the buzzer and indicator LED and is the only writer of those
//! outputs. Both are driven identically and simultaneously; there is no
//! audio-only or visual-only mode.
//!
//! # Polarity
//! Whether "active" means a high or low pin level is wiring detail (the
//! indicator LED on the reference build is active-low). The state machine
//! only ever asks for active/inactive; the level mapping lives here.
//!
//! # Blocking
//! `pulse` is synchronous: the alert pattern is the deliverable, and while
//! it plays nothing else in the control loop runs. Alerts pre-empt request
//! servicing for their full duration.

use crate::system::config::PulseTiming;
use crate::system::resources::AlertResources;
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;

/// Pin level that drives the buzzer audible
const BUZZER_ACTIVE: Level = Level::High;

/// Pin level that lights the indicator LED (active-low wiring)
const LED_ACTIVE: Level = Level::Low;

fn inverse(level: Level) -> Level {
    match level {
        Level::High => Level::Low,
        Level::Low => Level::High,
    }
}

/// Buzzer + indicator LED pair
pub struct AlertController<'d> {
    buzzer: Output<'d>,
    led: Output<'d>,
}

impl<'d> AlertController<'d> {
    /// Takes ownership of the output pins, starting silent
    pub fn new(r: AlertResources) -> Self {
        Self {
            buzzer: Output::new(r.buzzer_pin, inverse(BUZZER_ACTIVE)),
            led: Output::new(r.led_pin, inverse(LED_ACTIVE)),
        }
    }

    /// Drives both outputs active or inactive together
    fn set(&mut self, active: bool) {
        if active {
            self.buzzer.set_level(BUZZER_ACTIVE);
            self.led.set_level(LED_ACTIVE);
        } else {
            self.buzzer.set_level(inverse(BUZZER_ACTIVE));
            self.led.set_level(inverse(LED_ACTIVE));
        }
    }

    /// Plays one timed pattern: active for `on`, inactive for `off`,
    /// repeated, with no pause after the final repetition. The outputs are
    /// always inactive when this returns.
    pub async fn pulse(&mut self, timing: PulseTiming) {
        for n in 0..timing.repeats {
            self.set(true);
            Timer::after(timing.on).await;
            self.set(false);
            if n + 1 < timing.repeats {
                Timer::after(timing.off).await;
            }
        }
    }

    /// Forces both outputs inactive immediately
    pub fn silence(&mut self) {
        self.set(false);
    }
}
