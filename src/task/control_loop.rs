//! Control Loop
//!
//! The only writer of find state and the alert outputs. Each fixed-period
//! tick it:
//! 1. fires one rangefinder measurement
//! 2. picks the alert mode (obstacle beats find beats idle)
//! 3. plays the mode's pattern, or silences and drops an expired find
//! 4. drains commands the listener queued since the last tick
//! 5. publishes the status snapshot for `/status`
//!
//! Alert pulses block the tick on purpose; a queued command simply waits
//! for the pattern to finish and is applied at step 4.

use crate::system::alert::AlertController;
use crate::system::config::{FINDING_PULSE, OBSTACLE_PULSE, TICK_PERIOD};
use crate::system::event;
use crate::system::rangefinder::Rangefinder;
use crate::system::resources::{AlertResources, RangefinderResources};
use crate::system::status::STATUS;
use defmt::{debug, info};
use embassy_time::{Instant, Timer};
use locator_core::http::Command;
use locator_core::state::{apply_command, decide_mode, AlertMode, FindRequestState};

#[embassy_executor::task]
pub async fn control_loop(rangefinder_r: RangefinderResources, alert_r: AlertResources) {
    let mut rangefinder = Rangefinder::new(rangefinder_r);
    let mut alert = AlertController::new(alert_r);
    let mut find = FindRequestState::new();

    info!("control loop started");
    loop {
        let sample = rangefinder.measure().await;
        debug!("sample: {}", sample);

        match decide_mode(sample, &find, Instant::now()) {
            AlertMode::ObstacleNear => alert.pulse(OBSTACLE_PULSE).await,
            AlertMode::Finding => alert.pulse(FINDING_PULSE).await,
            AlertMode::Idle => {
                alert.silence();
                find.clear_if_expired(Instant::now());
            }
        }

        while let Some(command) = event::try_next() {
            match command {
                Command::ArmFind => info!("find request armed"),
                Command::StopFind => info!("find request cleared"),
            }
            if apply_command(&mut find, command, Instant::now()) {
                alert.silence();
            }
        }

        {
            let mut status = STATUS.lock().await;
            status.sample = sample;
            status.finding = find.is_active(Instant::now());
        }

        Timer::after(TICK_PERIOD).await;
    }
}
