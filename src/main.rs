//! Locator firmware entry point
//!
//! Brings the network up, then spawns the request listener and the
//! control loop.

#![no_std]
#![no_main]

use crate::task::{control_loop::control_loop, listener::listen, wifi};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{AssignedResources, AlertResources, RangefinderResources, WifiResources};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task.
    let r = split_resources!(p);

    // Network bring-up runs to completion before any task spawns so the
    // control loop never waits behind the radio.
    let stack = wifi::bring_up(&spawner, r.wifi).await;

    if let Some(stack) = stack {
        spawner.spawn(listen(stack)).unwrap();
    }
    spawner
        .spawn(control_loop(r.rangefinder, r.alert))
        .unwrap();
}
