//! Hardware Resource Management
//!
//! Manages and allocates hardware resources (pins, peripherals) to the
//! locator's components. Each group is handed to exactly one owner:
//! - Rangefinder: HC-SR04 trigger/echo pins
//! - Alert: buzzer and indicator LED outputs
//! - Wi-Fi: the CYW43 companion chip's PIO SPI pins and DMA channel
//!
//! On the Pico 2 W the CYW43 wiring (PWR 23, DIO 24, CS 25, CLK 29) is
//! fixed by the board.

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, PIO0};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;

assign_resources! {
    /// HC-SR04 ultrasonic rangefinder pins
    rangefinder: RangefinderResources {
        trigger_pin: PIN_15,
        echo_pin: PIN_14,
    },
    /// Buzzer and indicator LED outputs
    alert: AlertResources {
        buzzer_pin: PIN_10,
        led_pin: PIN_2,
    },
    /// CYW43 Wi-Fi companion chip (fixed Pico 2 W wiring)
    wifi: WifiResources {
        pwr_pin: PIN_23,
        dio_pin: PIN_24,
        cs_pin: PIN_25,
        clk_pin: PIN_29,
        pio: PIO0,
        dma: DMA_CH0,
    },
}

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});
