//! Network Bring-up
//!
//! Starts the CYW43 radio and the network stack before the control loop
//! runs, using one parameterized strategy instead of per-variant copies:
//! - `Station`: join the configured network with a bounded wait, falling
//!   back to access-point mode if the join fails
//! - `AccessPoint`: self-hosted WPA2 AP on a static 192.168.4.1/24
//! - `Standalone`: no radio at all; the loop runs sensor/alert-only
//!
//! Bring-up returns `Option<Stack>`; `None` means standalone and the
//! listener task is simply never spawned. Successful bring-up is affirmed
//! on the Wi-Fi chip's onboard LED (3 blinks for station, 5 for AP).
//!
//! # Firmware blobs
//! The CYW43439 firmware and CLM blobs are not carried in this repository;
//! they are flashed once to fixed addresses and mapped from flash here
//! (see README).

use crate::system::config::{
    NetworkMode, AP_CHANNEL, AP_PASSWORD, AP_SSID, NETWORK_MODE, STATION_JOIN_TIMEOUT, WIFI_PASSWORD,
    WIFI_SSID,
};
use crate::system::resources::{Irqs, WifiResources};
use cyw43::JoinOptions;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_net::{Ipv4Address, Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::Pio;
use embassy_time::{with_timeout, Duration, Instant, Timer};
use rand_core::RngCore;
use static_cell::StaticCell;

/// Flash locations the radio firmware blobs are written to (see README)
const CYW43_FW_ADDR: usize = 0x1010_0000;
const CYW43_FW_LEN: usize = 230_321;
const CYW43_CLM_ADDR: usize = 0x1014_0000;
const CYW43_CLM_LEN: usize = 4752;

/// Delay between station join attempts
const JOIN_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Blink spacing when affirming bring-up on the onboard LED
const AFFIRM_BLINK_INTERVAL: Duration = Duration::from_millis(100);

#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Brings the radio and network stack up according to [`NETWORK_MODE`].
///
/// Returns `None` in standalone mode; the caller runs without a listener.
pub async fn bring_up(spawner: &Spawner, r: WifiResources) -> Option<Stack<'static>> {
    if NETWORK_MODE == NetworkMode::Standalone {
        info!("standalone mode, no listener");
        return None;
    }

    // Blobs live in flash outside the program image.
    let fw = unsafe { core::slice::from_raw_parts(CYW43_FW_ADDR as *const u8, CYW43_FW_LEN) };
    let clm = unsafe { core::slice::from_raw_parts(CYW43_CLM_ADDR as *const u8, CYW43_CLM_LEN) };

    let pwr = Output::new(r.pwr_pin, Level::Low);
    let cs = Output::new(r.cs_pin, Level::High);
    let mut pio = Pio::new(r.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        r.dio_pin,
        r.clk_pin,
        r.dma,
    );

    static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(cyw43_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    // Try the station join first when configured; any failure degrades to
    // hosting our own access point so the device stays reachable.
    let station_joined = match NETWORK_MODE {
        NetworkMode::Station => join_station(&mut control).await,
        _ => false,
    };

    let config = if station_joined {
        embassy_net::Config::dhcpv4(Default::default())
    } else {
        control
            .start_ap_wpa2(AP_SSID, AP_PASSWORD, AP_CHANNEL)
            .await;
        info!("access point active: ssid={}", AP_SSID);
        embassy_net::Config::ipv4_static(StaticConfigV4 {
            address: Ipv4Cidr::new(Ipv4Address::new(192, 168, 4, 1), 24),
            gateway: None,
            dns_servers: heapless::Vec::new(),
        })
    };

    let mut rng = RoscRng;
    let seed = rng.next_u64();
    static NET_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        config,
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(net_task(runner)).unwrap();

    if station_joined {
        // Wait for the DHCP lease, bounded. A late lease is not fatal; the
        // listener just stays unreachable until it lands.
        if with_timeout(STATION_JOIN_TIMEOUT, stack.wait_config_up())
            .await
            .is_err()
        {
            warn!("no DHCP lease within {}s", STATION_JOIN_TIMEOUT.as_secs());
        } else if let Some(cfg) = stack.config_v4() {
            info!("station up, address {}", cfg.address);
        }
    }

    affirm_blink(&mut control, if station_joined { 3 } else { 5 }).await;
    Some(stack)
}

/// Joins the configured network, retrying within a bounded window.
async fn join_station(control: &mut cyw43::Control<'static>) -> bool {
    info!("joining {}", WIFI_SSID);
    let deadline = Instant::now() + STATION_JOIN_TIMEOUT;
    loop {
        match control
            .join(WIFI_SSID, JoinOptions::new(WIFI_PASSWORD.as_bytes()))
            .await
        {
            Ok(()) => {
                info!("joined {}", WIFI_SSID);
                return true;
            }
            Err(err) => {
                warn!("join failed, status {}", err.status);
            }
        }
        if Instant::now() >= deadline {
            warn!("giving up on {}, falling back to access point", WIFI_SSID);
            return false;
        }
        Timer::after(JOIN_RETRY_DELAY).await;
    }
}

/// Blinks the Wi-Fi chip's onboard LED to affirm bring-up
async fn affirm_blink(control: &mut cyw43::Control<'static>, times: u8) {
    for _ in 0..times {
        control.gpio_set(0, true).await;
        Timer::after(AFFIRM_BLINK_INTERVAL).await;
        control.gpio_set(0, false).await;
        Timer::after(AFFIRM_BLINK_INTERVAL).await;
    }
}
