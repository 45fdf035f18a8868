//! Telltale - Vehicle Dashboard Firmware
//!
//! Main firmware binary for RP2040-based dashboard boards. Polls the
//! turn-indicator switches through a debounce gate, drives the lamps
//! and confirmation chime, reads the throttle-position speed sensor,
//! and keeps the cluster display and the flash datalog up to date.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use telltale_core::config::{DashboardConfig, DEFAULT_DISPLAY_BAUD};

use crate::config::{parse_config, ConfigPersistence};
use crate::storage::DashFlash;

/// Embedded default configuration (compiled into firmware)
/// Edit dashboard.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../dashboard.toml");

mod channels;
mod config;
mod display;
mod storage;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Telltale firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load configuration from flash (or use embedded defaults),
    // then reclaim the flash for the datalog task
    let mut persistence = ConfigPersistence::new(DashFlash::new(p.FLASH, p.DMA_CH0));
    let config = match persistence.load().await {
        Ok(config) => {
            info!("Loaded configuration from flash");
            config
        }
        Err(_) => {
            info!("No valid configuration in flash, using embedded defaults");
            let config = embedded_default_config();
            // Seed flash so the next boot takes the binary path
            if let Err(e) = persistence.save(&config).await {
                warn!("Failed to persist default config: {:?}", e);
            }
            config
        }
    };
    let flash = persistence.into_storage();

    // Setup UART for display communication
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = DEFAULT_DISPLAY_BAUD;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();

    info!("UART initialized for display communication");

    // Indicator switches: active-low with internal pull-ups
    let left_switch = Input::new(p.PIN_2, Pull::Up);
    let right_switch = Input::new(p.PIN_3, Pull::Up);

    // Indicator lamps: active-high, forced off at boot
    let left_lamp = Output::new(p.PIN_6, Level::Low);
    let right_lamp = Output::new(p.PIN_5, Level::Low);

    info!("Switches and lamps initialized");

    // Throttle-position pot on ADC channel 0
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let pot_channel = Channel::new_pin(p.PIN_26, Pull::None);

    info!("ADC initialized");

    // DS3231 RTC on I2C0
    let rtc_i2c = I2c::new_async(p.I2C0, p.PIN_17, p.PIN_16, Irqs, i2c::Config::default());

    info!("I2C initialized for RTC");

    // Piezo buzzer on PWM slice 3, channel B
    let buzzer = Pwm::new_output_b(p.PWM_SLICE3, p.PIN_7, Default::default());

    info!("Buzzer PWM initialized");

    // Spawn tasks
    spawner
        .spawn(tasks::switch_task(
            left_switch,
            right_switch,
            left_lamp,
            right_lamp,
            config.debounce,
            config.chime,
            config.poll_interval_ms,
        ))
        .unwrap();
    spawner
        .spawn(tasks::speed_task(
            adc,
            pot_channel,
            config.speed,
            config.poll_interval_ms,
        ))
        .unwrap();
    spawner.spawn(tasks::clock_task(rtc_i2c)).unwrap();
    spawner.spawn(tasks::display_tx_task(tx)).unwrap();
    spawner.spawn(tasks::chime_task(buzzer)).unwrap();
    spawner
        .spawn(tasks::datalog_task(flash, config.save_interval_ms))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded default configuration
///
/// build.rs validates dashboard.toml on every build, so a parse
/// failure here means the binary and the TOML went out of sync.
fn embedded_default_config() -> DashboardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!(
                "Failed to parse embedded config: {:?}",
                defmt::Debug2Format(&e)
            );
            error!("Using built-in fallback configuration");
            DashboardConfig::default()
        }
    }
}
