//! Turn-indicator switch task
//!
//! Polls both indicator switches, runs them through the debounce
//! controller and drives the lamps. Accepted edges also queue a
//! confirmation chime and request a display refresh.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Ticker};

use telltale_core::config::{ChimeConfig, DebounceConfig};
use telltale_core::debounce::{ChannelId, DebounceController, SwitchLevels};
use telltale_drivers::lamp::{GpioLamp, OutputPin};

use crate::channels::{ChimeDispatcher, SCREEN_REFRESH, STATUS};

/// Adapter from an embassy-rp GPIO output to the lamp driver pin trait
pub struct LampPin(pub Output<'static>);

impl OutputPin for LampPin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Switch polling task
///
/// The switches are wired active-low with internal pull-ups, so a
/// pressed switch reads low. Lamps are active-high.
#[embassy_executor::task]
pub async fn switch_task(
    left_switch: Input<'static>,
    right_switch: Input<'static>,
    left_lamp: Output<'static>,
    right_lamp: Output<'static>,
    debounce: DebounceConfig,
    chime: ChimeConfig,
    poll_interval_ms: u32,
) {
    info!(
        "Switch task started (window: {} ms, trigger: {:?})",
        debounce.window_ms, debounce.trigger
    );

    let mut controller = DebounceController::new(debounce, chime);
    let mut left_lamp = GpioLamp::new_active_high(LampPin(left_lamp));
    let mut right_lamp = GpioLamp::new_active_high(LampPin(right_lamp));
    let mut dispatcher = ChimeDispatcher;

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));

    loop {
        ticker.next().await;

        let levels = SwitchLevels {
            left: left_switch.is_low(),
            right: right_switch.is_low(),
        };
        let now_ms = Instant::now().as_millis();

        let summary = controller.evaluate(
            levels,
            now_ms,
            &mut left_lamp,
            &mut right_lamp,
            &mut dispatcher,
        );

        if summary.any() {
            if let Some(on) = summary.left {
                debug!("Left indicator {}", if on { "on" } else { "off" });
            }
            if let Some(on) = summary.right {
                debug!("Right indicator {}", if on { "on" } else { "off" });
            }

            let mut status = STATUS.lock().await;
            if let Some(on) = summary.left {
                status.set_indicator(ChannelId::Left, on);
            }
            if let Some(on) = summary.right {
                status.set_indicator(ChannelId::Right, on);
            }
            drop(status);

            SCREEN_REFRESH.signal(());
        }
    }
}
