//! Chime task
//!
//! Plays queued confirmation tones on the piezo buzzer. The buzzer
//! sits on a PWM channel; one tone is a square wave at the requested
//! frequency for the requested duration. Requests are queued by the
//! switch task, so the debounce loop never waits on a tone.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Timer;
use fixed::traits::ToFixed;

use crate::channels::CHIME_REQUEST;

/// PWM counter tick rate with the divider below (125 MHz / 125)
const PWM_TICK_HZ: u32 = 1_000_000;

/// System clock divider for the buzzer PWM slice
const PWM_DIVIDER: u16 = 125;

/// Build a 50% duty square-wave config for the given frequency
fn tone_config(frequency_hz: u16) -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = PWM_DIVIDER.to_fixed();

    // top + 1 ticks per period
    let period = (PWM_TICK_HZ / u32::from(frequency_hz.max(1))).clamp(2, 65_536);
    config.top = (period - 1) as u16;
    config.compare_b = config.top / 2;
    config
}

/// Silent config - counter keeps running, output stays low
fn silent_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = PWM_DIVIDER.to_fixed();
    config.compare_b = 0;
    config
}

/// Chime playback task
#[embassy_executor::task]
pub async fn chime_task(mut pwm: Pwm<'static>) {
    info!("Chime task started");

    pwm.set_config(&silent_config());

    loop {
        let request = CHIME_REQUEST.receive().await;
        trace!(
            "Chime: {} Hz for {} ms",
            request.frequency_hz,
            request.duration_ms
        );

        pwm.set_config(&tone_config(request.frequency_hz));
        Timer::after_millis(u64::from(request.duration_ms)).await;
        pwm.set_config(&silent_config());
    }
}
