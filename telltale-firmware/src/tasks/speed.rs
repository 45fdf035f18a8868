//! Speed sensor task
//!
//! Reads the throttle-position potentiometer via ADC and publishes the
//! scaled speed into the shared status. The display is only refreshed
//! when the reading actually changes.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};

use telltale_core::config::SpeedScale;
use telltale_core::traits::SensorError;
use telltale_drivers::sensor::counts_to_kmh;

use crate::channels::{SCREEN_REFRESH, STATUS};

/// Speed sensing task
///
/// The RP2040 ADC is 12-bit; readings are scaled down to the 10-bit
/// range the speed map expects.
#[embassy_executor::task]
pub async fn speed_task(
    mut adc: Adc<'static, Async>,
    mut pot_channel: Channel<'static>,
    scale: SpeedScale,
    poll_interval_ms: u32,
) {
    info!(
        "Speed task started ({} counts -> {} km/h)",
        scale.adc_max, scale.max_kmh
    );

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));
    let mut last_kmh: Option<u16> = None;
    let mut last_fault: Option<SensorError> = None;

    loop {
        ticker.next().await;

        let counts = match adc.read(&mut pot_channel).await {
            Ok(raw) => raw >> 2, // 12-bit to 10-bit
            Err(_) => {
                warn!("ADC read error");
                continue;
            }
        };

        match counts_to_kmh(counts, &scale) {
            Ok(kmh) => {
                if last_fault.take().is_some() {
                    info!("Speed sensor recovered");
                }

                if last_kmh != Some(kmh) {
                    last_kmh = Some(kmh);
                    trace!("Speed: {} km/h", kmh);

                    STATUS.lock().await.set_speed_kmh(kmh);
                    SCREEN_REFRESH.signal(());
                }
            }
            Err(e) => {
                // Hold the last good reading, log the fault once
                if last_fault != Some(e) {
                    last_fault = Some(e);
                    warn!("Speed sensor fault: {:?}", e);
                }
            }
        }
    }
}
