//! Wall-clock task
//!
//! Polls the DS3231 RTC once a second and publishes the reading for
//! the display and datalog tasks. When the RTC is missing or faulty
//! the clock falls back to time since boot, so datalog entries still
//! carry a monotonic timestamp.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use telltale_core::traits::{Clock, TimeOfDay};
use telltale_drivers::rtc::Ds3231;

use crate::channels::{CLOCK_READING, SCREEN_REFRESH};

/// Clock polling task
#[embassy_executor::task]
pub async fn clock_task(i2c: I2c<'static, I2C0, Async>) {
    info!("Clock task started");

    let mut rtc = Ds3231::new(i2c);
    let mut ticker = Ticker::every(Duration::from_secs(1));
    let mut rtc_faulted = false;
    let mut last_minute: Option<u8> = None;

    loop {
        ticker.next().await;

        let time = match rtc.now().await {
            Ok(t) => {
                if rtc_faulted {
                    info!("RTC recovered");
                    rtc_faulted = false;
                }
                t
            }
            Err(e) => {
                if !rtc_faulted {
                    warn!("RTC fault: {:?}, falling back to uptime", e);
                    rtc_faulted = true;
                }
                TimeOfDay::from_uptime_ms(Instant::now().as_millis())
            }
        };

        *CLOCK_READING.lock().await = Some(time);

        // The display only shows hours and minutes
        if last_minute != Some(time.minute) {
            last_minute = Some(time.minute);
            SCREEN_REFRESH.signal(());
        }
    }
}
