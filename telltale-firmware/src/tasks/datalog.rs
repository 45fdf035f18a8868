//! Datalog task
//!
//! Appends one speed/time record to the flash ring per save interval
//! and echoes the human-readable line on the debug link.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use telltale_core::datalog::{LogRecord, MAX_RECORD_BYTES};
use telltale_core::traits::TimeOfDay;

use crate::channels::{CLOCK_READING, STATUS};
use crate::storage::DashFlash;

/// Datalog task - periodic speed/time snapshots to flash
#[embassy_executor::task]
pub async fn datalog_task(mut storage: DashFlash<'static>, save_interval_ms: u32) {
    info!("Datalog task started (interval: {} ms)", save_interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(save_interval_ms as u64));

    loop {
        ticker.next().await;

        let speed_kmh = STATUS.lock().await.speed_kmh();
        let time = CLOCK_READING
            .lock()
            .await
            .unwrap_or_else(|| TimeOfDay::from_uptime_ms(Instant::now().as_millis()));

        let record = LogRecord::new(speed_kmh, time);
        info!("{=str}", record.format_line().as_str());

        let mut buf = [0u8; MAX_RECORD_BYTES];
        match record.encode(&mut buf) {
            Ok(encoded) => {
                if let Err(e) = storage.append_log(encoded).await {
                    warn!("Datalog append failed: {:?}", e);
                }
            }
            Err(_) => warn!("Datalog record encode failed"),
        }
    }
}
