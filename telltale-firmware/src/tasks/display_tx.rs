//! Display UART transmit task
//!
//! Renders the dashboard status into the screen buffer and sends it
//! to the cluster display as one `row:text\n` line per row.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Timer;
use embedded_io_async::Write;
use heapless::String;

use crate::channels::{CLOCK_READING, SCREEN_REFRESH, STATUS};
use crate::display::{Renderer, DISPLAY_ROWS};

/// Delay between a refresh request and the redraw, to batch bursts
const REFRESH_COALESCE_MS: u64 = 50;

/// Display TX task - renders and sends the status screen
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx<'static, UART0>) {
    info!("Display TX task started");

    let mut renderer = Renderer::new();

    renderer.render_boot();
    send_screen(&mut tx, &renderer).await;

    loop {
        SCREEN_REFRESH.wait().await;

        // Coalesce bursts of refresh requests into one redraw: the
        // signal latches anything raised during this delay.
        Timer::after_millis(REFRESH_COALESCE_MS).await;

        let status = *STATUS.lock().await;
        let time = *CLOCK_READING.lock().await;

        renderer.render_status(&status, time);
        send_screen(&mut tx, &renderer).await;
    }
}

/// Send every screen row to the display
async fn send_screen(tx: &mut BufferedUartTx<'static, UART0>, renderer: &Renderer) {
    for row in 0..DISPLAY_ROWS {
        let mut line: String<32> = String::new();
        // Row index and text always fit in 32 bytes
        let _ = write!(line, "{}:{}\n", row, renderer.screen().get_line(row));

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send screen row: {:?}", e);
            return;
        }
    }

    trace!("Screen update sent");
}
