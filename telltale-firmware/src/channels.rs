//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use telltale_core::status::DashboardStatus;
use telltale_core::traits::{Notifier, TimeOfDay};

/// Channel capacity for chime requests
const CHIME_CHANNEL_SIZE: usize = 4;

/// One chime request: tone frequency and duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChimeRequest {
    pub frequency_hz: u16,
    pub duration_ms: u16,
}

/// Shared dashboard status, mutated by the speed and switch tasks,
/// read by the display and datalog tasks
pub static STATUS: Mutex<CriticalSectionRawMutex, DashboardStatus> =
    Mutex::new(DashboardStatus::new());

/// Latest wall-clock reading (None when the RTC is absent or faulty)
pub static CLOCK_READING: Mutex<CriticalSectionRawMutex, Option<TimeOfDay>> = Mutex::new(None);

/// Signal that the display should redraw
pub static SCREEN_REFRESH: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Chime requests from the switch task to the buzzer task
pub static CHIME_REQUEST: Channel<CriticalSectionRawMutex, ChimeRequest, CHIME_CHANNEL_SIZE> =
    Channel::new();

/// Notifier that hands chimes off to the buzzer task
///
/// Dispatch is fire-and-forget: the debounce decision never blocks on
/// the tone. If the channel is full the chime is dropped - the toggle
/// itself has already happened and is never dropped.
pub struct ChimeDispatcher;

impl Notifier for ChimeDispatcher {
    fn sound(&mut self, frequency_hz: u16, duration_ms: u16) {
        let _ = CHIME_REQUEST.try_send(ChimeRequest {
            frequency_hz,
            duration_ms,
        });
    }
}
