//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod chime;
pub mod clock;
pub mod datalog;
pub mod display_tx;
pub mod speed;
pub mod switches;

pub use chime::chime_task;
pub use clock::clock_task;
pub use datalog::datalog_task;
pub use display_tx::display_tx_task;
pub use speed::speed_task;
pub use switches::switch_task;
