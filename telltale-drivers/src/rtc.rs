//! DS3231 real-time clock driver
//!
//! Battery-backed I2C RTC providing the time of day shown on the
//! cluster and stamped into datalog entries. Registers are BCD.

use embedded_hal_async::i2c::I2c;

use telltale_core::traits::{Clock, ClockError, TimeOfDay};

/// Fixed 7-bit bus address of the DS3231
pub const DS3231_ADDRESS: u8 = 0x68;

/// First timekeeping register (seconds); minutes and hours follow
const REG_SECONDS: u8 = 0x00;

/// DS3231 on an async I2C bus
pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DS3231_ADDRESS,
        }
    }

    /// Read the current time of day
    pub async fn read_time(&mut self) -> Result<TimeOfDay, ClockError> {
        let mut regs = [0u8; 3];
        self.i2c
            .write_read(self.address, &[REG_SECONDS], &mut regs)
            .await
            .map_err(|_| ClockError::Bus)?;

        decode_time(regs)
    }
}

impl<I2C: I2c> Clock for Ds3231<I2C> {
    async fn now(&mut self) -> Result<TimeOfDay, ClockError> {
        self.read_time().await
    }
}

fn bcd_to_dec(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Decode the seconds/minutes/hours register block
///
/// Bit 6 of the hours register selects 12-hour mode, in which bit 5 is
/// the AM/PM flag; in 24-hour mode bits 5-4 are the tens of hours.
fn decode_time([sec, min, hour]: [u8; 3]) -> Result<TimeOfDay, ClockError> {
    let second = bcd_to_dec(sec & 0x7F);
    let minute = bcd_to_dec(min & 0x7F);

    let hour = if hour & 0x40 != 0 {
        let h12 = bcd_to_dec(hour & 0x1F);
        let pm = hour & 0x20 != 0;
        match (h12, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        }
    } else {
        bcd_to_dec(hour & 0x3F)
    };

    if second > 59 || minute > 59 || hour > 23 {
        return Err(ClockError::InvalidTime);
    }

    Ok(TimeOfDay {
        hour,
        minute,
        second,
    })
}
