//! Dashboard status model
//!
//! One explicit struct for everything the display shows, replacing
//! free-standing globals. Owned by the firmware behind a mutex; tasks
//! mutate it only through these methods.

use crate::debounce::ChannelId;

/// Driver-selectable drive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveMode {
    #[default]
    Normal,
    Eco,
    Sport,
}

impl DriveMode {
    pub fn label(&self) -> &'static str {
        match self {
            DriveMode::Normal => "Normal",
            DriveMode::Eco => "Eco",
            DriveMode::Sport => "Sport",
        }
    }
}

/// Complete dashboard status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DashboardStatus {
    speed_kmh: u16,
    left_indicator: bool,
    right_indicator: bool,
    key_on: bool,
    battery_percent: u8,
    side_stand_down: bool,
    drive_mode: DriveMode,
}

impl DashboardStatus {
    /// Power-on state: stationary, indicators off, key on, full battery
    pub const fn new() -> Self {
        Self {
            speed_kmh: 0,
            left_indicator: false,
            right_indicator: false,
            key_on: true,
            battery_percent: 100,
            side_stand_down: false,
            drive_mode: DriveMode::Normal,
        }
    }

    pub fn speed_kmh(&self) -> u16 {
        self.speed_kmh
    }

    pub fn set_speed_kmh(&mut self, kmh: u16) {
        self.speed_kmh = kmh;
    }

    pub fn indicator(&self, id: ChannelId) -> bool {
        match id {
            ChannelId::Left => self.left_indicator,
            ChannelId::Right => self.right_indicator,
        }
    }

    pub fn set_indicator(&mut self, id: ChannelId, on: bool) {
        match id {
            ChannelId::Left => self.left_indicator = on,
            ChannelId::Right => self.right_indicator = on,
        }
    }

    pub fn key_on(&self) -> bool {
        self.key_on
    }

    pub fn set_key_on(&mut self, on: bool) {
        self.key_on = on;
    }

    pub fn battery_percent(&self) -> u8 {
        self.battery_percent
    }

    pub fn set_battery_percent(&mut self, percent: u8) {
        self.battery_percent = percent.min(100);
    }

    pub fn side_stand_down(&self) -> bool {
        self.side_stand_down
    }

    pub fn set_side_stand_down(&mut self, down: bool) {
        self.side_stand_down = down;
    }

    pub fn drive_mode(&self) -> DriveMode {
        self.drive_mode
    }

    pub fn set_drive_mode(&mut self, mode: DriveMode) {
        self.drive_mode = mode;
    }
}

impl Default for DashboardStatus {
    fn default() -> Self {
        Self::new()
    }
}
