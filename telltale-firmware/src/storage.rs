//! Flash storage for configuration and the datalog
//!
//! Uses sequential-storage over the last 128KB of flash:
//! a key-value map partition for configuration, and a queue partition
//! for the append-only datalog (oldest entries overwritten when full).

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::{map, queue};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash
pub const CONFIG_PARTITION_SIZE: usize = 64 * 1024; // 64KB for config
pub const DATALOG_PARTITION_SIZE: usize = 64 * 1024; // 64KB datalog ring

pub const CONFIG_PARTITION_START: usize = FLASH_SIZE - CONFIG_PARTITION_SIZE;
pub const DATALOG_PARTITION_START: usize = CONFIG_PARTITION_START - DATALOG_PARTITION_SIZE;

/// Flash range for the config partition
pub const CONFIG_RANGE: core::ops::Range<u32> =
    (CONFIG_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Flash range for the datalog partition
pub const DATALOG_RANGE: core::ops::Range<u32> =
    (DATALOG_PARTITION_START as u32)..(CONFIG_PARTITION_START as u32);

/// Maximum stored item size
const MAX_ITEM_SIZE: usize = 2048;

/// Storage keys for the config partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Dashboard configuration (binary postcard format)
    Config = 0,
    /// Dashboard configuration as TOML text
    ConfigToml = 1,
}

impl StorageKey {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::Config),
            1 => Some(StorageKey::ConfigToml),
            _ => None,
        }
    }
}

impl map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, map::SerializationError> {
        if buffer.is_empty() {
            return Err(map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(buffer: &[u8]) -> Result<(Self, usize), map::SerializationError> {
        if buffer.is_empty() {
            return Err(map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(map::SerializationError::InvalidFormat),
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
}

/// RP2040 flash storage
///
/// Wear-leveled key-value storage for config plus a datalog ring.
pub struct DashFlash<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> DashFlash<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Read a config value by key into the provided buffer
    pub async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut data_buffer = [0u8; MAX_ITEM_SIZE];

        let result = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await;

        match result {
            Ok(Some(data)) => {
                let len = data.len();
                if buffer.len() < len {
                    return Err(FlashError::BufferTooSmall);
                }
                buffer[..len].copy_from_slice(data);
                Ok(len)
            }
            Ok(None) => Err(FlashError::NotFound),
            Err(_) => Err(FlashError::Storage),
        }
    }

    /// Write a config value by key
    pub async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut data_buffer = [0u8; MAX_ITEM_SIZE];

        map::store_item(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        )
        .await
        .map_err(|_| FlashError::Storage)
    }

    /// Append an encoded datalog record to the log ring
    ///
    /// The oldest records are overwritten when the partition fills.
    pub async fn append_log(&mut self, record: &[u8]) -> Result<(), FlashError> {
        queue::push(
            &mut self.flash,
            DATALOG_RANGE,
            &mut NoCache::new(),
            record,
            true, // allow overwriting the oldest entries
        )
        .await
        .map_err(|_| FlashError::Storage)
    }
}
