pub mod buffer;
pub mod storage;

pub use buffer::*;
pub use storage::*;

use crate::constants::RAM_BUFFER_SIZE;

/// Slow tier of the transaction buffer: NVM on device, plain memory otherwise.
#[cfg(feature = "ledger")]
pub type FlashStore = NvmStore;

#[cfg(not(feature = "ledger"))]
pub type FlashStore = RamStore<{ crate::constants::FLASH_BUFFER_SIZE }>;

/// Transaction buffer used by the app on the current target.
pub type DefaultBuffer = TieredBuffer<RamStore<RAM_BUFFER_SIZE>, FlashStore>;
