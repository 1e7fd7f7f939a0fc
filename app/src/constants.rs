// Every payload starts with the literal 'TX' prepended by the host
pub const TX_TAG_LEN: usize = 2;

// Arbitrary signing: sha256(clientDataJson) | sha256(authenticatorData)
pub const TO_SIGN_SIZE: usize = 32 + 32;

/// Capacity of the stored arbitrary-sign domain, including the NUL terminator.
/// Longer domains are truncated to `ARBITRARY_DOMAIN_CAPACITY - 1` bytes.
pub const ARBITRARY_DOMAIN_CAPACITY: usize = 50;

/// Maximum number of top-level JSON members indexed for display.
/// Members past this limit are dropped.
pub const MAX_JSON_ITEMS: usize = 15;

/// Scratch space a JSON value is rendered through before paging,
/// NUL terminator included.
pub const VALUE_SCRATCH_SIZE: usize = 256;

pub const REVIEW_MESSAGE_TITLE: &str = "Review message";
pub const DOMAIN_TITLE: &str = "Domain";

// Nano S has much less RAM, so most of the payload goes to flash there.
#[cfg(target_os = "nanos")]
pub const RAM_BUFFER_SIZE: usize = 256;
#[cfg(target_os = "nanos")]
pub const FLASH_BUFFER_SIZE: usize = 8192;

#[cfg(not(target_os = "nanos"))]
pub const RAM_BUFFER_SIZE: usize = 8192;
#[cfg(not(target_os = "nanos"))]
pub const FLASH_BUFFER_SIZE: usize = 16384;
