use core::ops::Range;

use crate::AppSW;

#[cfg(feature = "ledger")]
use crate::constants::FLASH_BUFFER_SIZE;
#[cfg(feature = "ledger")]
use core::ffi::c_void;
#[cfg(feature = "ledger")]
use ledger_device_sdk::NVMData;
#[cfg(feature = "ledger")]
use ledger_secure_sdk_sys::nvm_write;

/// Fixed size memory one tier of the transaction buffer is written to.
pub trait BackingStore {
    fn capacity(&self) -> usize;

    /// Writes `data` at `offset`. The whole range must fit in the store.
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), AppSW>;

    fn as_slice(&self) -> &[u8];
}

/// Range a write of `len` bytes at `offset` touches, if it fits in `capacity`.
fn write_range(offset: usize, len: usize, capacity: usize) -> Result<Range<usize>, AppSW> {
    offset
        .checked_add(len)
        .filter(|end| *end <= capacity)
        .map(|end| offset..end)
        .ok_or(AppSW::BufferOutOfBounds)
}

pub struct RamStore<const SIZE: usize> {
    data: [u8; SIZE],
}

impl<const SIZE: usize> Default for RamStore<SIZE> {
    fn default() -> Self {
        RamStore { data: [0; SIZE] }
    }
}

impl<const SIZE: usize> RamStore<SIZE> {
    pub fn new() -> Self {
        RamStore::default()
    }
}

impl<const SIZE: usize> BackingStore for RamStore<SIZE> {
    fn capacity(&self) -> usize {
        SIZE
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), AppSW> {
        let range = write_range(offset, data.len(), SIZE)?;
        self.data[range].copy_from_slice(data);

        Ok(())
    }

    fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

// This is necessary to store the object in NVM and not in RAM
#[cfg(feature = "ledger")]
#[link_section = ".nvm_data"]
static mut DATA: NVMData<[u8; FLASH_BUFFER_SIZE]> = NVMData::new([0u8; FLASH_BUFFER_SIZE]);

/// Flash tier backed by the app's NVM data section.
///
/// Writes program only the bytes they touch, the buffer is never staged
/// through the stack.
#[cfg(feature = "ledger")]
#[derive(Clone, Copy, Default)]
pub struct NvmStore;

#[cfg(feature = "ledger")]
impl BackingStore for NvmStore {
    fn capacity(&self) -> usize {
        FLASH_BUFFER_SIZE
    }

    #[inline(never)]
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), AppSW> {
        let range = write_range(offset, data.len(), FLASH_BUFFER_SIZE)?;
        if data.is_empty() {
            return Ok(());
        }

        let target = unsafe { &mut DATA.get_mut()[range] };
        unsafe {
            nvm_write(
                target.as_mut_ptr() as *mut c_void,
                data.as_ptr() as *mut c_void,
                data.len() as u32,
            );
        }

        if *target != *data {
            return Err(AppSW::InvalidNVMWrite);
        }

        Ok(())
    }

    fn as_slice(&self) -> &[u8] {
        unsafe { DATA.get_ref().as_slice() }
    }
}

#[cfg(test)]
mod storage_test {
    use super::*;

    #[test]
    fn ram_store_bounds() {
        let mut store = RamStore::<8>::new();
        assert_eq!(store.capacity(), 8);

        store.write(2, b"abc").unwrap();
        assert_eq!(&store.as_slice()[..5], b"\0\0abc");

        assert_eq!(store.write(6, b"abc"), Err(AppSW::BufferOutOfBounds));
        assert_eq!(store.write(usize::MAX, b"a"), Err(AppSW::BufferOutOfBounds));
        store.write(8, b"").unwrap();
    }

    #[test]
    fn write_touches_only_its_range() {
        let mut store = RamStore::<16>::new();
        store.write(0, &[0xff; 16]).unwrap();
        store.write(4, b"abcd").unwrap();

        assert_eq!(&store.as_slice()[..4], &[0xff; 4]);
        assert_eq!(&store.as_slice()[4..8], b"abcd");
        assert_eq!(&store.as_slice()[8..], &[0xff; 8]);
    }

    #[test]
    fn write_range_bounds() {
        assert_eq!(write_range(4, 4, 16), Ok(4..8));
        assert_eq!(write_range(12, 4, 16), Ok(12..16));
        assert_eq!(write_range(16, 0, 16), Ok(16..16));
        assert_eq!(write_range(13, 4, 16), Err(AppSW::BufferOutOfBounds));
        assert_eq!(write_range(usize::MAX, 1, 16), Err(AppSW::BufferOutOfBounds));
    }
}
