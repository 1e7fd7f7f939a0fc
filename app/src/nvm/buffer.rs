use crate::bolos::zlog_stack;

use super::BackingStore;

/// Append-only staging area for the incoming transaction.
pub trait ByteSink {
    /// Prepares the sink for a new session.
    fn init(&mut self) {
        self.reset();
    }

    /// Drops every buffered byte.
    fn reset(&mut self);

    /// Appends `data` and returns how many bytes were stored. A chunk that
    /// does not fit is rejected whole and 0 is returned.
    fn append(&mut self, data: &[u8]) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes appended since the last reset.
    fn data(&self) -> &[u8];
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActiveTier {
    Ram,
    Flash,
}

struct Tier<S> {
    store: S,
    pos: usize,
}

impl<S: BackingStore> Tier<S> {
    fn room(&self) -> usize {
        self.store.capacity().saturating_sub(self.pos)
    }

    fn append(&mut self, data: &[u8]) -> usize {
        if self.room() < data.len() {
            return 0;
        }

        if self.store.write(self.pos, data).is_err() {
            return 0;
        }

        self.pos += data.len();
        data.len()
    }

    fn filled(&self) -> &[u8] {
        self.store.as_slice().get(..self.pos).unwrap_or(&[])
    }
}

/// Two level buffer: chunks go to the fast RAM tier until it runs out of
/// room, then everything moves to the bigger flash tier for the rest of the
/// session.
pub struct TieredBuffer<R, F> {
    ram: Tier<R>,
    flash: Tier<F>,
    active: ActiveTier,
}

impl<R: BackingStore + Default, F: BackingStore + Default> Default for TieredBuffer<R, F> {
    fn default() -> Self {
        TieredBuffer::new(R::default(), F::default())
    }
}

impl<R: BackingStore, F: BackingStore> TieredBuffer<R, F> {
    pub fn new(ram: R, flash: F) -> Self {
        TieredBuffer {
            ram: Tier { store: ram, pos: 0 },
            flash: Tier {
                store: flash,
                pos: 0,
            },
            active: ActiveTier::Ram,
        }
    }

    pub fn active_tier(&self) -> ActiveTier {
        self.active
    }

    pub fn capacity(&self) -> usize {
        match self.active {
            ActiveTier::Ram => self.ram.store.capacity(),
            ActiveTier::Flash => self.flash.store.capacity(),
        }
    }

    #[inline(never)]
    fn move_to_flash(&mut self) -> bool {
        zlog_stack("buffer: moving to flash\0");

        self.active = ActiveTier::Flash;
        if self.ram.pos == 0 {
            return true;
        }

        let pending = self.ram.filled();
        if self.flash.append(pending) == pending.len() {
            return true;
        }

        // Flash cannot hold what RAM already has, stay where we were
        self.active = ActiveTier::Ram;
        false
    }
}

impl<R: BackingStore, F: BackingStore> ByteSink for TieredBuffer<R, F> {
    fn reset(&mut self) {
        self.ram.pos = 0;
        self.flash.pos = 0;
        self.active = ActiveTier::Ram;
    }

    fn append(&mut self, data: &[u8]) -> usize {
        match self.active {
            ActiveTier::Ram if self.ram.room() >= data.len() => self.ram.append(data),
            ActiveTier::Ram => {
                if !self.move_to_flash() {
                    return 0;
                }
                self.flash.append(data)
            }
            ActiveTier::Flash => self.flash.append(data),
        }
    }

    fn len(&self) -> usize {
        match self.active {
            ActiveTier::Ram => self.ram.pos,
            ActiveTier::Flash => self.flash.pos,
        }
    }

    fn data(&self) -> &[u8] {
        match self.active {
            ActiveTier::Ram => self.ram.filled(),
            ActiveTier::Flash => self.flash.filled(),
        }
    }
}
