//! Fixed-capacity input ring shared between the keyboard interrupt and the
//! foreground reader.
//!
//! The ring is split once into a [`Producer`] (owned by the interrupt path)
//! and a [`Consumer`] (owned by the shell). Each side is the only writer of
//! its own cursor, so no lock is needed. The producer never waits: once it
//! laps the consumer, the oldest unread bytes are lost.
//!
//! Cursors run freely and are reduced modulo [`CAPACITY`] only to index a
//! slot. `write == read` means empty; `write - read` is the number of bytes
//! written since the last read, of which at most [`CAPACITY`] survive.
//!
//! The kernel is uniprocessor: an interrupt runs to completion between two
//! foreground instructions, which is what the consumer's lap check relies on.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use turban_hal::Cpu;

/// Number of bytes the ring holds.
pub const CAPACITY: usize = 256;

/// The shared ring storage.
pub struct InputRing {
    slots: [AtomicU8; CAPACITY],
    write: AtomicUsize,
    read: AtomicUsize,
    claimed: AtomicBool,
}

impl InputRing {
    /// Creates an empty ring.
    pub const fn new() -> Self {
        #[allow(clippy::declare_interior_mutable_const)]
        const EMPTY: AtomicU8 = AtomicU8::new(0);
        InputRing {
            slots: [EMPTY; CAPACITY],
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            claimed: AtomicBool::new(false),
        }
    }

    /// Hands out the two ends of the ring.
    ///
    /// Returns `None` after the first call, so there is never more than one
    /// producer or consumer.
    pub fn split(&self) -> Option<(Producer<'_>, Consumer<'_>)> {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((Producer { ring: self }, Consumer { ring: self }))
    }

    fn pending(&self) -> usize {
        self.write
            .load(Ordering::SeqCst)
            .wrapping_sub(self.read.load(Ordering::SeqCst))
    }
}

impl Default for InputRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Writing end of the ring, used from interrupt context.
pub struct Producer<'a> {
    ring: &'a InputRing,
}

impl Producer<'_> {
    /// Appends a byte, overwriting the oldest unread byte when full.
    pub fn push(&self, byte: u8) {
        let write = self.ring.write.load(Ordering::Relaxed);
        self.ring.slots[write % CAPACITY].store(byte, Ordering::SeqCst);
        self.ring.write.store(write.wrapping_add(1), Ordering::SeqCst);
    }
}

/// Reading end of the ring, used by the foreground loop.
pub struct Consumer<'a> {
    ring: &'a InputRing,
}

impl Consumer<'_> {
    /// True when at least one byte is waiting.
    pub fn has_pending(&self) -> bool {
        self.ring.pending() != 0
    }

    /// Takes the oldest surviving byte, if any.
    pub fn try_read(&mut self) -> Option<u8> {
        let ring = self.ring;
        loop {
            let write = ring.write.load(Ordering::SeqCst);
            let mut read = ring.read.load(Ordering::Relaxed);
            if read == write {
                return None;
            }
            if write.wrapping_sub(read) > CAPACITY {
                // lapped: everything before this was overwritten
                read = write.wrapping_sub(CAPACITY);
            }
            let byte = ring.slots[read % CAPACITY].load(Ordering::SeqCst);

            // An interrupt between the two cursor loads may have reused the slot.
            if ring.write.load(Ordering::SeqCst).wrapping_sub(read) > CAPACITY {
                continue;
            }
            ring.read.store(read.wrapping_add(1), Ordering::SeqCst);
            return Some(byte);
        }
    }

    /// Blocks until a byte is available and returns it.
    ///
    /// Sleeps with `cpu.wait_for_interrupt()` between checks; spurious
    /// wake-ups just re-check.
    pub fn read_char<C: Cpu>(&mut self, cpu: &mut C) -> u8 {
        loop {
            if let Some(byte) = self.try_read() {
                return byte;
            }
            cpu.wait_for_interrupt();
        }
    }
}
