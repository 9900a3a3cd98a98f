//! Fixed-capacity loudness ring shared between the capture callback and the
//! render loop.
//!
//! Consistency is best-effort and lock-free. The capture callback is the only
//! writer: it stores a sample into the slot under the cursor, then publishes the
//! advanced cursor. The render loop reads the cursor and then walks every slot
//! from the oldest onward. If a write lands while a window is being read, the
//! window may contain one sample from the next callback in the oldest position,
//! or miss the newest one. That ambiguity is accepted; nothing waits on anything.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Ring of loudness samples, one slot per surface column
pub struct AmplitudeHistory {
    /// f32 bit patterns, so each slot is a single atomic word
    slots: Box<[AtomicU32]>,
    /// Index of the next slot to overwrite (always < capacity)
    cursor: AtomicUsize,
}

impl AmplitudeHistory {
    /// Create a history of `capacity` zero samples
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be > 0");
        let slots = (0..capacity)
            .map(|_| AtomicU32::new(0.0f32.to_bits()))
            .collect();
        Self {
            slots,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Store a sample at the cursor and advance the cursor by one slot.
    ///
    /// Must only be called from one context at a time (the capture callback).
    pub fn write(&self, sample: f32) {
        let cursor = self.cursor.load(Ordering::Relaxed);
        self.slots[cursor].store(sample.to_bits(), Ordering::Relaxed);
        self.cursor
            .store((cursor + 1) % self.slots.len(), Ordering::Release);
    }

    /// Copy the current window into `out`, oldest first.
    ///
    /// `out` is resized to `capacity()`. Never blocks the writer.
    pub fn read_window_into(&self, out: &mut Vec<f32>) {
        let len = self.slots.len();
        let start = self.cursor.load(Ordering::Acquire);

        out.clear();
        out.extend(
            (0..len).map(|j| f32::from_bits(self.slots[(start + j) % len].load(Ordering::Relaxed))),
        );
    }

    /// The most recent `capacity()` samples, oldest first
    pub fn read_window(&self) -> Vec<f32> {
        let mut window = Vec::with_capacity(self.slots.len());
        self.read_window_into(&mut window);
        window
    }
}
