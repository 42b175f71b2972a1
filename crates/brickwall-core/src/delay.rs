//! Fixed-length lookahead delay line.
//!
//! A circular buffer whose read cursor trails the write cursor by a constant
//! number of samples. The limiter keeps one per channel so the gain it derives
//! from the current input can be applied to audio that is `delay_length`
//! samples older.
//!
//! # Per-sample contract
//!
//! For every sample, call [`read`](DelayLine::read), then
//! [`write`](DelayLine::write), then [`advance`](DelayLine::advance), exactly
//! once each. The order is not checked; skipping or reordering a step shifts
//! the delay permanently. [`read_write_advance`](DelayLine::read_write_advance)
//! bundles the three calls.
//!
//! # Memory
//!
//! Storage is allocated once in [`DelayLine::new`] and never resized.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::LimiterError;
use crate::params::MAX_BUFFER_CAPACITY;

/// Circular buffer with a constant read-behind-write offset.
///
/// Invariant: `read_pos == (write_pos + capacity - delay_length) % capacity`
/// before and after every [`advance`](Self::advance).
///
/// # Example
///
/// ```rust
/// use brickwall_core::DelayLine;
///
/// let mut line = DelayLine::new(10, 2).unwrap();
/// let mut out = Vec::new();
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     out.push(line.read_write_advance(x));
/// }
/// assert_eq!(out, [0.0, 0.0, 1.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// Ring storage, `capacity` samples
    buffer: Vec<f32>,
    /// Slot the next input lands in
    write_pos: usize,
    /// Slot holding the sample written `delay_length` samples ago
    read_pos: usize,
    delay_length: usize,
}

impl DelayLine {
    /// Creates a zeroed delay line.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Ring size in samples
    /// * `delay_length` - Samples between a write and the read that returns it
    ///
    /// # Errors
    ///
    /// [`LimiterError::InvalidDelay`] if either argument is zero,
    /// `delay_length > capacity` or `capacity > MAX_BUFFER_CAPACITY`.
    pub fn new(capacity: usize, delay_length: usize) -> Result<Self, LimiterError> {
        if capacity == 0
            || capacity > MAX_BUFFER_CAPACITY
            || delay_length == 0
            || delay_length > capacity
        {
            return Err(LimiterError::InvalidDelay {
                capacity,
                delay_length,
            });
        }

        Ok(Self {
            buffer: vec![0.0; capacity],
            write_pos: delay_length % capacity,
            read_pos: 0,
            delay_length,
        })
    }

    /// Returns the sample written `delay_length` samples ago.
    ///
    /// Must precede [`write`](Self::write) within a sample cycle.
    #[inline]
    pub fn read(&self) -> f32 {
        self.buffer[self.read_pos]
    }

    /// Stores `sample` at the write cursor without moving either cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
    }

    /// Moves both cursors forward by one slot.
    #[inline]
    pub fn advance(&mut self) {
        let len = self.buffer.len();
        self.write_pos = (self.write_pos + 1) % len;
        self.read_pos = (self.read_pos + 1) % len;
    }

    /// Runs one full sample cycle: read, write `sample`, advance.
    #[inline]
    pub fn read_write_advance(&mut self, sample: f32) -> f32 {
        let delayed = self.read();
        self.write(sample);
        self.advance();
        delayed
    }

    /// Zeroes the storage and restores the initial cursor positions.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = self.delay_length % self.buffer.len();
        self.read_pos = 0;
    }

    /// Ring size in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Delay in samples between a write and the read that returns it.
    pub fn delay_length(&self) -> usize {
        self.delay_length
    }
}
