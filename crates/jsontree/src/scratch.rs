//! Growable byte buffer shared by string decoding and serialization.
//!
//! A [`Scratch`] is owned by one [`Parser`](crate::Parser) or
//! [`Serializer`](crate::Serializer) and is reused across calls, so its
//! capacity survives between documents while its length is logically reset.
//!
//! Nested work follows a stack discipline: take a checkpoint with
//! [`Scratch::len`], push bytes, then either [`Scratch::take_from`] the
//! checkpoint on success or [`Scratch::truncate`] back to it on failure. An
//! in-progress build below the checkpoint is never disturbed.
use alloc::vec::Vec;
use core::fmt;

use bstr::BString;

const MIN_CAPACITY: usize = 64;

#[derive(Debug, Default, Clone)]
pub(crate) struct Scratch {
    bytes: Vec<u8>,
}

impl Scratch {
    /// Creates an empty buffer without allocating.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates an empty buffer able to hold `capacity` bytes before growing.
    #[must_use]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// The accumulated bytes.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub(crate) fn push_byte(&mut self, b: u8) {
        self.grow_for(1);
        self.bytes.push(b);
    }

    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        self.grow_for(bytes.len());
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends formatted text. Writing into the buffer cannot fail.
    pub(crate) fn push_fmt(&mut self, args: fmt::Arguments<'_>) {
        let written = fmt::Write::write_fmt(self, args);
        debug_assert!(written.is_ok(), "Scratch::write_str returned an error");
    }

    /// Logically empties the buffer, keeping its capacity.
    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Restores a checkpoint obtained from [`Scratch::len`].
    pub(crate) fn truncate(&mut self, mark: usize) {
        self.bytes.truncate(mark);
    }

    /// Copies out everything accumulated and logically empties the buffer.
    #[must_use]
    pub(crate) fn take(&mut self) -> BString {
        self.take_from(0)
    }

    /// Copies out the bytes pushed since `mark` and truncates back to it.
    #[must_use]
    pub(crate) fn take_from(&mut self, mark: usize) -> BString {
        let mark = mark.min(self.bytes.len());
        let out = BString::from(&self.bytes[mark..]);
        self.bytes.truncate(mark);
        out
    }

    // Capacity at least doubles and never drops below MIN_CAPACITY.
    #[inline]
    fn grow_for(&mut self, additional: usize) {
        let needed = self.bytes.len() + additional;
        let cap = self.bytes.capacity();
        if needed > cap {
            let target = needed.max(cap * 2).max(MIN_CAPACITY);
            self.bytes.reserve_exact(target - self.bytes.len());
        }
    }
}

impl fmt::Write for Scratch {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}
