/*
 * @file ring_buffer.rs
 * @brief Fixed-slot SPSC ring buffer engine
 * @author Kevin Thomas
 * @date 2025
 *
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! FILE: ring_buffer.rs
//!
//! DESCRIPTION:
//! Fixed-Slot Ring Buffer Engine.
//!
//! BRIEF:
//! Single-producer/single-consumer FIFO over a byte region split into
//! equal slots. One slot is sacrificed so full and empty need no counter.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: June 12, 2025
//! UPDATE DATE: July 29, 2025

use crate::config::{MAX_ELEMENT_SIZE, MAX_FIFO_SIZE, MIN_SLOTS};
use crate::critical::{CriticalSection, NoCritical};
use crate::error::{FifoError, InitError};
use crate::lock::{Direction, LockFlags, LockState};
use core::fmt;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "alloc")]
use alloc::alloc::{Layout, alloc_zeroed};
#[cfg(feature = "alloc")]
use alloc::boxed::Box;

/// Fixed-slot FIFO shared between one writer and one reader context.
///
/// # Details
/// Offsets are byte offsets into the backing region, always a multiple of
/// the element size. The writer claims the slot after `write_idx` and then
/// publishes it; the reader consumes the slot after `read_idx`. The buffer
/// is empty when both offsets match and full when the next write slot is
/// the current read offset, so `size() - 1` elements fit.
///
/// # Fields
/// * `memory` - Start of the backing region
/// * `size` - Backing region length in bytes
/// * `element_size` - Bytes per slot
/// * `read_idx` - Offset of the last consumed slot
/// * `write_idx` - Offset of the last produced slot
/// * `lock` - Per-direction re-entrancy bits
/// * `critical` - Hook bracketing lock bit updates
/// * `owned` - Whether drop frees `memory`
pub struct Fifo<'a, C: CriticalSection = NoCritical> {
    memory: NonNull<u8>,
    size: usize,
    element_size: usize,
    read_idx: AtomicUsize,
    write_idx: AtomicUsize,
    lock: LockFlags,
    critical: C,
    owned: bool,
    _memory: PhantomData<&'a mut [u8]>,
}

// SAFETY: the region is exclusively borrowed or owned by the fifo, and all
// access to it goes through the lock protocol below.
unsafe impl<C: CriticalSection + Send> Send for Fifo<'_, C> {}

// SAFETY: the writer only touches the slot it has claimed and not yet
// published, the reader only touches slots already published, and each
// direction is serialized by its atomic lock bit. Cursors are published
// with release ordering and observed with acquire ordering.
unsafe impl<C: CriticalSection + Sync> Sync for Fifo<'_, C> {}

/// Checks a byte capacity and element size pair.
///
/// # Arguments
/// * `capacity_bytes` - Backing region length in bytes
/// * `element_size` - Bytes per slot
///
/// # Returns
/// * `Ok(())` - Valid layout with at least two slots
/// * `Err(InitError)` - First violated rule
fn check_layout(capacity_bytes: usize, element_size: usize) -> Result<(), InitError> {
    if capacity_bytes == 0 || capacity_bytes > MAX_FIFO_SIZE {
        return Err(InitError::InvalidSize);
    }
    if element_size == 0 || element_size > MAX_ELEMENT_SIZE {
        return Err(InitError::InvalidElementSize);
    }
    if capacity_bytes % element_size != 0 {
        return Err(InitError::SizeNotMultiple);
    }
    if capacity_bytes / element_size < MIN_SLOTS {
        return Err(InitError::InvalidSize);
    }
    Ok(())
}

impl<'a> Fifo<'a, NoCritical> {
    /// Binds a fifo to the whole of `memory`.
    ///
    /// # Arguments
    /// * `memory` - Caller-owned backing region
    /// * `element_size` - Bytes per element
    ///
    /// # Returns
    /// * `Result<Self, InitError>` - See [`Fifo::init_with_critical`]
    pub fn new(memory: &'a mut [u8], element_size: usize) -> Result<Self, InitError> {
        let capacity_bytes = memory.len();
        Self::init(memory, capacity_bytes, element_size)
    }

    /// Binds a fifo to the first `capacity_bytes` of `memory`.
    pub fn init(
        memory: &'a mut [u8],
        capacity_bytes: usize,
        element_size: usize,
    ) -> Result<Self, InitError> {
        Self::init_with_critical(memory, capacity_bytes, element_size, NoCritical)
    }
}

#[cfg(feature = "alloc")]
impl Fifo<'static, NoCritical> {
    /// Allocates a fifo holding `capacity` slots of `element_size` bytes.
    pub fn with_capacity(capacity: usize, element_size: usize) -> Result<Self, InitError> {
        Self::with_capacity_and_critical(capacity, element_size, NoCritical)
    }
}

#[cfg(feature = "alloc")]
impl<C: CriticalSection> Fifo<'static, C> {
    /// Allocates a fifo that owns its buffer.
    ///
    /// # Details
    /// Capacity is given in elements. The buffer is allocated zeroed with
    /// exactly `capacity * element_size` bytes in a single fallible call, so
    /// an exhausted heap is reported instead of aborting. The buffer is freed
    /// when the fifo drops.
    ///
    /// # Arguments
    /// * `capacity` - Slot count, one of which stays free
    /// * `element_size` - Bytes per element
    /// * `critical` - Hook bracketing lock bit updates
    ///
    /// # Returns
    /// * `Ok(Fifo)` - Empty, idle fifo
    /// * `Err(InitError)` - Invalid layout or `AllocFailed`
    pub fn with_capacity_and_critical(
        capacity: usize,
        element_size: usize,
        critical: C,
    ) -> Result<Self, InitError> {
        if capacity == 0 {
            return Err(InitError::InvalidSize);
        }
        if element_size == 0 || element_size > MAX_ELEMENT_SIZE {
            return Err(InitError::InvalidElementSize);
        }
        let size = capacity
            .checked_mul(element_size)
            .ok_or(InitError::InvalidSize)?;
        check_layout(size, element_size)?;

        let layout = Layout::array::<u8>(size).map_err(|_| InitError::InvalidSize)?;
        // SAFETY: `layout` is non-zero sized since `check_layout` accepted `size`.
        let Some(memory) = NonNull::new(unsafe { alloc_zeroed(layout) }) else {
            warn!("fifo allocation of {} bytes failed", size);
            return Err(InitError::AllocFailed);
        };
        debug!("fifo allocated: {} slots of {} bytes", capacity, element_size);
        Ok(Self::from_parts(memory, size, element_size, critical, true))
    }
}

impl<'a, C: CriticalSection> Fifo<'a, C> {
    /// Binds a fifo to caller memory with a custom critical section hook.
    ///
    /// # Details
    /// Checks, in order: memory present, capacity in `1..=MAX_FIFO_SIZE`,
    /// element size in `1..=MAX_ELEMENT_SIZE`, capacity a whole number of
    /// elements, capacity within `memory` and at least two slots. On
    /// success both offsets start at zero and the lock is idle.
    ///
    /// # Arguments
    /// * `memory` - Caller-owned backing region, must outlive the fifo
    /// * `capacity_bytes` - Bytes of `memory` to use
    /// * `element_size` - Bytes per element
    /// * `critical` - Hook bracketing lock bit updates
    ///
    /// # Returns
    /// * `Ok(Fifo)` - Empty, idle fifo
    /// * `Err(InitError)` - First violated rule; `memory` is untouched
    pub fn init_with_critical(
        memory: &'a mut [u8],
        capacity_bytes: usize,
        element_size: usize,
        critical: C,
    ) -> Result<Self, InitError> {
        let len = memory.len();
        let region = NonNull::from(memory).cast::<u8>();
        // SAFETY: `region` is valid for `len` bytes for `'a`, exclusively borrowed.
        unsafe { Self::bind_raw(region, len, capacity_bytes, element_size, critical) }
    }

    /// Binds a fifo to a raw region of `len` bytes.
    ///
    /// # Safety
    /// `region` must be valid for reads and writes of `len` bytes for `'a`
    /// and not accessed through any other path while the fifo lives.
    pub(crate) unsafe fn bind_raw(
        region: NonNull<u8>,
        len: usize,
        capacity_bytes: usize,
        element_size: usize,
        critical: C,
    ) -> Result<Self, InitError> {
        if len == 0 {
            return Err(InitError::NullPointer);
        }
        check_layout(capacity_bytes, element_size)?;
        if len < capacity_bytes {
            return Err(InitError::InvalidSize);
        }
        debug!(
            "fifo bound: {} slots of {} bytes",
            capacity_bytes / element_size,
            element_size
        );
        Ok(Self::from_parts(region, capacity_bytes, element_size, critical, false))
    }

    fn from_parts(
        memory: NonNull<u8>,
        size: usize,
        element_size: usize,
        critical: C,
        owned: bool,
    ) -> Self {
        Self {
            memory,
            size,
            element_size,
            read_idx: AtomicUsize::new(0),
            write_idx: AtomicUsize::new(0),
            lock: LockFlags::new(),
            critical,
            owned,
            _memory: PhantomData,
        }
    }

    /// Puts one element into the fifo.
    ///
    /// # Details
    /// Claims the slot after the write offset, copies `element` into it,
    /// then publishes the new write offset. Nothing is written when the
    /// fifo is full or the write side is busy.
    ///
    /// # Arguments
    /// * `element` - Exactly `element_size()` bytes
    ///
    /// # Returns
    /// * `Ok(())` - Element stored
    /// * `Err(FifoError::WrongParam)` - Length mismatch
    /// * `Err(FifoError::Busy)` - Another write is in progress
    /// * `Err(FifoError::Full)` - No free slot
    pub fn enqueue(&self, element: &[u8]) -> Result<(), FifoError> {
        if element.len() != self.element_size {
            return Err(FifoError::WrongParam);
        }
        // SAFETY: `element` holds exactly one element.
        unsafe { self.put_raw(element.as_ptr()) }
    }

    /// Takes the oldest element out of the fifo.
    ///
    /// # Details
    /// Copies the slot after the read offset into `out`, then publishes the
    /// new read offset. `out` is untouched on any error.
    ///
    /// # Arguments
    /// * `out` - Exactly `element_size()` bytes of destination
    ///
    /// # Returns
    /// * `Ok(())` - `out` holds the element
    /// * `Err(FifoError::WrongParam)` - Length mismatch
    /// * `Err(FifoError::Busy)` - Another read is in progress
    /// * `Err(FifoError::Empty)` - Nothing stored
    pub fn dequeue(&self, out: &mut [u8]) -> Result<(), FifoError> {
        if out.len() != self.element_size {
            return Err(FifoError::WrongParam);
        }
        // SAFETY: `out` has room for exactly one element.
        unsafe { self.get_raw(out.as_mut_ptr()) }
    }

    /// Write path shared with the typed wrapper.
    ///
    /// # Safety
    /// `src` must be valid for reads of `element_size` bytes and must not
    /// point into the backing region.
    pub(crate) unsafe fn put_raw(&self, src: *const u8) -> Result<(), FifoError> {
        let _guard = self.lock.acquire(Direction::Write, &self.critical)?;
        let write = self.write_idx.load(Ordering::Relaxed);
        let next = self.advance(write, 1);
        if next == self.read_idx.load(Ordering::Acquire) {
            return Err(FifoError::Full);
        }
        // SAFETY: the reader never touches the slot at `next` until the
        // store below publishes it; the caller vouches for `src`.
        unsafe { ptr::copy_nonoverlapping(src, self.slot(next), self.element_size) };
        self.write_idx.store(next, Ordering::Release);
        Ok(())
    }

    /// Read path shared with the typed wrapper.
    ///
    /// # Safety
    /// `dst` must be valid for writes of `element_size` bytes and must not
    /// point into the backing region.
    pub(crate) unsafe fn get_raw(&self, dst: *mut u8) -> Result<(), FifoError> {
        let _guard = self.lock.acquire(Direction::Read, &self.critical)?;
        let read = self.read_idx.load(Ordering::Relaxed);
        if self.write_idx.load(Ordering::Acquire) == read {
            return Err(FifoError::Empty);
        }
        let next = self.advance(read, 1);
        // SAFETY: the slot at `next` was published by the writer and is not
        // reclaimed until the store below releases it.
        unsafe { ptr::copy_nonoverlapping(self.slot(next), dst, self.element_size) };
        self.read_idx.store(next, Ordering::Release);
        Ok(())
    }

    /// Returns `true` when at least one element is stored.
    pub fn has_elements_left(&self) -> bool {
        self.write_idx.load(Ordering::Acquire) != self.read_idx.load(Ordering::Acquire)
    }

    /// Returns `true` when at least one more element fits.
    pub fn has_space_left(&self) -> bool {
        let next = self.advance(self.write_idx.load(Ordering::Acquire), 1);
        next != self.read_idx.load(Ordering::Acquire)
    }

    /// Discards every stored element.
    ///
    /// # Details
    /// Moves the read offset onto the write offset without touching the
    /// backing memory. Needs both directions idle; refuses and changes
    /// nothing otherwise.
    ///
    /// # Returns
    /// * `Ok(())` - Fifo is empty
    /// * `Err(FifoError::Busy)` - A read or write is in progress
    pub fn flush(&self) -> Result<(), FifoError> {
        let _guard = self.lock.acquire(Direction::Both, &self.critical)?;
        let write = self.write_idx.load(Ordering::Acquire);
        self.read_idx.store(write, Ordering::Release);
        trace!("fifo flushed");
        Ok(())
    }

    /// Returns the number of stored elements.
    ///
    /// # Details
    /// Wraparound aware: when the write offset is behind the read offset the
    /// stored span runs from the read offset to the end and on from zero.
    pub fn level(&self) -> usize {
        let write = self.write_idx.load(Ordering::Acquire);
        let read = self.read_idx.load(Ordering::Acquire);
        let bytes = if write >= read {
            write - read
        } else {
            self.size - read + write
        };
        bytes / self.element_size
    }

    /// Returns how many elements can still be enqueued.
    pub fn empty_space(&self) -> usize {
        self.capacity() - self.level()
    }

    /// Drops up to `n` elements without copying them out.
    ///
    /// # Details
    /// `n` is clamped to the current level. Used after reading the backing
    /// memory directly to let the read offset catch up.
    ///
    /// # Arguments
    /// * `n` - Elements to skip
    ///
    /// # Returns
    /// * `Ok(())` - Read offset advanced by `min(n, level)`
    /// * `Err(FifoError::Busy)` - Another read is in progress
    /// * `Err(FifoError::Empty)` - Nothing stored
    pub fn skip_read(&self, n: usize) -> Result<(), FifoError> {
        let _guard = self.lock.acquire(Direction::Read, &self.critical)?;
        let level = self.level();
        if level == 0 {
            return Err(FifoError::Empty);
        }
        let read = self.read_idx.load(Ordering::Relaxed);
        self.read_idx
            .store(self.advance(read, n.min(level)), Ordering::Release);
        Ok(())
    }

    /// Claims up to `n` slots without copying into them.
    ///
    /// # Details
    /// `n` is clamped to the free space. Used after writing the backing
    /// memory directly to publish what was written.
    ///
    /// # Arguments
    /// * `n` - Elements to publish
    ///
    /// # Returns
    /// * `Ok(())` - Write offset advanced by `min(n, empty_space)`
    /// * `Err(FifoError::Busy)` - Another write is in progress
    /// * `Err(FifoError::Full)` - No free slot
    pub fn skip_write(&self, n: usize) -> Result<(), FifoError> {
        let _guard = self.lock.acquire(Direction::Write, &self.critical)?;
        let space = self.empty_space();
        if space == 0 {
            return Err(FifoError::Full);
        }
        let write = self.write_idx.load(Ordering::Relaxed);
        self.write_idx
            .store(self.advance(write, n.min(space)), Ordering::Release);
        Ok(())
    }

    /// Address of the first slot.
    pub fn start_ptr(&self) -> *mut u8 {
        self.memory.as_ptr()
    }

    /// Address of the last slot.
    ///
    /// # Details
    /// Escape hatch for callers that fill or drain the region themselves
    /// (e.g. by DMA). Writing through it bypasses the lock protocol; follow
    /// up with [`Fifo::skip_write`] or [`Fifo::skip_read`] at once.
    pub fn end_ptr(&self) -> *mut u8 {
        self.slot(self.size - self.element_size)
    }

    /// Total slot count, including the one that always stays free.
    pub fn size(&self) -> usize {
        self.size / self.element_size
    }

    /// Most elements the fifo can hold at once.
    pub fn capacity(&self) -> usize {
        self.size() - 1
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn byte_size(&self) -> usize {
        self.size
    }

    /// Byte offset of the last consumed slot.
    pub fn read_offset(&self) -> usize {
        self.read_idx.load(Ordering::Acquire)
    }

    /// Byte offset of the last produced slot.
    pub fn write_offset(&self) -> usize {
        self.write_idx.load(Ordering::Acquire)
    }

    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    /// Returns `true` when dropping the fifo frees its buffer.
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Advances `idx` by `slots` elements, wrapping at the region end.
    fn advance(&self, idx: usize, slots: usize) -> usize {
        let next = (idx + slots * self.element_size) % self.size;
        debug_assert_eq!(next % self.element_size, 0);
        next
    }

    /// Pointer to the slot starting at byte `offset`.
    fn slot(&self, offset: usize) -> *mut u8 {
        debug_assert_eq!(offset % self.element_size, 0);
        debug_assert!(offset + self.element_size <= self.size);
        self.memory.as_ptr().wrapping_add(offset)
    }
}

impl<C: CriticalSection> Drop for Fifo<'_, C> {
    fn drop(&mut self) {
        #[cfg(feature = "alloc")]
        if self.owned {
            trace!("fifo released: {} bytes", self.size);
            let region = ptr::slice_from_raw_parts_mut(self.memory.as_ptr(), self.size);
            // SAFETY: owned regions come from `alloc_zeroed` with the layout of a
            // `[u8]` of exactly `size` bytes, which is the layout `Box<[u8]>`
            // frees with. They are freed only here.
            drop(unsafe { Box::from_raw(region) });
        }
    }
}

impl<C: CriticalSection> fmt::Debug for Fifo<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fifo")
            .field("memory", &self.memory)
            .field("size", &self.size)
            .field("element_size", &self.element_size)
            .field("read_idx", &self.read_offset())
            .field("write_idx", &self.write_offset())
            .field("lock", &self.lock_state())
            .field("owned", &self.owned)
            .finish()
    }
}
