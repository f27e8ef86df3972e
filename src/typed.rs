/*
 * @file typed.rs
 * @brief Typed wrapper over the byte fifo
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

//! FILE: typed.rs
//!
//! DESCRIPTION:
//! Typed Fifo Wrapper.
//!
//! BRIEF:
//! Fixes the element size to a Rust type so callers push and pop values
//! instead of byte slices. All index logic stays in the byte engine.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: July 29, 2025
//! UPDATE DATE: July 29, 2025

use crate::critical::{CriticalSection, NoCritical};
use crate::error::{FifoError, InitError};
use crate::lock::LockState;
use crate::ring_buffer::Fifo;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ptr::NonNull;

/// Fifo of `T` values.
///
/// # Details
/// Each slot holds the bytes of one `T`. The byte-level view is not
/// exposed and there is no `skip_write`, so every slot `pop` reads was
/// filled by `push`.
pub struct TypedFifo<'a, T: Copy, C: CriticalSection = NoCritical> {
    fifo: Fifo<'a, C>,
    _element: PhantomData<T>,
}

impl<'a, T: Copy> TypedFifo<'a, T, NoCritical> {
    /// Binds a typed fifo to caller storage.
    ///
    /// # Arguments
    /// * `memory` - Slots; `memory.len() - 1` values fit
    ///
    /// # Returns
    /// * `Result<Self, InitError>` - As for [`Fifo::init_with_critical`]
    pub fn new(memory: &'a mut [T]) -> Result<Self, InitError> {
        Self::with_critical(memory, NoCritical)
    }
}

#[cfg(feature = "alloc")]
impl<T: Copy> TypedFifo<'static, T, NoCritical> {
    /// Allocates a typed fifo with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, InitError> {
        Self::with_capacity_and_critical(capacity, NoCritical)
    }
}

#[cfg(feature = "alloc")]
impl<T: Copy, C: CriticalSection> TypedFifo<'static, T, C> {
    /// Allocates a typed fifo with `capacity` slots and a custom hook.
    pub fn with_capacity_and_critical(capacity: usize, critical: C) -> Result<Self, InitError> {
        let fifo = Fifo::with_capacity_and_critical(capacity, mem::size_of::<T>(), critical)?;
        Ok(Self {
            fifo,
            _element: PhantomData,
        })
    }
}

impl<'a, T: Copy, C: CriticalSection> TypedFifo<'a, T, C> {
    /// Binds a typed fifo to caller storage with a custom hook.
    ///
    /// # Details
    /// Zero-sized types are rejected since a slot must hold at least one byte.
    ///
    /// # Arguments
    /// * `memory` - Slots; `memory.len() - 1` values fit
    /// * `critical` - Hook bracketing lock bit updates
    ///
    /// # Returns
    /// * `Ok(TypedFifo)` - Empty, idle fifo
    /// * `Err(InitError)` - Invalid storage
    pub fn with_critical(memory: &'a mut [T], critical: C) -> Result<Self, InitError> {
        let element_size = mem::size_of::<T>();
        if element_size == 0 {
            return Err(InitError::InvalidElementSize);
        }
        let len = mem::size_of_val(memory);
        let region = NonNull::from(memory).cast::<u8>();
        // SAFETY: `region` covers `len` bytes exclusively borrowed for `'a`,
        // and slots are only accessed as whole `T` values.
        let fifo = unsafe { Fifo::bind_raw(region, len, len, element_size, critical)? };
        Ok(Self {
            fifo,
            _element: PhantomData,
        })
    }

    /// Puts one value into the fifo.
    ///
    /// # Returns
    /// * `Ok(())` - Value stored
    /// * `Err(FifoError::Busy | FifoError::Full)` - Value not stored
    pub fn push(&self, value: T) -> Result<(), FifoError> {
        let src = (&value as *const T).cast::<u8>();
        // SAFETY: `src` covers exactly one `T`, outside the backing region.
        unsafe { self.fifo.put_raw(src) }
    }

    /// Takes the oldest value out of the fifo.
    ///
    /// # Returns
    /// * `Ok(T)` - The value
    /// * `Err(FifoError::Busy | FifoError::Empty)` - Nothing read
    pub fn pop(&self) -> Result<T, FifoError> {
        let mut out = MaybeUninit::<T>::uninit();
        // SAFETY: a successful read copies the full bytes of a `T` that was
        // stored by `push` into `out`.
        unsafe {
            self.fifo.get_raw(out.as_mut_ptr().cast::<u8>())?;
            Ok(out.assume_init())
        }
    }

    pub fn flush(&self) -> Result<(), FifoError> {
        self.fifo.flush()
    }

    pub fn skip_read(&self, n: usize) -> Result<(), FifoError> {
        self.fifo.skip_read(n)
    }

    pub fn level(&self) -> usize {
        self.fifo.level()
    }

    pub fn empty_space(&self) -> usize {
        self.fifo.empty_space()
    }

    pub fn has_elements_left(&self) -> bool {
        self.fifo.has_elements_left()
    }

    pub fn has_space_left(&self) -> bool {
        self.fifo.has_space_left()
    }

    /// Total slot count, including the one that always stays free.
    pub fn size(&self) -> usize {
        self.fifo.size()
    }

    pub fn capacity(&self) -> usize {
        self.fifo.capacity()
    }

    pub fn lock_state(&self) -> LockState {
        self.fifo.lock_state()
    }
}

impl<T: Copy, C: CriticalSection> fmt::Debug for TypedFifo<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedFifo").field("fifo", &self.fifo).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Sample {
        channel: u8,
        value: u32,
    }

    #[test]
    fn test_push_pop_u32() {
        let mut mem = [0u32; 11];
        let fifo = TypedFifo::new(&mut mem).unwrap();
        assert_eq!(fifo.capacity(), 10);
        for round in 0..10u32 {
            for i in 0..10 {
                fifo.push(round * 10 + i).unwrap();
            }
            assert_eq!(fifo.push(0), Err(FifoError::Full));
            for i in 0..10 {
                assert_eq!(fifo.pop(), Ok(round * 10 + i));
            }
        }
        assert_eq!(fifo.pop(), Err(FifoError::Empty));
    }

    #[test]
    fn test_push_pop_struct() {
        let mut mem = [Sample { channel: 0, value: 0 }; 4];
        let fifo = TypedFifo::new(&mut mem).unwrap();
        let a = Sample { channel: 1, value: 0xDEAD_BEEF };
        let b = Sample { channel: 2, value: 7 };
        fifo.push(a).unwrap();
        fifo.push(b).unwrap();
        assert_eq!(fifo.level(), 2);
        assert_eq!(fifo.pop(), Ok(a));
        assert_eq!(fifo.pop(), Ok(b));
    }

    #[test]
    fn test_zero_sized_rejected() {
        let mut mem = [(); 8];
        assert_eq!(
            TypedFifo::new(&mut mem).unwrap_err(),
            InitError::InvalidElementSize
        );
    }

    #[test]
    fn test_single_slot_rejected() {
        let mut mem = [0u16; 1];
        assert_eq!(TypedFifo::new(&mut mem).unwrap_err(), InitError::InvalidSize);
    }

    #[test]
    fn test_flush_and_skip() {
        let mut mem = [0u8; 8];
        let fifo = TypedFifo::new(&mut mem).unwrap();
        for byte in b"Hello" {
            fifo.push(*byte).unwrap();
        }
        fifo.skip_read(1).unwrap();
        assert_eq!(fifo.pop(), Ok(b'e'));
        fifo.flush().unwrap();
        assert!(!fifo.has_elements_left());
        assert!(fifo.has_space_left());
        assert_eq!(fifo.empty_space(), 7);
        assert_eq!(fifo.skip_read(1), Err(FifoError::Empty));
        assert_eq!(fifo.lock_state(), LockState::Idle);
    }

    #[test]
    fn test_storage_holds_values_after_drop() {
        let mut mem = [0u16; 4];
        {
            let fifo = TypedFifo::new(&mut mem).unwrap();
            fifo.push(0x1234).unwrap();
            fifo.push(0x5678).unwrap();
        }
        assert_eq!(mem, [0, 0x1234, 0x5678, 0]);
    }

    #[test]
    fn test_nonzero_values_come_only_from_push() {
        use core::num::NonZeroU8;
        let one = NonZeroU8::MIN;
        let mut mem = [one; 4];
        let fifo = TypedFifo::new(&mut mem).unwrap();
        assert_eq!(fifo.pop(), Err(FifoError::Empty));
        fifo.push(NonZeroU8::MAX).unwrap();
        fifo.push(one).unwrap();
        fifo.skip_read(1).unwrap();
        assert_eq!(fifo.pop().map(NonZeroU8::get), Ok(1));
        assert_eq!(fifo.pop(), Err(FifoError::Empty));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_allocated_nonzero_starts_empty() {
        use core::num::NonZeroU8;
        let fifo = TypedFifo::<NonZeroU8>::with_capacity(4).unwrap();
        assert_eq!(fifo.pop(), Err(FifoError::Empty));
        assert_eq!(fifo.skip_read(1), Err(FifoError::Empty));
        fifo.push(NonZeroU8::MAX).unwrap();
        assert_eq!(fifo.pop().map(NonZeroU8::get), Ok(u8::MAX));
        assert_eq!(fifo.level(), 0);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_with_capacity() {
        let fifo = TypedFifo::<u64>::with_capacity(16).unwrap();
        assert_eq!(fifo.size(), 16);
        fifo.push(u64::MAX).unwrap();
        assert_eq!(fifo.pop(), Ok(u64::MAX));
        assert_eq!(
            TypedFifo::<()>::with_capacity(16).unwrap_err(),
            InitError::InvalidElementSize
        );
    }
}
