/*
 * @file lock.rs
 * @brief Read/write lock flags rejecting re-entrant fifo access
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

//! FILE: lock.rs
//!
//! DESCRIPTION:
//! Per-Direction Re-entrancy Lock.
//!
//! BRIEF:
//! Two lock bits, one for the write path and one for the read path.
//! A call that finds its own bit set is rejected as Busy, never blocked.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: June 12, 2025
//! UPDATE DATE: July 29, 2025

use crate::config::{BOTH_LOCKS, READ_LOCK, WRITE_LOCK};
use crate::critical::CriticalSection;
use crate::error::FifoError;
use core::sync::atomic::{AtomicU8, Ordering};

/// Snapshot of which fifo directions are in use.
///
/// # Variants
/// * `Idle` - No operation in progress
/// * `WriteBusy` - Enqueue or skip-write in progress
/// * `ReadBusy` - Dequeue or skip-read in progress
/// * `Both` - Flush in progress, or one call per direction at once
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    Idle,
    WriteBusy,
    ReadBusy,
    Both,
}

impl LockState {
    /// Decodes the raw lock bits.
    fn from_bits(bits: u8) -> Self {
        match bits & BOTH_LOCKS {
            0 => LockState::Idle,
            WRITE_LOCK => LockState::WriteBusy,
            READ_LOCK => LockState::ReadBusy,
            _ => LockState::Both,
        }
    }

    /// Encodes the state back into lock bits.
    #[cfg(test)]
    pub(crate) fn bits(self) -> u8 {
        match self {
            LockState::Idle => 0,
            LockState::WriteBusy => WRITE_LOCK,
            LockState::ReadBusy => READ_LOCK,
            LockState::Both => BOTH_LOCKS,
        }
    }
}

/// Which side of the fifo an operation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Write,
    Read,
    Both,
}

impl Direction {
    const fn bits(self) -> u8 {
        match self {
            Direction::Write => WRITE_LOCK,
            Direction::Read => READ_LOCK,
            Direction::Both => BOTH_LOCKS,
        }
    }
}

/// The lock bits shared by the reader and writer contexts.
///
/// # Details
/// Stored as an atomic so the test-and-set cannot tear even when the
/// critical section hook is a no-op.
#[derive(Debug, Default)]
pub(crate) struct LockFlags {
    bits: AtomicU8,
}

impl LockFlags {
    /// Creates an unlocked flag set.
    pub(crate) const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Returns the current lock state.
    pub(crate) fn state(&self) -> LockState {
        LockState::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Claims the lock bits for `dir`.
    ///
    /// # Details
    /// Tests and sets the bits inside `cs`. For a single direction only
    /// that direction's bit matters; `Both` requires the fifo to be idle.
    ///
    /// # Arguments
    /// * `dir` - Direction to lock
    /// * `cs` - Critical section hook bracketing the update
    ///
    /// # Returns
    /// * `Ok(LockGuard)` - Bits held until the guard drops
    /// * `Err(FifoError::Busy)` - Bits already held, nothing changed
    pub(crate) fn acquire<'l, C: CriticalSection>(
        &'l self,
        dir: Direction,
        cs: &'l C,
    ) -> Result<LockGuard<'l, C>, FifoError> {
        let bits = dir.bits();
        let claimed = cs.with(|| match dir {
            Direction::Both => self
                .bits
                .compare_exchange(0, BOTH_LOCKS, Ordering::AcqRel, Ordering::Acquire)
                .is_ok(),
            Direction::Write | Direction::Read => {
                (self.bits.fetch_or(bits, Ordering::AcqRel) & bits) == 0
            }
        });
        if !claimed {
            return Err(FifoError::Busy);
        }
        Ok(LockGuard {
            flags: self,
            cs,
            bits,
        })
    }

    /// Overwrites the lock bits.
    #[cfg(test)]
    pub(crate) fn force(&self, state: LockState) {
        self.bits.store(state.bits(), Ordering::Release);
    }
}

/// Holds lock bits and clears them through the hook on drop.
pub(crate) struct LockGuard<'l, C: CriticalSection> {
    flags: &'l LockFlags,
    cs: &'l C,
    bits: u8,
}

impl<C: CriticalSection> Drop for LockGuard<'_, C> {
    fn drop(&mut self) {
        let bits = self.bits;
        self.cs.with(|| {
            self.flags.bits.fetch_and(!bits, Ordering::Release);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critical::NoCritical;
    use crate::critical::tests::CountingCritical;

    #[test]
    fn test_new_flags_are_idle() {
        assert_eq!(LockFlags::new().state(), LockState::Idle);
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let flags = LockFlags::new();
        {
            let _guard = flags.acquire(Direction::Write, &NoCritical).unwrap();
            assert_eq!(flags.state(), LockState::WriteBusy);
        }
        assert_eq!(flags.state(), LockState::Idle);
    }

    #[test]
    fn test_same_direction_is_busy() {
        let flags = LockFlags::new();
        let _guard = flags.acquire(Direction::Read, &NoCritical).unwrap();
        assert!(matches!(
            flags.acquire(Direction::Read, &NoCritical),
            Err(FifoError::Busy)
        ));
        assert_eq!(flags.state(), LockState::ReadBusy);
    }

    #[test]
    fn test_directions_are_independent() {
        let flags = LockFlags::new();
        let _w = flags.acquire(Direction::Write, &NoCritical).unwrap();
        let _r = flags.acquire(Direction::Read, &NoCritical).unwrap();
        assert_eq!(flags.state(), LockState::Both);
    }

    #[test]
    fn test_both_requires_idle() {
        let flags = LockFlags::new();
        flags.force(LockState::ReadBusy);
        assert!(flags.acquire(Direction::Both, &NoCritical).is_err());
        assert_eq!(flags.state(), LockState::ReadBusy);
        flags.force(LockState::WriteBusy);
        assert!(flags.acquire(Direction::Both, &NoCritical).is_err());
        flags.force(LockState::Idle);
        let guard = flags.acquire(Direction::Both, &NoCritical).unwrap();
        assert_eq!(flags.state(), LockState::Both);
        drop(guard);
        assert_eq!(flags.state(), LockState::Idle);
    }

    #[test]
    fn test_acquire_and_release_use_hook() {
        let flags = LockFlags::new();
        let cs = CountingCritical::default();
        drop(flags.acquire(Direction::Write, &cs).unwrap());
        assert_eq!(cs.calls(), 4);
        assert_eq!(cs.depth(), 0);
    }

    #[test]
    fn test_busy_does_not_touch_hook_twice() {
        let flags = LockFlags::new();
        flags.force(LockState::WriteBusy);
        let cs = CountingCritical::default();
        assert!(flags.acquire(Direction::Write, &cs).is_err());
        assert_eq!(cs.calls(), 2);
        assert_eq!(flags.state(), LockState::WriteBusy);
    }
}
