/*
 * @file critical.rs
 * @brief Critical section hooks guarding the fifo lock flags
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

//! FILE: critical.rs
//!
//! DESCRIPTION:
//! Critical Section Hooks for Lock Flag Updates.
//!
//! BRIEF:
//! Brackets every lock flag test-and-set and release in an enter/leave pair.
//! The default hook does nothing; firmware wires it to interrupt masking.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: June 12, 2025
//! UPDATE DATE: July 29, 2025

/// Scoped enter/leave hook around a lock flag update.
///
/// # Details
/// `with` enters the critical section, runs `f`, then leaves it, so every
/// enter is paired with exactly one leave. The region passed in is only the
/// few instructions that test and set the fifo lock bits; it never copies
/// element data.
pub trait CriticalSection {
    /// Runs `f` inside the critical section.
    ///
    /// # Arguments
    /// * `f` - Closure touching the lock flags
    ///
    /// # Returns
    /// * `R` - Whatever `f` returns
    fn with<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Hook that performs no masking at all.
///
/// # Details
/// Suitable when the fifo is only touched from one execution context.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoCritical;

impl CriticalSection for NoCritical {
    #[inline]
    fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Hook backed by the `critical-section` crate.
///
/// # Details
/// Uses whatever implementation the final binary links: interrupt masking
/// on single-core microcontrollers, a global mutex on std hosts.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlobalCritical;

impl CriticalSection for GlobalCritical {
    #[inline]
    fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_cs| f())
    }
}

impl<T: CriticalSection> CriticalSection for &T {
    #[inline]
    fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        (**self).with(f)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

    /// Counts enter/leave pairs so tests can prove the hook stays balanced.
    #[derive(Default)]
    pub(crate) struct CountingCritical {
        depth: AtomicIsize,
        calls: AtomicUsize,
    }

    impl CountingCritical {
        pub(crate) fn depth(&self) -> isize {
            self.depth.load(Ordering::SeqCst)
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CriticalSection for CountingCritical {
        fn with<R>(&self, f: impl FnOnce() -> R) -> R {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.depth.fetch_add(1, Ordering::SeqCst);
            let out = f();
            self.depth.fetch_sub(1, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            out
        }
    }

    #[test]
    fn test_no_critical_runs_closure() {
        assert_eq!(NoCritical.with(|| 7), 7);
    }

    #[test]
    fn test_global_critical_runs_closure() {
        assert_eq!(GlobalCritical.with(|| 3 + 4), 7);
    }

    #[test]
    fn test_counting_critical_is_balanced() {
        let cs = CountingCritical::default();
        let depth_inside = cs.with(|| cs.depth());
        assert_eq!(depth_inside, 1);
        assert_eq!(cs.depth(), 0);
        assert_eq!(cs.calls(), 2);
    }

    #[test]
    fn test_reference_forwards() {
        let cs = CountingCritical::default();
        let by_ref = &cs;
        by_ref.with(|| ());
        assert_eq!(cs.calls(), 2);
    }
}
