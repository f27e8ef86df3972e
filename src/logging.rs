/*
 * @file logging.rs
 * @brief Internal log macros for defmt, tracing, or nothing
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

//! Log macro selection.
//!
//! `defmt` wins when enabled, then `tracing`; with neither feature the macros
//! expand to nothing beyond evaluating their arguments. The module is
//! `#[macro_use]`d ahead of every other module so the macros resolve by
//! textual scope.

#[cfg(feature = "defmt")]
#[allow(unused_macros)]
macro_rules! debug { ($($arg:tt)*) => { ::defmt::debug!($($arg)*) }; }
#[cfg(feature = "defmt")]
#[allow(unused_macros)]
macro_rules! trace { ($($arg:tt)*) => { ::defmt::trace!($($arg)*) }; }
#[cfg(feature = "defmt")]
#[allow(unused_macros)]
macro_rules! warn { ($($arg:tt)*) => { ::defmt::warn!($($arg)*) }; }

#[cfg(all(not(feature = "defmt"), feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! debug { ($($arg:tt)*) => { ::tracing::debug!($($arg)*) }; }
#[cfg(all(not(feature = "defmt"), feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! trace { ($($arg:tt)*) => { ::tracing::trace!($($arg)*) }; }
#[cfg(all(not(feature = "defmt"), feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! warn { ($($arg:tt)*) => { ::tracing::warn!($($arg)*) }; }

#[cfg(all(not(feature = "defmt"), not(feature = "tracing")))]
#[allow(unused_macros)]
macro_rules! debug { ($($arg:tt)*) => { let _ = ($($arg)*,); }; }
#[cfg(all(not(feature = "defmt"), not(feature = "tracing")))]
#[allow(unused_macros)]
macro_rules! trace { ($($arg:tt)*) => { let _ = ($($arg)*,); }; }
#[cfg(all(not(feature = "defmt"), not(feature = "tracing")))]
#[allow(unused_macros)]
macro_rules! warn { ($($arg:tt)*) => { let _ = ($($arg)*,); }; }

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_accept_format_arguments() {
        let slots = 4usize;
        let bytes = 16usize;
        debug!("fifo bound: {} slots of {} bytes", slots, bytes);
        trace!("fifo flushed");
        warn!("fifo allocation of {} bytes failed", bytes);
        assert_eq!(slots * 4, bytes);
    }
}
