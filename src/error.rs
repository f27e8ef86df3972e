/*
 * @file error.rs
 * @brief Fifo operation and construction error types
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

//! FILE: error.rs
//!
//! DESCRIPTION:
//! Fifo Result and Construction Errors.
//!
//! BRIEF:
//! Defines the closed set of outcomes every fifo operation can report.
//! Full, Empty and Busy are steady-state conditions the caller retries on.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: June 12, 2025
//! UPDATE DATE: July 29, 2025

use thiserror::Error;

/// Result of a runtime fifo operation.
///
/// # Details
/// Returned by enqueue, dequeue, skip and flush. Success is `Ok(())`.
/// `Full`, `Empty` and `Busy` leave the fifo untouched and are expected
/// during normal operation; `WrongParam` signals a caller bug.
///
/// # Variants
/// * `Full` - No free slot, element was not stored
/// * `Empty` - No stored element, nothing was read
/// * `WrongParam` - Element buffer does not match the slot size
/// * `Busy` - Same-direction operation already in progress
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoError {
    #[error("Fifo is full")]
    Full,
    #[error("Fifo is empty")]
    Empty,
    #[error("Wrong Parameter")]
    WrongParam,
    #[error("Fifo is busy")]
    Busy,
}

/// Reason a fifo could not be constructed.
///
/// # Details
/// Construction either returns a ready fifo or one of these; no partially
/// initialized handle ever exists.
///
/// # Variants
/// * `NullPointer` - No backing memory was supplied
/// * `InvalidSize` - Capacity is zero, too large, too small, or exceeds the memory
/// * `InvalidElementSize` - Element size is zero or too large
/// * `SizeNotMultiple` - Capacity is not a whole number of elements
/// * `AllocFailed` - The allocator could not provide the buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    #[error("no backing memory supplied")]
    NullPointer,
    #[error("invalid fifo size")]
    InvalidSize,
    #[error("invalid element size")]
    InvalidElementSize,
    #[error("fifo size is not a multiple of the element size")]
    SizeNotMultiple,
    #[error("fifo buffer allocation failed")]
    AllocFailed,
}

/// Numeric codes for construction errors.
impl InitError {
    /// Returns the negative status code for this error.
    ///
    /// # Details
    /// Stable codes for callers that report status as integers,
    /// e.g. across a C boundary or in a log line.
    ///
    /// # Returns
    /// * `i8` - -1 through -5, one per variant
    pub const fn code(self) -> i8 {
        match self {
            InitError::NullPointer => -1,
            InitError::InvalidSize => -2,
            InitError::InvalidElementSize => -3,
            InitError::SizeNotMultiple => -4,
            InitError::AllocFailed => -5,
        }
    }
}
