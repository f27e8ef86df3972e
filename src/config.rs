/*
 * @file config.rs
 * @brief Fifo size limits and lock flag constants
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

//! Compile-time limits and lock bit layout.

/// Largest backing region, in bytes, a single fifo may span.
pub const MAX_FIFO_SIZE: usize = u16::MAX as usize;

/// Largest element a single slot may hold, in bytes.
pub const MAX_ELEMENT_SIZE: usize = u8::MAX as usize;

/// Smallest slot count that can hold data; one slot is always kept free.
pub const MIN_SLOTS: usize = 2;

/// Lock bit set while a write-side operation is in progress.
pub const WRITE_LOCK: u8 = 0x01;

/// Lock bit set while a read-side operation is in progress.
pub const READ_LOCK: u8 = 0x02;

/// Both lock bits, taken together by `flush`.
pub const BOTH_LOCKS: u8 = WRITE_LOCK | READ_LOCK;
