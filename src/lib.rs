/*
 * @file lib.rs
 * @brief Slotring library root
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

//! Slotring - fixed-slot single-producer/single-consumer ring buffer.
//!
//! This library provides a FIFO over a fixed byte region split into equal
//! slots, meant to sit between an interrupt handler and a main loop, or
//! between two tasks:
//! - One writer and one reader may run concurrently
//! - Same-direction re-entry is rejected as [`FifoError::Busy`], never blocked
//! - Lock bit updates run inside a pluggable [`CriticalSection`] hook
//! - Skip operations move the cursors for callers that touch memory directly
//!
//! Enable `alloc` for the allocating constructors, `defmt` or `tracing`
//! for lifecycle logs.
//!
//! # Example
//! ```
//! use slotring::{Fifo, FifoError};
//!
//! let mut memory = [0u8; 8];
//! let fifo = Fifo::new(&mut memory, 1)?;
//! for byte in b"Hello" {
//!     fifo.enqueue(&[*byte])?;
//! }
//! assert_eq!(fifo.level(), 5);
//!
//! let mut out = [0u8; 1];
//! fifo.dequeue(&mut out)?;
//! assert_eq!(out, *b"H");
//!
//! fifo.flush()?;
//! assert_eq!(fifo.dequeue(&mut out), Err(FifoError::Empty));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod logging;

pub mod config;
pub mod critical;
pub mod error;
pub mod lock;
pub mod ring_buffer;
pub mod typed;

pub use critical::{CriticalSection, GlobalCritical, NoCritical};
pub use error::{FifoError, InitError};
pub use lock::LockState;
pub use ring_buffer::Fifo;
pub use typed::TypedFifo;
