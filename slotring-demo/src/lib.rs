/*
 * @file lib.rs
 * @brief Slotring demo library root
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

//! Slotring demo - a producer task streaming bytes to a consumer loop.
//!
//! The producer plays the part of a UART interrupt pushing received bytes,
//! the consumer the part of the firmware main loop draining them:
//! - Bytes travel through a shared `TypedFifo<u8>` guarded by `GlobalCritical`
//! - Full, Empty and Busy are retried by yielding, never by blocking
//! - Overflow is either waited out or counted as dropped bytes
//!
//! # Example
//! ```no_run
//! use anyhow::Result;
//! use slotring_demo::{app, config};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = config::load_config(&config::config_path());
//!     let report = app::run(&config).await?;
//!     app::print_report(&report);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
