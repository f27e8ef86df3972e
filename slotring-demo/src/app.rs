/*
 * @file app.rs
 * @brief Producer/consumer demo loop over a shared fifo
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

//! FILE: app.rs
//!
//! DESCRIPTION:
//! Producer/Consumer Demo Loop.
//!
//! BRIEF:
//! Spawns a producer task that pushes the configured message byte by byte
//! and drains it on the calling task, retrying Full/Empty/Busy by yielding.
//!
//! AUTHOR: Kevin Thomas
//! CREATION DATE: July 29, 2025
//! UPDATE DATE: July 29, 2025

use crate::config::DemoConfig;
use anyhow::{Context, Result};
use slotring::{FifoError, GlobalCritical, TypedFifo};
use std::sync::Arc;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};

/// Byte fifo shared by the producer task and the consumer loop.
pub type SharedFifo = Arc<TypedFifo<'static, u8, GlobalCritical>>;

/// Outcome of one demo run.
///
/// # Fields
/// * `produced` - Bytes the producer stored
/// * `dropped` - Bytes discarded on overflow
/// * `consumed` - Bytes the consumer drained
/// * `max_level` - Highest fill level the consumer observed
/// * `intact` - Whether the drained bytes match the sent message exactly
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DemoReport {
    pub produced: usize,
    pub dropped: usize,
    pub consumed: usize,
    pub max_level: usize,
    pub intact: bool,
}

/// Counters kept by the producer task.
#[derive(Debug, Default)]
struct ProducerStats {
    produced: usize,
    dropped: usize,
}

/// Allocates the shared fifo.
///
/// # Arguments
/// * `capacity` - Slot count
///
/// # Returns
/// * `Ok(SharedFifo)` - Empty fifo behind an `Arc`
///
/// # Errors
/// Returns an error if the capacity is invalid or allocation fails.
pub fn build_fifo(capacity: usize) -> Result<SharedFifo> {
    let fifo = TypedFifo::with_capacity_and_critical(capacity, GlobalCritical)
        .with_context(|| format!("Failed to create a {}-slot fifo", capacity))?;
    Ok(Arc::new(fifo))
}

/// Runs the producer and consumer until the whole payload has passed.
///
/// # Details
/// The consumer samples the fill level on every pass and stops once the
/// producer has finished and the fifo is empty.
///
/// # Arguments
/// * `config` - Demo parameters
///
/// # Returns
/// * `Ok(DemoReport)` - Counters for the run
///
/// # Errors
/// Returns an error if the fifo cannot be built or the producer panics.
pub async fn run(config: &DemoConfig) -> Result<DemoReport> {
    let fifo = build_fifo(config.capacity)?;
    let payload = config.message.as_bytes().repeat(config.rounds);
    info!(
        "streaming {} bytes through {} slots",
        payload.len(),
        fifo.capacity()
    );

    let producer = task::spawn(produce(
        Arc::clone(&fifo),
        payload.clone(),
        config.drop_on_full,
    ));
    let (received, max_level) = consume(&fifo, &producer).await;
    let stats = producer.await.context("Producer task failed")?;
    report_overflow(stats.dropped);

    Ok(DemoReport {
        produced: stats.produced,
        dropped: stats.dropped,
        consumed: received.len(),
        max_level,
        intact: received == payload,
    })
}

/// Prints a run summary to stdout.
pub fn print_report(report: &DemoReport) {
    println!("Produced:  {} bytes", report.produced);
    println!("Dropped:   {} bytes", report.dropped);
    println!("Consumed:  {} bytes", report.consumed);
    println!("Max level: {}", report.max_level);
    println!("Intact:    {}", if report.intact { "yes" } else { "no" });
}

/// Pushes every payload byte, yielding while the fifo is busy or full.
async fn produce(fifo: SharedFifo, payload: Vec<u8>, drop_on_full: bool) -> ProducerStats {
    let mut stats = ProducerStats::default();
    for byte in payload {
        loop {
            match fifo.push(byte) {
                Ok(()) => {
                    stats.produced += 1;
                    break;
                }
                Err(FifoError::Full) if drop_on_full => {
                    stats.dropped += 1;
                    break;
                }
                Err(_) => task::yield_now().await,
            }
        }
    }
    stats
}

/// Drains the fifo until the producer is done and nothing is left.
async fn consume(fifo: &SharedFifo, producer: &JoinHandle<ProducerStats>) -> (Vec<u8>, usize) {
    let mut received = Vec::new();
    let mut max_level = 0;
    loop {
        // Sample before popping so a last push cannot slip in after the check.
        let done = producer.is_finished();
        max_level = max_level.max(fifo.level());
        match fifo.pop() {
            Ok(byte) => received.push(byte),
            Err(FifoError::Empty) if done => break,
            Err(_) => task::yield_now().await,
        }
    }
    (received, max_level)
}

/// Emits a warning if the producer had to drop bytes.
fn report_overflow(dropped: usize) {
    if dropped > 0 {
        warn!("fifo was full, dropped {} incoming bytes", dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(capacity: usize, message: &str, rounds: usize, drop_on_full: bool) -> DemoConfig {
        DemoConfig {
            capacity,
            message: message.to_string(),
            rounds,
            drop_on_full,
        }
    }

    #[test]
    fn test_build_fifo_rejects_single_slot() {
        assert!(build_fifo(1).is_err());
        assert!(build_fifo(0).is_err());
    }

    #[test]
    fn test_build_fifo_capacity() {
        let fifo = build_fifo(8).unwrap();
        assert_eq!(fifo.capacity(), 7);
    }

    #[tokio::test]
    async fn test_run_waits_out_overflow() {
        let report = run(&config(4, "ON OFF\r\n", 5, false)).await.unwrap();
        assert_eq!(report.produced, 40);
        assert_eq!(report.dropped, 0);
        assert_eq!(report.consumed, 40);
        assert!(report.max_level <= 3);
        assert!(report.intact);
    }

    #[tokio::test]
    async fn test_run_counts_dropped_bytes() {
        let report = run(&config(8, "abcdefghij", 3, true)).await.unwrap();
        assert_eq!(report.produced + report.dropped, 30);
        assert_eq!(report.consumed, report.produced);
        assert!(report.max_level <= 7);
        assert_eq!(report.intact, report.dropped == 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_on_worker_threads() {
        let report = run(&DemoConfig::default()).await.unwrap();
        let expected = DemoConfig::default().message.len() * DemoConfig::default().rounds;
        assert_eq!(report.consumed, expected);
        assert!(report.intact);
    }

    #[tokio::test]
    async fn test_run_empty_message() {
        let report = run(&config(4, "", 3, false)).await.unwrap();
        assert_eq!(report, DemoReport { intact: true, ..DemoReport::default() });
    }
}
