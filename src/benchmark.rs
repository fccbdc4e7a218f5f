//! Multi-threaded hashing benchmark
//!
//! Every worker thread hashes with its own cached scratch and tears the
//! context down when it finishes.

use std::thread;
use std::time::Instant;

use serde::Serialize;

use crate::algorithm::{evaluate_cached, release_cached, Error, Params, Result};

/// Header size used for benchmark inputs (nonce in the last 4 bytes)
pub const HEADER_SIZE: usize = 80;

/// Outcome of a benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub n: u32,
    pub r: u32,
    pub personalized: bool,
    pub threads: usize,
    pub hashes: u64,
    pub elapsed_secs: f64,
    pub hashrate: f64,
    pub memory_per_thread: usize,
    /// XOR of every digest computed, for cross-machine comparison
    pub digest_xor: String,
}

/// Benchmark input for `nonce`
pub fn header(nonce: u32) -> [u8; HEADER_SIZE] {
    let mut input = [0u8; HEADER_SIZE];
    for (i, byte) in input.iter_mut().enumerate() {
        *byte = (i * 3) as u8;
    }
    input[HEADER_SIZE - 4..].copy_from_slice(&nonce.to_le_bytes());
    input
}

/// Hash `count` headers spread across `threads` workers
pub fn run(params: &Params, count: u32, threads: usize) -> Result<BenchmarkReport> {
    params.validate()?;
    let threads = threads.clamp(1, count.max(1) as usize);

    let start = Instant::now();
    let workers: Vec<_> = (0..threads)
        .map(|worker| {
            let params = params.clone();
            thread::spawn(move || -> Result<(u64, [u8; 32])> {
                let mut hashes = 0u64;
                let mut xor = [0u8; 32];
                for nonce in (worker as u32..count).step_by(threads) {
                    let digest = evaluate_cached(&header(nonce), &params)?;
                    for (acc, byte) in xor.iter_mut().zip(digest.iter()) {
                        *acc ^= byte;
                    }
                    hashes += 1;
                }
                release_cached();
                Ok((hashes, xor))
            })
        })
        .collect();

    let mut hashes = 0u64;
    let mut xor = [0u8; 32];
    for worker in workers {
        let (worker_hashes, worker_xor) = worker
            .join()
            .map_err(|_| Error::InternalInvariantViolation("benchmark worker panicked"))??;
        hashes += worker_hashes;
        for (acc, byte) in xor.iter_mut().zip(worker_xor.iter()) {
            *acc ^= byte;
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    let hashrate = if elapsed > 0.0 {
        hashes as f64 / elapsed
    } else {
        0.0
    };
    log::info!(
        "benchmark finished: {} hashes on {} threads in {:.2}s",
        hashes,
        threads,
        elapsed
    );

    Ok(BenchmarkReport {
        n: params.n,
        r: params.r,
        personalized: params.personalization().is_some(),
        threads,
        hashes,
        elapsed_secs: elapsed,
        hashrate,
        memory_per_thread: params.scratch_size() + yespower_core::SBOXES_BYTES,
        digest_xor: hex::encode(xor),
    })
}
