//! yespower Library
//!
//! Memory-hard hashing for proof-of-work and password hashing.
//!
//! # Overview
//!
//! yespower forces every evaluation to hold `128 * r * N` bytes of
//! scratch memory that is written sequentially and read back in a
//! data-dependent order, which keeps GPUs and ASICs close to a single
//! CPU core in cost per hash.
//!
//! # Example
//!
//! ```rust
//! use yespower::algorithm::{hash, meets_target, Params};
//!
//! let params = Params::new(1024, 8);
//! let result = hash(b"block header", &params).unwrap();
//!
//! if meets_target(&result, &[0xff; 32]) {
//!     println!("Valid proof found!");
//! }
//! ```

// Re-export the core algorithm
pub use yespower_core as algorithm;

pub mod benchmark;
pub mod input;

// Convenience re-exports
pub use algorithm::{evaluate_cached, hash, meets_target, Error, Params, Yespower};
