//! # yespower Core Algorithm
//!
//! A tunable memory-hard hash function for proof-of-work and password
//! hashing, built on scrypt's sequential memory-hard construction with
//! pwxform (parallel multiply and S-box lookups) inside BlockMix.
//!
//! ## Pipeline
//!
//! 1. **Validate** `N` (power of two, at least 2) and `r` (at least 1)
//! 2. **Expand** the input with PBKDF2-HMAC-SHA256 into a `128 * r` byte block
//! 3. **Mix**: fill `N` scratch slots, then read them back in a
//!    data-dependent order (SMix1 / SMix2)
//! 4. **Squeeze** the block into a 32-byte digest, folding in optional
//!    personalization
//!
//! ## Memory
//!
//! Each evaluation needs `128 * r * N` bytes plus 8 KB of S-boxes. The
//! scratch region can be owned explicitly ([`Yespower`], [`Scratch`]) or
//! cached per thread ([`evaluate_cached`]).
//!
//! ## Example
//!
//! ```rust
//! use yespower_core::{Params, Yespower, evaluate_cached, hash};
//!
//! let params = Params::new(1024, 8);
//!
//! // Single-shot hashing
//! let digest = hash(b"input data", &params).unwrap();
//!
//! // Reusable hasher (avoids re-allocation)
//! let mut hasher = Yespower::new();
//! assert_eq!(hasher.hash(b"input data", &params).unwrap(), digest);
//!
//! // Per-thread cached scratch
//! assert_eq!(evaluate_cached(b"input data", &params).unwrap(), digest);
//!
//! // Personalization separates domains
//! let pers = params.clone().with_personalization("personality test");
//! assert_ne!(hash(b"input data", &pers).unwrap(), digest);
//! ```

mod cached;
mod error;
mod params;
mod primitives;
mod scratch;
mod smix;
mod yespower;

#[cfg(feature = "ffi")]
mod ffi;

pub use cached::{cached_capacity, evaluate_cached, release_cached};
pub use error::{Error, Result};
pub use params::*;
pub use primitives::derive;
pub use scratch::Scratch;
pub use smix::{WorkingBlock, mix, mix_steps};
pub use yespower::{Yespower, evaluate, expand_to_block, hash, meets_target, squeeze};
