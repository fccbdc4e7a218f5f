//! yespower pipeline: expand, mix, squeeze
//!
//! - Expand: `B = PBKDF2-SHA256(SHA256(input), input, 1, 128r)`
//! - Mix: SMix over the scratch region (see [`crate::smix`])
//! - Squeeze: `D = PBKDF2-SHA256(B_initial[0..32], B, 1, 32)`, followed by
//!   `D = SHA256(HMAC-SHA256(D, personalization))` when personalization is set

use crate::error::Result;
use crate::params::{DIGEST_SIZE, Params};
use crate::primitives::{derive, hmac_sha256, sha256};
use crate::scratch::Scratch;
use crate::smix::{self, WorkingBlock};

/// Expand `input` into the initial working block for `params`
pub fn expand_to_block(input: &[u8], params: &Params) -> Result<WorkingBlock> {
    params.validate()?;
    let mut bytes = vec![0u8; params.block_size()];
    derive(&sha256(input), input, 1, &mut bytes)?;
    Ok(WorkingBlock::from_bytes(bytes))
}

/// Compress a mixed working block into the digest
///
/// The squeeze key is the first 32 bytes of the block `input` expands to,
/// so it is recomputed here from `input`.
pub fn squeeze(block: &WorkingBlock, input: &[u8], params: &Params) -> Result<[u8; DIGEST_SIZE]> {
    let mut key = [0u8; DIGEST_SIZE];
    derive(&sha256(input), input, 1, &mut key)?;
    squeeze_with_key(block, &key, params)
}

fn squeeze_with_key(
    block: &WorkingBlock,
    key: &[u8; DIGEST_SIZE],
    params: &Params,
) -> Result<[u8; DIGEST_SIZE]> {
    let mut digest = [0u8; DIGEST_SIZE];
    derive(key, block.as_bytes(), 1, &mut digest)?;

    if let Some(pers) = params.personalization() {
        digest = sha256(&hmac_sha256(&digest, pers)?);
    }
    Ok(digest)
}

/// Full evaluation with a caller-owned scratch region
///
/// The region grows to fit `params` and is left allocated for reuse.
pub fn evaluate(input: &[u8], params: &Params, scratch: &mut Scratch) -> Result<[u8; DIGEST_SIZE]> {
    params.validate()?;
    scratch.reserve(params)?;

    let mut block = expand_to_block(input, params)?;
    let mut key = [0u8; DIGEST_SIZE];
    key.copy_from_slice(&block.as_bytes()[..DIGEST_SIZE]);

    smix::mix(&mut block, scratch, params)?;
    squeeze_with_key(&block, &key, params)
}

/// Reusable yespower hasher
///
/// Owns one scratch region for its whole lifetime, so repeated hashing
/// with the same (or smaller) parameters does not reallocate.
#[derive(Debug, Default)]
pub struct Yespower {
    scratch: Scratch,
}

impl Yespower {
    /// Hasher with no memory allocated yet
    pub fn new() -> Self {
        Self {
            scratch: Scratch::new(),
        }
    }

    /// Hasher with its scratch pre-sized for `params`
    pub fn with_params(params: &Params) -> Result<Self> {
        Ok(Self {
            scratch: Scratch::with_params(params)?,
        })
    }

    /// Compute the yespower digest of `input`
    pub fn hash(&mut self, input: &[u8], params: &Params) -> Result<[u8; DIGEST_SIZE]> {
        evaluate(input, params, &mut self.scratch)
    }

    /// Scratch region held by this hasher
    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    /// Free the scratch region; the hasher stays usable
    pub fn release(&mut self) {
        self.scratch.release();
    }
}

/// Convenience function for single-shot hashing
///
/// Allocates a scratch region, hashes, and frees it. For repeated hashing
/// prefer a [`Yespower`] instance or [`crate::evaluate_cached`].
pub fn hash(input: &[u8], params: &Params) -> Result<[u8; DIGEST_SIZE]> {
    Yespower::new().hash(input, params)
}

/// Check a digest against a proof-of-work target
///
/// Both are read as 256-bit little-endian integers; the digest is valid
/// when it does not exceed the target.
///
/// # Example
///
/// ```rust
/// use yespower_core::meets_target;
///
/// let mut target = [0xFF; 32];
/// target[31] = 0x00;
/// target[30] = 0x0F;
///
/// let mut hash = [0xFF; 32];
/// hash[31] = 0x00;
/// hash[30] = 0x0E;
/// assert!(meets_target(&hash, &target));
///
/// hash[30] = 0x10;
/// assert!(!meets_target(&hash, &target));
/// ```
pub fn meets_target(hash: &[u8; DIGEST_SIZE], target: &[u8; DIGEST_SIZE]) -> bool {
    for (h, t) in hash.iter().rev().zip(target.iter().rev()) {
        if h != t {
            return h < t;
        }
    }
    true
}
