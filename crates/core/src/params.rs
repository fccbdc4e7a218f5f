//! yespower Algorithm Parameters
//!
//! Fixed tuning of the pwxform/Salsa20 core plus the caller-supplied cost
//! parameters (`N`, `r`, personalization) and their validation.

use crate::error::{Error, Result};

/// Digest size in bytes
pub const DIGEST_SIZE: usize = 32;

/// Sub-block size in bytes (one Salsa20 block)
pub const SUB_BLOCK_SIZE: usize = 64;

/// u32 words per sub-block
pub const SUB_BLOCK_WORDS: usize = SUB_BLOCK_SIZE / 4;

/// Salsa20 rounds used by BlockMix
pub const SALSA20_ROUNDS: usize = 8;

/// Number of parallel lanes gathered per pwxform round
pub const PWX_GATHER: usize = 4;

/// 64-bit words processed per lane
pub const PWX_SIMPLE: usize = 2;

/// pwxform block size in bytes (64)
pub const PWX_BYTES: usize = PWX_GATHER * PWX_SIMPLE * 8;

/// pwxform block size in u32 words
pub const PWX_WORDS: usize = PWX_BYTES / 4;

/// pwxform rounds per block
pub const PWX_ROUNDS: usize = 6;

/// S-box index width in bits
pub const S_WIDTH: u32 = 8;

/// Size of a single S-box in bytes (4 KB)
pub const SBOX_BYTES: usize = (1 << S_WIDTH) * PWX_SIMPLE * 8;

/// Both S-boxes (S0, S1) in bytes
pub const SBOXES_BYTES: usize = 2 * SBOX_BYTES;

/// Byte mask applied to a lane word to select an S-box entry
pub const S_MASK: u32 = ((1 << S_WIDTH) - 1) * (PWX_SIMPLE as u32) * 8;

/// Parameters of a single yespower evaluation
///
/// `n` sets the number of scratch slots (memory and time cost), `r` the
/// width of each slot in 128-byte units. Personalization separates
/// otherwise identical inputs; an empty personalization is the same as none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Params {
    pub n: u32,
    pub r: u32,
    pub personalization: Option<Vec<u8>>,
}

impl Params {
    /// Parameters without personalization
    pub fn new(n: u32, r: u32) -> Self {
        Self {
            n,
            r,
            personalization: None,
        }
    }

    /// Attach personalization bytes
    pub fn with_personalization(mut self, pers: impl Into<Vec<u8>>) -> Self {
        self.personalization = Some(pers.into());
        self
    }

    /// Personalization bytes, `None` when absent or empty
    pub fn personalization(&self) -> Option<&[u8]> {
        self.personalization.as_deref().filter(|p| !p.is_empty())
    }

    /// Check the cost parameters before any memory is touched
    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(Error::InvalidParameter(format!(
                "N must be at least 2, got {}",
                self.n
            )));
        }
        if !self.n.is_power_of_two() {
            return Err(Error::InvalidParameter(format!(
                "N must be a power of two, got {}",
                self.n
            )));
        }
        if self.r < 1 {
            return Err(Error::InvalidParameter("r must be at least 1".into()));
        }
        self.checked_scratch_size().map(|_| ())
    }

    /// Working block size in bytes (`128 * r`)
    pub fn block_size(&self) -> usize {
        128 * self.r as usize
    }

    /// Working block size in u32 words
    pub fn block_words(&self) -> usize {
        32 * self.r as usize
    }

    /// Scratch region size in bytes (`N` slots of `128 * r`), excluding S-boxes
    ///
    /// Only meaningful after [`Params::validate`] succeeded.
    pub fn scratch_size(&self) -> usize {
        self.block_size() * self.n as usize
    }

    fn checked_scratch_size(&self) -> Result<usize> {
        let overflow = || {
            Error::InvalidParameter(format!(
                "scratch size for N={} r={} overflows usize",
                self.n, self.r
            ))
        };

        let size = (self.r as usize)
            .checked_mul(128)
            .and_then(|b| b.checked_mul(self.n as usize))
            .ok_or_else(overflow)?;

        // Allocations are capped at isize::MAX bytes
        if size > isize::MAX as usize {
            return Err(overflow());
        }
        Ok(size)
    }
}
