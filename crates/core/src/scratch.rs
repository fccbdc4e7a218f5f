//! Scratch memory for the mixing engine
//!
//! A `Scratch` owns the `N`-slot region, the pwxform S-boxes and the engine's
//! working words. It grows on demand and never shrinks, so one instance can
//! serve many evaluations with non-decreasing parameters without
//! reallocating. Bytes left over from an earlier evaluation are never read:
//! the fill phase overwrites every slot before the mix phase reads any.

use core::fmt;

use crate::error::{Error, Result};
use crate::params::{Params, SBOXES_BYTES};

/// Reusable scratch region for yespower evaluations
#[derive(Default)]
pub struct Scratch {
    /// `N` slots of `32 * r` words
    slots: Vec<u32>,
    /// S0 followed by S1
    sbox: Vec<u32>,
    /// Working block in engine (shuffled) word order
    work: Vec<u32>,
}

/// Borrowed view of a scratch sized for one evaluation
pub(crate) struct Region<'a> {
    pub slots: &'a mut [u32],
    pub sbox: &'a mut [u32],
    pub work: &'a mut [u32],
}

impl Scratch {
    /// Empty scratch; nothing is allocated until the first `acquire`
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            sbox: Vec::new(),
            work: Vec::new(),
        }
    }

    /// Scratch pre-sized for `params`
    pub fn with_params(params: &Params) -> Result<Self> {
        let mut scratch = Self::new();
        scratch.acquire(params)?;
        Ok(scratch)
    }

    /// Size the region for `params`, growing it if needed
    ///
    /// Validates `params` first, so invalid parameters never allocate.
    pub(crate) fn acquire(&mut self, params: &Params) -> Result<Region<'_>> {
        params.validate()?;

        let slot_words = params.scratch_size() / 4;
        let block_words = params.block_words();
        let sbox_words = SBOXES_BYTES / 4;

        if self.slots.len() < slot_words {
            log::debug!(
                "growing scratch from {} to {} bytes (N={}, r={})",
                self.capacity(),
                params.scratch_size(),
                params.n,
                params.r
            );
        }
        grow(&mut self.slots, slot_words)?;
        grow(&mut self.sbox, sbox_words)?;
        grow(&mut self.work, block_words)?;

        Ok(Region {
            slots: &mut self.slots[..slot_words],
            sbox: &mut self.sbox[..sbox_words],
            work: &mut self.work[..block_words],
        })
    }

    /// Make sure the region can hold an evaluation with `params`
    pub fn reserve(&mut self, params: &Params) -> Result<()> {
        self.acquire(params).map(|_| ())
    }

    /// Bytes currently held for slots
    pub fn capacity(&self) -> usize {
        self.slots.len() * 4
    }

    /// Whether any memory is held
    pub fn is_allocated(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Free all memory held by the region
    pub fn release(&mut self) {
        if self.is_allocated() {
            log::debug!("releasing {} bytes of scratch", self.capacity());
        }
        *self = Self::new();
    }
}

impl fmt::Debug for Scratch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scratch")
            .field("capacity", &self.capacity())
            .finish()
    }
}

fn grow(buf: &mut Vec<u32>, words: usize) -> Result<()> {
    if buf.len() >= words {
        return Ok(());
    }
    buf.try_reserve_exact(words - buf.len())
        .map_err(|_| Error::OutOfMemory { bytes: words * 4 })?;
    buf.resize(words, 0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_grows_and_never_shrinks() {
        let mut scratch = Scratch::new();
        assert!(!scratch.is_allocated());

        scratch.reserve(&Params::new(16, 2)).unwrap();
        assert_eq!(scratch.capacity(), 16 * 256);

        scratch.reserve(&Params::new(64, 1)).unwrap();
        assert_eq!(scratch.capacity(), 64 * 128);

        // Smaller request reuses the larger region
        scratch.reserve(&Params::new(4, 1)).unwrap();
        assert_eq!(scratch.capacity(), 64 * 128);

        let region = scratch.acquire(&Params::new(4, 1)).unwrap();
        assert_eq!(region.slots.len(), 4 * 32);
        assert_eq!(region.work.len(), 32);
        assert_eq!(region.sbox.len(), SBOXES_BYTES / 4);
    }

    #[test]
    fn test_release_frees_region() {
        let mut scratch = Scratch::with_params(&Params::new(32, 1)).unwrap();
        assert!(scratch.is_allocated());
        scratch.release();
        assert!(!scratch.is_allocated());
        assert_eq!(scratch.capacity(), 0);
    }

    #[test]
    fn test_invalid_params_do_not_allocate() {
        let mut scratch = Scratch::new();
        for params in [Params::new(0, 1), Params::new(3, 1), Params::new(16, 0)] {
            assert!(matches!(
                scratch.reserve(&params),
                Err(Error::InvalidParameter(_))
            ));
        }
        assert!(!scratch.is_allocated());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocation_failure_is_out_of_memory() {
        // 2^62 bytes passes validation but no allocator can satisfy it
        let params = Params::new(1 << 30, 1 << 25);
        let mut scratch = Scratch::new();
        assert!(matches!(
            scratch.reserve(&params),
            Err(Error::OutOfMemory { .. })
        ));
        assert!(!scratch.is_allocated());
    }
}
