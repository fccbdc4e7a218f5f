//! Mixing engine (SMix)
//!
//! Two phases over the scratch slots:
//!
//! - fill: every slot `V_i` is written in order, and from `i = 2` on the
//!   block is also mixed with an already written slot picked by `Wrap`
//! - mix: `j = Integerify(X) mod N`, `X ^= V_j`, `X = BlockMix(X)`
//!
//! The mix phase runs a read-write pass of `Nloop_rw` steps that stores
//! `X ^ V_j` back into `V_j`, followed by a tail of 0 or 2 steps that
//! does not write back. When both tail steps pick the same slot, the
//! second one must see the slot as the read-write pass left it.

use core::fmt;

use crate::error::{Error, Result};
use crate::params::{Params, SBOXES_BYTES};
use crate::primitives::{
    blkxor, blockmix_pwxform, blockmix_salsa, integerify, load_shuffled, store_shuffled, wrap,
};
use crate::scratch::{Region, Scratch};

/// The `128 * r` byte state threaded from expand through mix to squeeze
#[derive(Clone, PartialEq, Eq)]
pub struct WorkingBlock {
    bytes: Vec<u8>,
}

impl WorkingBlock {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Serialized block
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for WorkingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkingBlock")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Write behavior of a mix-phase pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    /// Store `X ^ V_j` into `V_j` before mixing
    ReadWrite,
    /// Mix without writing back
    Tail,
}

/// Observations from one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MixTrace {
    /// Both tail steps read the same slot
    pub tail_collision: bool,
}

/// Step counts of the mix phase: (read-write pass, tail pass)
///
/// The total is `ceil(N / 3)` rounded up to even; the read-write pass is
/// the same value rounded down to even, so the tail has 0 or 2 steps.
pub fn mix_steps(n: u32) -> (u32, u32) {
    let third = n.div_ceil(3);
    let all = (third + 1) & !1;
    let rw = third & !1;
    (rw, all - rw)
}

/// Run the memory-hard mixing on `block` in place
pub fn mix(block: &mut WorkingBlock, scratch: &mut Scratch, params: &Params) -> Result<()> {
    run(block, scratch, params, Pass::Tail).map(|_| ())
}

pub(crate) fn run(
    block: &mut WorkingBlock,
    scratch: &mut Scratch,
    params: &Params,
    tail_pass: Pass,
) -> Result<MixTrace> {
    params.validate()?;
    if block.len() != params.block_size() {
        return Err(Error::InternalInvariantViolation(
            "working block size does not match r",
        ));
    }
    let Region { slots, sbox, work } = scratch.acquire(params)?;

    load_shuffled(work, &block.bytes);

    // S-boxes come from the first 128 bytes of the block, with r = 1
    fill(&mut work[..32], sbox, (SBOXES_BYTES / 128) as u32, blockmix_salsa)?;
    let sbox: &[u32] = sbox;

    let n = params.n;
    fill(work, slots, n, |x| blockmix_pwxform(x, sbox))?;

    let (rw_steps, tail_steps) = mix_steps(n);
    mix_pass(work, slots, sbox, n, rw_steps, Pass::ReadWrite)?;
    let tail_collision = mix_pass(work, slots, sbox, n, tail_steps, tail_pass)?;

    store_shuffled(&mut block.bytes, work);
    Ok(MixTrace { tail_collision })
}

/// Fill phase: `V_i <- X`, then mix in an earlier slot and apply BlockMix
fn fill(
    x: &mut [u32],
    slots: &mut [u32],
    n: u32,
    mut blockmix: impl FnMut(&mut [u32]),
) -> Result<()> {
    let s = x.len();
    for i in 0..n {
        slot_mut(slots, i as usize, s)?.copy_from_slice(x);

        if i > 1 {
            let j = wrap(integerify(x), i) as usize;
            blkxor(x, slot_mut(slots, j, s)?);
        }

        blockmix(x);
    }
    Ok(())
}

/// One mix-phase pass; returns whether two steps read the same slot
/// back to back
fn mix_pass(
    x: &mut [u32],
    slots: &mut [u32],
    sbox: &[u32],
    n: u32,
    steps: u32,
    pass: Pass,
) -> Result<bool> {
    let s = x.len();
    let mut last = None;
    let mut repeated = false;

    for _ in 0..steps {
        let j = (integerify(x) & (n - 1)) as usize;
        let slot = slot_mut(slots, j, s)?;
        blkxor(x, slot);

        if pass == Pass::ReadWrite {
            slot.copy_from_slice(x);
        } else if last == Some(j) {
            log::trace!("tail pass reads slot {j} twice (N={n})");
            repeated = true;
        }
        last = Some(j);

        blockmix_pwxform(x, sbox);
    }
    Ok(repeated)
}

#[inline(always)]
fn slot_mut(slots: &mut [u32], index: usize, words: usize) -> Result<&mut [u32]> {
    let at = index * words;
    slots
        .get_mut(at..at + words)
        .ok_or(Error::InternalInvariantViolation("slot index out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_steps_split() {
        // Reference tuning: 1024 -> 342 (342 + 0), 2048 -> 683 (682 + 2)
        assert_eq!(mix_steps(1024), (342, 0));
        assert_eq!(mix_steps(2048), (682, 2));
        assert_eq!(mix_steps(4096), (1366, 0));
        assert_eq!(mix_steps(2), (0, 2));
        assert_eq!(mix_steps(4), (2, 0));

        for shift in 1..31 {
            let (rw, tail) = mix_steps(1 << shift);
            assert_eq!(rw % 2, 0);
            assert!(tail == 0 || tail == 2);
        }
    }

    #[test]
    fn test_rejects_mismatched_block() {
        let params = Params::new(16, 2);
        let mut block = WorkingBlock::from_bytes(vec![0u8; 128]);
        let mut scratch = Scratch::new();
        assert!(matches!(
            mix(&mut block, &mut scratch, &params),
            Err(Error::InternalInvariantViolation(_))
        ));
    }

    #[test]
    fn test_mix_ignores_stale_scratch() {
        let params = Params::new(64, 1);
        let start = WorkingBlock::from_bytes((0..128u32).map(|i| i as u8).collect());

        let mut fresh = start.clone();
        mix(&mut fresh, &mut Scratch::new(), &params).unwrap();

        // Dirty a larger region with a different evaluation first
        let mut scratch = Scratch::new();
        let mut other = WorkingBlock::from_bytes(vec![0xa5; 256]);
        mix(&mut other, &mut scratch, &Params::new(128, 2)).unwrap();

        let mut reused = start.clone();
        mix(&mut reused, &mut scratch, &params).unwrap();
        assert_eq!(fresh, reused);
        assert_ne!(fresh, start);
    }
}
