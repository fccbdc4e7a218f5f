//! Block primitives for yespower
//!
//! Salsa20/8, the two BlockMix variants (Salsa20-only for S-box setup,
//! pwxform for the main region) and the SHA-256 family collaborators used by
//! the expand and squeeze stages.
//!
//! Inside the mixing engine each 64-byte sub-block is kept in "shuffled"
//! word order: engine word `i` holds serialized word `i * 5 % 16`. This is
//! the layout SIMD implementations use, and it is observable through
//! pwxform, so it is part of the algorithm.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::params::*;

type HmacSha256 = Hmac<Sha256>;

// BlockMix_pwxform finishes with a single Salsa20 call only while a pwxform
// block and a sub-block have the same size.
const _: () = assert!(PWX_BYTES == SUB_BLOCK_SIZE);

/// XOR `src` into `dst` word by word
#[inline(always)]
pub fn blkxor(dst: &mut [u32], src: &[u32]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// Salsa20/8 core applied in place to a shuffled 16-word block
#[inline(always)]
pub fn salsa20(b: &mut [u32]) {
    let mut x = [0u32; SUB_BLOCK_WORDS];
    for (i, w) in b.iter().enumerate().take(SUB_BLOCK_WORDS) {
        x[i * 5 % 16] = *w;
    }

    macro_rules! quarter {
        ($a:expr, $b:expr, $c:expr, $d:expr) => {
            x[$b] ^= x[$a].wrapping_add(x[$d]).rotate_left(7);
            x[$c] ^= x[$b].wrapping_add(x[$a]).rotate_left(9);
            x[$d] ^= x[$c].wrapping_add(x[$b]).rotate_left(13);
            x[$a] ^= x[$d].wrapping_add(x[$c]).rotate_left(18);
        };
    }

    for _ in (0..SALSA20_ROUNDS).step_by(2) {
        // Columns
        quarter!(0, 4, 8, 12);
        quarter!(5, 9, 13, 1);
        quarter!(10, 14, 2, 6);
        quarter!(15, 3, 7, 11);
        // Rows
        quarter!(0, 1, 2, 3);
        quarter!(5, 6, 7, 4);
        quarter!(10, 11, 8, 9);
        quarter!(15, 12, 13, 14);
    }

    for (i, w) in b.iter_mut().enumerate().take(SUB_BLOCK_WORDS) {
        *w = w.wrapping_add(x[i * 5 % 16]);
    }
}

/// BlockMix over Salsa20/8 for a single 128-byte block (r = 1)
///
/// Only used while filling the S-boxes, which pwxform cannot use before
/// they exist.
#[inline(always)]
pub fn blockmix_salsa(b: &mut [u32]) {
    let mut x = [0u32; SUB_BLOCK_WORDS];
    x.copy_from_slice(&b[SUB_BLOCK_WORDS..2 * SUB_BLOCK_WORDS]);

    for sub in b.chunks_exact_mut(SUB_BLOCK_WORDS).take(2) {
        blkxor(&mut x, sub);
        salsa20(&mut x);
        sub.copy_from_slice(&x);
    }
}

/// pwxform: S-box lookups and 32x32->64 multiplies over one 64-byte block
#[inline(always)]
pub fn pwxform(b: &mut [u32], s0: &[u32], s1: &[u32]) {
    for _ in 0..PWX_ROUNDS {
        for lane in b.chunks_exact_mut(PWX_SIMPLE * 2) {
            // S_MASK is a byte offset of an S-box entry; entries are 2 words
            let p0 = ((lane[0] & S_MASK) / 4) as usize;
            let p1 = ((lane[1] & S_MASK) / 4) as usize;

            for k in 0..PWX_SIMPLE {
                let lo = u64::from(lane[2 * k]);
                let hi = u64::from(lane[2 * k + 1]);
                let s0v = u64::from(s0[p0 + 2 * k]) | (u64::from(s0[p0 + 2 * k + 1]) << 32);
                let s1v = u64::from(s1[p1 + 2 * k]) | (u64::from(s1[p1 + 2 * k + 1]) << 32);

                let x = (hi * lo).wrapping_add(s0v) ^ s1v;
                lane[2 * k] = x as u32;
                lane[2 * k + 1] = (x >> 32) as u32;
            }
        }
    }
}

/// BlockMix over pwxform for a `128 * r` byte block held in `b`
///
/// `sbox` holds S0 followed by S1.
#[inline(always)]
pub fn blockmix_pwxform(b: &mut [u32], sbox: &[u32]) {
    let (s0, s1) = sbox.split_at(SBOX_BYTES / 4);
    let units = b.len() / PWX_WORDS;

    let mut x = [0u32; PWX_WORDS];
    x.copy_from_slice(&b[(units - 1) * PWX_WORDS..]);

    for unit in b.chunks_exact_mut(PWX_WORDS) {
        blkxor(&mut x, unit);
        pwxform(&mut x, s0, s1);
        unit.copy_from_slice(&x);
    }

    let last = b.len() - SUB_BLOCK_WORDS;
    salsa20(&mut b[last..]);
}

/// First engine word of the last sub-block
#[inline(always)]
pub fn integerify(b: &[u32]) -> u32 {
    b[b.len() - SUB_BLOCK_WORDS]
}

/// Map `x` into the window `[i - p2floor(i), i)` of already written slots
#[inline(always)]
pub fn wrap(x: u32, i: u32) -> u32 {
    let n = 1u32 << (31 - i.leading_zeros());
    (x & (n - 1)) + (i - n)
}

/// Load serialized little-endian bytes into shuffled engine words
pub fn load_shuffled(dst: &mut [u32], src: &[u8]) {
    for (words, bytes) in dst
        .chunks_exact_mut(SUB_BLOCK_WORDS)
        .zip(src.chunks_exact(SUB_BLOCK_SIZE))
    {
        for (i, w) in words.iter_mut().enumerate() {
            let at = (i * 5 % 16) * 4;
            *w = u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        }
    }
}

/// Store shuffled engine words back as serialized little-endian bytes
pub fn store_shuffled(dst: &mut [u8], src: &[u32]) {
    for (bytes, words) in dst
        .chunks_exact_mut(SUB_BLOCK_SIZE)
        .zip(src.chunks_exact(SUB_BLOCK_WORDS))
    {
        for (i, w) in words.iter().enumerate() {
            let at = (i * 5 % 16) * 4;
            bytes[at..at + 4].copy_from_slice(&w.to_le_bytes());
        }
    }
}

/// Key-stretching collaborator: PBKDF2-HMAC-SHA256
///
/// Fails only for an output length PBKDF2 cannot produce.
pub fn derive(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<()> {
    if out.is_empty() || out.len() as u64 > u64::from(u32::MAX) * 32 {
        return Err(Error::InvalidParameter(format!(
            "PBKDF2 output length {} out of range",
            out.len()
        )));
    }
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, out);
    Ok(())
}

/// HMAC-SHA256 of `msg` under `key`
pub fn hmac_sha256(key: &[u8], msg: &[u8]) -> Result<[u8; DIGEST_SIZE]> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| Error::InternalInvariantViolation("HMAC rejected key length"))?;
    mac.update(msg);
    Ok(mac.finalize().into_bytes().into())
}

/// SHA-256 of `data`
#[inline(always)]
pub fn sha256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salsa20_8_rfc7914_vector() {
        let input = hex::decode(
            "7e879a214f3ec9867ca940e641718f26baee555b8c61c1b50df846116dcd3b1d\
             ee24f319df9b3d8514121e4b5ac5aa3276021d2909c74829edebc68db8b8c25e",
        )
        .unwrap();

        let mut words = [0u32; SUB_BLOCK_WORDS];
        load_shuffled(&mut words, &input);
        salsa20(&mut words);
        let mut out = [0u8; SUB_BLOCK_SIZE];
        store_shuffled(&mut out, &words);

        assert_eq!(
            hex::encode(out),
            "a41f859c6608cc993b81cacb020cef05044b2181a2fd337dfd7b1c6396682f29\
             b4393168e3c9e6bcfe6bc5b7a06d96bae424cc102c91745c24ad673dc7618f81"
        );
    }

    #[test]
    fn test_pbkdf2_rfc7914_vector() {
        let mut out = [0u8; 64];
        derive(b"passwd", b"salt", 1, &mut out).unwrap();
        assert_eq!(
            hex::encode(out),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc\
             49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783"
        );
    }

    #[test]
    fn test_derive_rejects_empty_output() {
        let mut out = [0u8; 0];
        assert!(matches!(
            derive(b"p", b"s", 1, &mut out),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_shuffle_layout_is_reversible() {
        let bytes: Vec<u8> = (0..128u32).map(|i| (i * 7) as u8).collect();
        let mut words = [0u32; 32];
        load_shuffled(&mut words, &bytes);

        // Engine word 1 is serialized word 5
        assert_eq!(words[1], u32::from_le_bytes(bytes[20..24].try_into().unwrap()));

        let mut back = [0u8; 128];
        store_shuffled(&mut back, &words);
        assert_eq!(back.to_vec(), bytes);
    }

    #[test]
    fn test_wrap_stays_below_index() {
        for i in 2..300u32 {
            for x in [0u32, 1, 0x55aa_55aa, u32::MAX] {
                let j = wrap(x, i);
                assert!(j < i, "wrap({x}, {i}) = {j}");
                assert!(j >= i - (1 << (31 - i.leading_zeros())));
            }
        }
    }

    #[test]
    fn test_blockmix_pwxform_is_deterministic() {
        let sbox: Vec<u32> = (0..(SBOXES_BYTES / 4) as u32)
            .map(|i| i.wrapping_mul(0x9e37_79b9))
            .collect();
        let mut a: Vec<u32> = (0..64u32).collect();
        let mut b = a.clone();

        blockmix_pwxform(&mut a, &sbox);
        blockmix_pwxform(&mut b, &sbox);
        assert_eq!(a, b);
        assert_ne!(a, (0..64u32).collect::<Vec<_>>());
    }
}
