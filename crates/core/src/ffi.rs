//! C FFI bindings
//!
//! All hashing entry points return 0 on success and -1 on failure. On
//! failure the 32-byte output is filled with 0xff.

use crate::params::{DIGEST_SIZE, Params};
use crate::{Yespower, evaluate_cached};
use core::slice;

/// Opaque hasher handle for FFI
pub struct YespowerHasher {
    inner: Yespower,
}

/// Create a new hasher instance
/// Returns a pointer to the hasher (caller must free with yespower_free)
#[unsafe(no_mangle)]
pub extern "C" fn yespower_new() -> *mut YespowerHasher {
    let hasher = Box::new(YespowerHasher {
        inner: Yespower::new(),
    });
    Box::into_raw(hasher)
}

/// Free a hasher instance and its scratch memory
#[unsafe(no_mangle)]
pub extern "C" fn yespower_free(hasher: *mut YespowerHasher) {
    if !hasher.is_null() {
        unsafe {
            let _ = Box::from_raw(hasher);
        }
    }
}

/// Compute the digest with an explicit hasher
/// - hasher: pointer from yespower_new()
/// - input/input_len: bytes to hash
/// - n, r: cost parameters
/// - pers/pers_len: personalization (pers may be null when pers_len is 0)
/// - output: pointer to 32-byte buffer for result
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub extern "C" fn yespower_hash(
    hasher: *mut YespowerHasher,
    input: *const u8,
    input_len: usize,
    n: u32,
    r: u32,
    pers: *const u8,
    pers_len: usize,
    output: *mut u8,
) -> i32 {
    if hasher.is_null() {
        fail(output);
        return -1;
    }
    let hasher = unsafe { &mut *hasher };
    run(input, input_len, n, r, pers, pers_len, output, |input, params| {
        hasher.inner.hash(input, params)
    })
}

/// Compute the digest with the calling thread's cached scratch
#[unsafe(no_mangle)]
pub extern "C" fn yespower_hash_tls(
    input: *const u8,
    input_len: usize,
    n: u32,
    r: u32,
    pers: *const u8,
    pers_len: usize,
    output: *mut u8,
) -> i32 {
    run(input, input_len, n, r, pers, pers_len, output, evaluate_cached)
}

#[allow(clippy::too_many_arguments)]
fn run(
    input: *const u8,
    input_len: usize,
    n: u32,
    r: u32,
    pers: *const u8,
    pers_len: usize,
    output: *mut u8,
    hash: impl FnOnce(&[u8], &Params) -> crate::Result<[u8; DIGEST_SIZE]>,
) -> i32 {
    if output.is_null() || (input.is_null() && input_len != 0) || (pers.is_null() && pers_len != 0)
    {
        fail(output);
        return -1;
    }

    let input = if input_len == 0 {
        &[][..]
    } else {
        unsafe { slice::from_raw_parts(input, input_len) }
    };
    let mut params = Params::new(n, r);
    if pers_len != 0 {
        params = params.with_personalization(unsafe { slice::from_raw_parts(pers, pers_len) });
    }

    match hash(input, &params) {
        Ok(digest) => {
            let output_slice = unsafe { slice::from_raw_parts_mut(output, DIGEST_SIZE) };
            output_slice.copy_from_slice(&digest);
            0
        }
        Err(_) => {
            fail(output);
            -1
        }
    }
}

fn fail(output: *mut u8) {
    if !output.is_null() {
        unsafe { slice::from_raw_parts_mut(output, DIGEST_SIZE) }.fill(0xff);
    }
}
