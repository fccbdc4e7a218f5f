//! Per-thread cached scratch
//!
//! Each thread gets its own lazily created [`Scratch`], kept between calls
//! and freed by [`release_cached`] or when the thread exits. Nothing is
//! shared between threads; moving work to another thread means that thread
//! builds its own context.

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::params::{DIGEST_SIZE, Params};
use crate::scratch::Scratch;
use crate::yespower::evaluate;

thread_local! {
    static CONTEXT: RefCell<Option<Scratch>> = const { RefCell::new(None) };
}

/// Hash with the calling thread's cached scratch region
///
/// The region is created on first use, grows to fit the largest parameters
/// seen so far and is not released after the call.
pub fn evaluate_cached(input: &[u8], params: &Params) -> Result<[u8; DIGEST_SIZE]> {
    params.validate()?;

    CONTEXT.with(|cell| {
        let mut context = cell
            .try_borrow_mut()
            .map_err(|_| Error::InternalInvariantViolation("cached context already in use"))?;
        let scratch = context.get_or_insert_with(|| {
            log::debug!("creating cached yespower context");
            Scratch::new()
        });
        evaluate(input, params, scratch)
    })
}

/// Tear down the calling thread's cached context
pub fn release_cached() {
    CONTEXT.with(|cell| {
        if let Ok(mut context) = cell.try_borrow_mut() {
            if let Some(mut scratch) = context.take() {
                log::debug!("tearing down cached yespower context");
                scratch.release();
            }
        }
    });
}

/// Bytes held by the calling thread's cached context (0 if none)
pub fn cached_capacity() -> usize {
    CONTEXT.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|context| context.as_ref().map(Scratch::capacity))
            .unwrap_or(0)
    })
}
