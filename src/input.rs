//! Command-line input handling

use thiserror::Error;

use crate::Params;

/// Malformed command-line input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Input bytes from a string, either UTF-8 text or hex
pub fn parse_bytes(raw: &str, is_hex: bool) -> Result<Vec<u8>, InputError> {
    if is_hex {
        let trimmed = raw.trim().trim_start_matches("0x");
        Ok(hex::decode(trimmed)?)
    } else {
        Ok(raw.as_bytes().to_vec())
    }
}

/// Parameters from the `--n`, `--r`, `--pers` options
pub fn params_from_args(n: u32, r: u32, pers: Option<&str>) -> Params {
    let params = Params::new(n, r);
    match pers {
        Some(pers) => params.with_personalization(pers),
        None => params,
    }
}
