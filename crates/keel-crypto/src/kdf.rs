//! PBKDF2-HMAC key derivation.
//!
//! Turns a low-entropy password into key material by iterating an HMAC.
//! The iteration count is the security/latency trade-off: higher counts
//! cost an attacker (and the caller) proportionally more CPU per guess.
//! Derivation is synchronous and CPU-bound; interactive callers should run
//! it off their event thread.

use crate::digest::Digest;
use crate::error::CryptoError;
use crate::hash::{hmac_sha256, hmac_sha512};

/// Maximum derived-key length in bytes.
pub const MAX_KEY_LEN: usize = (1 << 30) - 1;

/// Derive `key_len` bytes from `password` and `salt` with PBKDF2-HMAC.
///
/// For each output block `i` (1-based), computes
/// `U1 = HMAC(password, salt || BE32(i))` and XOR-accumulates
/// `Uj = HMAC(password, U(j-1))` up to the iteration count; blocks are
/// concatenated and truncated to `key_len`. An iteration count of 0 is
/// accepted and produces the same output as 1.
///
/// Deterministic: identical inputs always yield identical output.
pub fn derive(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    key_len: usize,
    digest: Digest,
) -> Result<Vec<u8>, CryptoError> {
    if key_len > MAX_KEY_LEN {
        return Err(CryptoError::KeyLengthTooLarge {
            requested: key_len,
            max: MAX_KEY_LEN,
        });
    }

    let h_len = digest.output_len();
    let blocks = key_len.div_ceil(h_len);
    let mut dk = Vec::with_capacity(blocks * h_len);

    let mut block_input = Vec::with_capacity(salt.len() + 4);
    for i in 1..=blocks as u32 {
        block_input.clear();
        block_input.extend_from_slice(salt);
        block_input.extend_from_slice(&i.to_be_bytes());

        let mut t = prf(digest, password, &block_input);
        let mut u = t.clone();
        for _ in 1..iterations {
            u = prf(digest, password, &u);
            for (tb, ub) in t.iter_mut().zip(&u) {
                *tb ^= ub;
            }
        }
        dk.extend_from_slice(&t);
    }

    dk.truncate(key_len);
    Ok(dk)
}

fn prf(digest: Digest, key: &[u8], data: &[u8]) -> Vec<u8> {
    match digest {
        Digest::Sha256 => hmac_sha256(key, data).to_vec(),
        Digest::Sha512 => hmac_sha512(key, data).to_vec(),
    }
}
