//! Reseeding extendable-output generator.
//!
//! `Xof` is the single source of randomness for an [`Account`](crate::account::Account):
//! every blinding scalar, every nonce, and the inner blinding scalars consumed while
//! assembling a range proof are drawn from one `Xof` instance per account.
//!
//! Built on BLAKE2s in counter mode: BLAKE2s's native digest caps at 32 bytes per
//! call, so output longer than one block is produced by hashing the current key
//! together with an incrementing counter, one block at a time, the same shape as
//! the per-block expansion inside HKDF-Expand.

use blake2::{Blake2s256, Digest};
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

/// A 32-byte-keyed extendable-output generator that reseeds itself on every read.
#[derive(Clone)]
pub struct Xof {
    key: [u8; 32],
}

impl Xof {
    /// Seeds a fresh generator from a 32-byte key.
    pub fn new(seed: [u8; 32]) -> Self {
        Xof { key: seed }
    }

    /// Seeds a generator from an arbitrary-length byte string, zero-padded or
    /// truncated to 32 bytes (matches the source's `copy(xofKey[:], seed)`).
    pub fn from_bytes(seed: &[u8]) -> Self {
        let mut key = [0u8; 32];
        let take = seed.len().min(32);
        key[..take].copy_from_slice(&seed[..take]);
        Xof::new(key)
    }

    fn expand(&self, out_len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(out_len);
        let mut counter: u32 = 0;
        while out.len() < out_len {
            let mut hasher = Blake2s256::new();
            hasher.update(self.key);
            hasher.update(counter.to_le_bytes());
            let block = hasher.finalize();
            let take = (out_len - out.len()).min(block.len());
            out.extend_from_slice(&block[..take]);
            counter += 1;
        }
        out
    }

    /// Fills `buf` with fresh output and reseeds: internally expands the current
    /// key to `buf.len() + 32` bytes, keeps the first 32 as the new key and
    /// returns the rest.
    pub fn read(&mut self, buf: &mut [u8]) {
        let expanded = self.expand(buf.len() + 32);
        self.key.copy_from_slice(&expanded[..32]);
        buf.copy_from_slice(&expanded[32..]);
    }

    /// A uniformly random scalar, `FromUniformBytes` over 64 fresh bytes.
    pub fn random_scalar(&mut self) -> Scalar {
        let mut bytes = [0u8; 64];
        self.read(&mut bytes);
        Scalar::from_bytes_mod_order_wide(&bytes)
    }

    /// A uniformly random group element, `FromUniformBytes` over 64 fresh bytes.
    pub fn random_point(&mut self) -> RistrettoPoint {
        let mut bytes = [0u8; 64];
        self.read(&mut bytes);
        RistrettoPoint::from_uniform_bytes(&bytes)
    }
}
