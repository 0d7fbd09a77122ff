//! Fiat-Shamir transcript over group elements.
//!
//! A transcript is a 64-byte running state. Appending points hashes the state
//! together with the canonical encoding of each point through SHA-512 and
//! replaces the state with the digest; the digest doubles as a uniform
//! challenge scalar via `from_bytes_mod_order_wide`. All protocol challenges
//! in this crate are produced exclusively through [`Transcript::challenge`],
//! in the exact order the component design lists them — including the two
//! deliberate back-to-back updates used to derive `y`/`z` and `x`/`u`.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};

/// The running Fiat-Shamir state.
#[derive(Clone, Copy)]
pub struct Transcript {
    state: [u8; 64],
}

impl Transcript {
    /// Starts a transcript from a caller-supplied 64-byte initial state (a
    /// hash of the message being authorized).
    pub fn new(initial: [u8; 64]) -> Self {
        Transcript { state: initial }
    }

    /// The current 64-byte state.
    pub fn state(&self) -> [u8; 64] {
        self.state
    }

    /// Appends the canonical encodings of `points` to the transcript and
    /// returns the resulting challenge scalar. Updates `self.state` in place.
    pub fn challenge(&mut self, points: &[&RistrettoPoint]) -> Scalar {
        let mut hasher = Sha512::new();
        hasher.update(self.state);
        for point in points {
            hasher.update(point.compress().as_bytes());
        }
        let digest = hasher.finalize();
        self.state.copy_from_slice(&digest);
        Scalar::from_bytes_mod_order_wide(&self.state)
    }

    /// The challenge obtained from re-hashing the current state with no
    /// additional points appended (used to derive `u` after (T1, T2) has
    /// already been folded in twice).
    pub fn uniform_point(&self) -> RistrettoPoint {
        RistrettoPoint::from_uniform_bytes(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_is_deterministic() {
        let p = RistrettoPoint::from_uniform_bytes(&[3u8; 64]);
        let mut t1 = Transcript::new([9u8; 64]);
        let mut t2 = Transcript::new([9u8; 64]);
        assert_eq!(t1.challenge(&[&p]), t2.challenge(&[&p]));
    }

    #[test]
    fn distinct_points_change_the_challenge() {
        let p = RistrettoPoint::from_uniform_bytes(&[3u8; 64]);
        let q = RistrettoPoint::from_uniform_bytes(&[4u8; 64]);
        let mut t1 = Transcript::new([9u8; 64]);
        let mut t2 = Transcript::new([9u8; 64]);
        assert_ne!(t1.challenge(&[&p]), t2.challenge(&[&q]));
    }
}
