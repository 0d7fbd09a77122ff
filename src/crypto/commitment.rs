//! ElGamal-style commitment to a balance.

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;

use crate::error::{Error, Result};

/// `C = (C_L, C_R)`, an encryption of `v` under public key `Y` with
/// randomness `r`: `C_L = v*G + r*Y`, `C_R = r*G`.
///
/// `G` is never the curve's standard basepoint: every account shares the
/// single generator held by [`super::generators::RangeProver`], so callers
/// always pass it in explicitly.
///
/// Homomorphic under component-wise addition and subtraction: adding or
/// subtracting two commitments made under the same key adds or subtracts
/// the underlying plaintexts and randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment {
    pub c_l: RistrettoPoint,
    pub c_r: RistrettoPoint,
}

impl Commitment {
    pub fn new(c_l: RistrettoPoint, c_r: RistrettoPoint) -> Self {
        Commitment { c_l, c_r }
    }

    /// Builds a fresh commitment to `v` under public key `y` with
    /// randomness `r`, relative to generator `g`.
    pub fn encrypt(v: Scalar, r: Scalar, y: &RistrettoPoint, g: &RistrettoPoint) -> Self {
        Commitment {
            c_l: v * g + r * y,
            c_r: r * g,
        }
    }

    /// `C_L - sk*C_R`, the plaintext point `v*G` for the holder of `sk`.
    pub fn decrypt_point(&self, sk: &Scalar) -> RistrettoPoint {
        self.c_l - sk * self.c_r
    }

    /// Brute-forces `v` from `v*G` by incremental addition, scanning
    /// `i = 0..upper`. Mirrors the source's linear scan exactly (not a
    /// baby-step/giant-step table) so the time/space trade-off observed by
    /// callers matches; this bound must stay `2^32` to remain compatible
    /// with the rest of the protocol.
    pub fn guess_value(encrypted: &RistrettoPoint, g: &RistrettoPoint, upper: u64) -> Option<u64> {
        let mut guess = RistrettoPoint::default();
        for i in 0..upper {
            if &guess == encrypted {
                return Some(i);
            }
            guess += g;
        }
        None
    }

    /// Recovers the plaintext balance held by `sk`, or `None` if it exceeds
    /// `upper`.
    pub fn decrypt(&self, sk: &Scalar, g: &RistrettoPoint, upper: u64) -> Option<u64> {
        let point = self.decrypt_point(sk);
        Self::guess_value(&point, g, upper)
    }

    pub fn add(&self, other: &Commitment) -> Commitment {
        Commitment {
            c_l: self.c_l + other.c_l,
            c_r: self.c_r + other.c_r,
        }
    }

    pub fn sub(&self, other: &Commitment) -> Commitment {
        Commitment {
            c_l: self.c_l - other.c_l,
            c_r: self.c_r - other.c_r,
        }
    }

    /// `C_L || C_R`, 64 bytes total.
    pub fn encode(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(self.c_l.compress().as_bytes());
        out[32..].copy_from_slice(self.c_r.compress().as_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 64 {
            return Err(Error::InvalidPointEncoding);
        }
        let c_l = decompress(&bytes[..32])?;
        let c_r = decompress(&bytes[32..])?;
        Ok(Commitment { c_l, c_r })
    }
}

impl std::ops::Add for Commitment {
    type Output = Commitment;
    fn add(self, rhs: Commitment) -> Commitment {
        Commitment::add(&self, &rhs)
    }
}

impl std::ops::Sub for Commitment {
    type Output = Commitment;
    fn sub(self, rhs: Commitment) -> Commitment {
        Commitment::sub(&self, &rhs)
    }
}

/// Decodes a 32-byte canonical Ristretto255 point encoding.
pub fn decompress(bytes: &[u8]) -> Result<RistrettoPoint> {
    if bytes.len() != 32 {
        return Err(Error::InvalidPointEncoding);
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    CompressedRistretto(arr)
        .decompress()
        .ok_or(Error::InvalidPointEncoding)
}

/// Decodes a 32-byte canonical scalar encoding.
pub fn decode_scalar(bytes: &[u8]) -> Result<Scalar> {
    if bytes.len() != 32 {
        return Err(Error::InvalidScalarEncoding);
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    Option::from(Scalar::from_canonical_bytes(arr)).ok_or(Error::InvalidScalarEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;

    const G: RistrettoPoint = RISTRETTO_BASEPOINT_POINT;

    #[test]
    fn commitment_arithmetic_round_trips_plaintext() {
        let sk = Scalar::from(42u64);
        let y = sk * G;
        let c = Commitment::encrypt(Scalar::from(100u64), Scalar::from(7u64), &y, &G);
        assert_eq!(c.decrypt(&sk, &G, 1_000), Some(100));
    }

    #[test]
    fn homomorphic_add_and_sub() {
        let sk = Scalar::from(11u64);
        let y = sk * G;
        let r = Scalar::from(3u64);
        let a = Commitment::encrypt(Scalar::from(30u64), r, &y, &G);
        let b = Commitment::encrypt(Scalar::from(12u64), Scalar::ZERO, &y, &G);
        let sum = a.add(&b);
        assert_eq!(sum.decrypt(&sk, &G, 1_000), Some(42));
        let diff = sum.sub(&b);
        assert_eq!(diff.decrypt(&sk, &G, 1_000), Some(30));
    }

    #[test]
    fn encode_decode_round_trip() {
        let sk = Scalar::from(5u64);
        let y = sk * G;
        let c = Commitment::encrypt(Scalar::from(9u64), Scalar::from(2u64), &y, &G);
        let decoded = Commitment::decode(&c.encode()).unwrap();
        assert_eq!(c, decoded);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert!(Commitment::decode(&[0u8; 63]).is_err());
    }

    #[test]
    fn guess_value_fails_past_upper_bound() {
        let point = Scalar::from(50u64) * G;
        assert_eq!(Commitment::guess_value(&point, &G, 10), None);
        assert_eq!(Commitment::guess_value(&point, &G, 51), Some(50));
    }
}
