//! Deterministic generator derivation and the shared `RangeProver` engine.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use super::util::{inner_product, powers};
use super::xof::Xof;
use crate::config::Config;
use crate::error::{Error, Result};

/// Fixed domain-separation seed for the shared generator vectors. Every
/// `RangeProver` in the process derives the same generators from this seed,
/// which is required for provers and the ledger to agree on what a proof
/// commits to.
const GENERATOR_SEED: &[u8] = b"innerproduct rangeproof";

/// Derives `n` pairs of independent generators `(G_i, H_i)` from a fixed
/// seed, each uniformly sampled via a 128-byte read from a seeded XOF (the
/// first 64 bytes become `G_i`, the next 64 become `H_i`).
pub fn generate_points(n: usize, seed: &[u8]) -> (Vec<RistrettoPoint>, Vec<RistrettoPoint>) {
    let mut xof = Xof::from_bytes(seed);
    let mut g = Vec::with_capacity(n);
    let mut h = Vec::with_capacity(n);
    for _ in 0..n {
        let mut buf = [0u8; 128];
        xof.read(&mut buf);
        let mut g_bytes = [0u8; 64];
        let mut h_bytes = [0u8; 64];
        g_bytes.copy_from_slice(&buf[..64]);
        h_bytes.copy_from_slice(&buf[64..]);
        g.push(RistrettoPoint::from_uniform_bytes(&g_bytes));
        h.push(RistrettoPoint::from_uniform_bytes(&h_bytes));
    }
    (g, h)
}

/// The shared range-proof engine: generator vectors long enough for the
/// aggregated (2N-element) statement, the two base generators used for
/// scalar commitments, and the powers-of-two table used to fold a bit
/// decomposition back into a value.
///
/// Unlike the source this is ported from, `RangeProver` carries no XOF of
/// its own: every routine that needs randomness takes the caller's
/// `&mut Xof` explicitly (see [`crate::account::Account`] and DESIGN.md).
pub struct RangeProver {
    pub config: Config,
    pub g: RistrettoPoint,
    pub h: RistrettoPoint,
    pub g_vec: Vec<RistrettoPoint>,
    pub h_vec: Vec<RistrettoPoint>,
    pub powers_of_two: Vec<Scalar>,
}

impl RangeProver {
    /// Builds the shared engine for `config`. `config.range_bits` bounds the
    /// length of a single-value proof; the aggregated proof additionally
    /// uses `config.aggregate_count` copies of that length.
    pub fn new(config: Config) -> Result<Self> {
        if config.range_bits == 0 || config.range_bits > 64 {
            return Err(Error::MalformedGenerators);
        }
        let n = config.range_bits as usize;
        let agg_len = config.aggregate_len();
        let (mut g_all, mut h_all) = generate_points(agg_len + 1, GENERATOR_SEED);
        let g = g_all.remove(0);
        let h = h_all.remove(0);
        let powers_of_two = powers(Scalar::from(2u64), n);
        Ok(RangeProver {
            config,
            g,
            h,
            g_vec: g_all,
            h_vec: h_all,
            powers_of_two,
        })
    }

    /// `v*G + r*H`, a Pedersen commitment under the prover's own base
    /// generators (used to commit to the `t1`/`t2` coefficients of the
    /// aggregated range proof, which have no external generator to borrow).
    pub fn commit(&self, v: Scalar, r: Scalar) -> RistrettoPoint {
        v * self.g + r * self.h
    }

    /// `δ(y, z)` for the single-value range proof (§4.3).
    pub fn delta(&self, y: Scalar, z: Scalar) -> Scalar {
        let n = self.config.range_bits as usize;
        let zz = z * z;
        let zzz = zz * z;
        let ones = vec![Scalar::ONE; n];
        let powers_of_y = powers(y, n);
        let inner_y = inner_product(&ones, &powers_of_y);
        let inner_2 = inner_product(&ones, &self.powers_of_two);
        (z - zz) * inner_y - zzz * inner_2
    }

    /// `δ(y, z, count)` for the aggregated range proof (§4.4).
    pub fn agg_delta(&self, y: Scalar, z: Scalar) -> Scalar {
        let n = self.config.range_bits;
        let count = self.config.aggregate_count;
        let bit_len = (n * count) as usize;
        let zz = z * z;
        let powers_of_z = powers(z, (count + 3) as usize);
        let powers_of_y = powers(y, bit_len);
        let sum_powers_of_two: Scalar = self.powers_of_two.iter().sum();
        let sum_y: Scalar = powers_of_y.iter().sum();

        let mut p2 = Scalar::ZERO;
        for j in 1..=count {
            p2 += powers_of_z[(j + 2) as usize] * sum_powers_of_two;
        }
        (z - zz) * sum_y - p2
    }
}
