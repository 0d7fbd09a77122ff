//! Aggregated range proof (§4.4): proves two values — a transferred amount
//! and the sender's remaining balance — are each in range with one
//! logarithmic-size proof. Used by Transfer; its outer Sigma protocol
//! (§4.5) binds the exported `z` challenge to the ElGamal commitments.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use super::generators::RangeProver;
use super::inner_product::{self, InnerProductProof};
use super::transcript::Transcript;
use super::util::{bit_vector, inner_product as vec_inner_product, multiscalar_mul, powers, substitute};
use super::xof::Xof;
use crate::error::{Error, Result};

/// `T1, T2, A, S` plus scalars and the nested inner-product proof. Unlike
/// [`super::range_proof::RangeProof`] there is no `g`/`h` pair to echo: the
/// aggregated proof always commits `t1`/`t2` under the prover's own fixed
/// generators, so `RangeProver::g`/`h` at verification time are enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigmaRangeProof {
    pub tau_x: Scalar,
    pub mu: Scalar,
    pub t_hat: Scalar,
    pub t1: RistrettoPoint,
    pub t2: RistrettoPoint,
    pub a: RistrettoPoint,
    pub s: RistrettoPoint,
    pub inner: InnerProductProof,
}

fn range_exceeded(bits: u64, v: u64) -> bool {
    bits < 64 && (v >> bits) != 0
}

/// Builds an aggregated range proof that `b` and `b_prime` each fit
/// `prover.config.range_bits` bits. Returns the proof together with the
/// exported `z` challenge, which the caller's outer Sigma protocol must
/// bind to.
pub fn prove(
    prover: &RangeProver,
    xof: &mut Xof,
    transcript: &mut Transcript,
    b: u64,
    b_prime: u64,
) -> Result<(SigmaRangeProof, Scalar)> {
    let n = prover.config.range_bits;
    if range_exceeded(n, b) || range_exceeded(n, b_prime) {
        return Err(Error::AmountOutOfRange);
    }
    let n = n as usize;
    let count = prover.config.aggregate_count;
    let bit_len = n * count as usize;

    let g_vec = &prover.g_vec[..bit_len];
    let h_vec = &prover.h_vec[..bit_len];

    let mut a_l = bit_vector(b, n);
    a_l.extend(bit_vector(b_prime, n));
    let a_r: Vec<Scalar> = a_l.iter().map(|bit| bit - Scalar::ONE).collect();

    let mut gh_points = g_vec.to_vec();
    gh_points.extend_from_slice(h_vec);

    let alpha = xof.random_scalar();
    let mut ar_scalars = a_l.clone();
    ar_scalars.extend(a_r.iter().copied());
    let a_commit = multiscalar_mul(&ar_scalars, &gh_points) + alpha * prover.h;

    let rho = xof.random_scalar();
    let s_l: Vec<Scalar> = (0..bit_len).map(|_| xof.random_scalar()).collect();
    let s_r: Vec<Scalar> = (0..bit_len).map(|_| xof.random_scalar()).collect();
    let mut sr_scalars = s_l.clone();
    sr_scalars.extend(s_r.iter().copied());
    let s_commit = multiscalar_mul(&sr_scalars, &gh_points) + rho * prover.h;

    let y = transcript.challenge(&[&a_commit, &s_commit]);
    let z = transcript.challenge(&[&a_commit, &s_commit]);

    let powers_of_y = powers(y, bit_len);
    let powers_of_z = powers(z, count as usize + 2);

    let mut eta = vec![Scalar::ZERO; bit_len];
    for j in 1..=count as usize {
        for i in 0..n {
            eta[(j - 1) * n + i] = powers_of_z[j + 1] * prover.powers_of_two[i];
        }
    }

    let mut l0 = Vec::with_capacity(bit_len);
    let l1 = s_l;
    let mut r0 = Vec::with_capacity(bit_len);
    let mut r1 = Vec::with_capacity(bit_len);
    for i in 0..bit_len {
        l0.push(a_l[i] - z);
        let mut ri = powers_of_y[i] * (a_r[i] + z);
        ri += eta[i];
        r0.push(ri);
        r1.push(powers_of_y[i] * s_r[i]);
    }

    let mut t1 = Scalar::ZERO;
    let mut t2 = Scalar::ZERO;
    for i in 0..bit_len {
        t1 += r1[i] * l0[i] + r0[i] * l1[i];
        t2 += l1[i] * r1[i];
    }

    let tau1 = xof.random_scalar();
    let tau2 = xof.random_scalar();
    let t1_commit = prover.commit(t1, tau1);
    let t2_commit = prover.commit(t2, tau2);

    let x = transcript.challenge(&[&t1_commit, &t2_commit]);
    let xx = x * x;

    let l = substitute(&l0, &l1, x);
    let r = substitute(&r0, &r1, x);
    let t_hat = vec_inner_product(&l, &r);
    // Unlike the single-value proof, tau_x here binds only tau1/tau2: the
    // missing blinding terms for b/b' are folded into the outer Sigma
    // protocol's V4/V6 checks instead.
    let tau_x = tau2 * xx + tau1 * x;
    let mu = alpha + rho * x;

    transcript.challenge(&[&t1_commit, &t2_commit]);
    let u = transcript.uniform_point();

    let y_inv_powers = powers(y.invert(), bit_len);
    let h_prime: Vec<RistrettoPoint> = h_vec
        .iter()
        .zip(&y_inv_powers)
        .map(|(h, yi)| yi * h)
        .collect();

    let inner = inner_product::prove(transcript, l, r, u, g_vec.to_vec(), h_prime);

    Ok((
        SigmaRangeProof {
            tau_x,
            mu,
            t_hat,
            t1: t1_commit,
            t2: t2_commit,
            a: a_commit,
            s: s_commit,
            inner,
        },
        z,
    ))
}

/// Verifies an aggregated range proof and returns the recovered
/// `(y, z, x)` challenges together with the result, since the caller's
/// outer Sigma protocol must re-derive the same challenges to check its own
/// equations against the same transcript state.
pub fn verify(
    prover: &RangeProver,
    transcript: &mut Transcript,
    proof: &SigmaRangeProof,
) -> Result<(Scalar, Scalar, Scalar, bool)> {
    let n = prover.config.range_bits as usize;
    let count = prover.config.aggregate_count as usize;
    let bit_len = n * count;

    let g_vec = &prover.g_vec[..bit_len];
    let h_vec = &prover.h_vec[..bit_len];

    let y = transcript.challenge(&[&proof.a, &proof.s]);
    let z = transcript.challenge(&[&proof.a, &proof.s]);
    let x = transcript.challenge(&[&proof.t1, &proof.t2]);
    transcript.challenge(&[&proof.t1, &proof.t2]);
    let u = transcript.uniform_point();

    let neg_z = -z;
    let powers_of_z = powers(z, count + 2);
    let powers_of_y = powers(y, bit_len);
    let y_inv_powers = powers(y.invert(), bit_len);
    let h_prime: Vec<RistrettoPoint> = h_vec
        .iter()
        .zip(&y_inv_powers)
        .map(|(h, yi)| yi * h)
        .collect();

    let mut scalars = vec![neg_z; bit_len];
    for j in 0..count {
        for i in 0..n {
            scalars.push(z * powers_of_y[n * j + i] + powers_of_z[j + 2] * prover.powers_of_two[i]);
        }
    }
    let mut points = g_vec.to_vec();
    points.extend_from_slice(&h_prime);
    let p0 = multiscalar_mul(&scalars, &points);
    let p = proof.a + x * proof.s + p0;
    let p_prime = p + (-proof.mu) * prover.h + proof.t_hat * u;

    let ok = inner_product::verify(transcript, bit_len, p_prime, u, g_vec, &h_prime, &proof.inner)?;
    Ok((y, z, x, ok))
}
