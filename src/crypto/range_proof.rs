//! Single-value range proof (§4.3), used by Withdraw to prove the sender's
//! remaining balance is non-negative and fits the configured range.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use super::generators::RangeProver;
use super::inner_product::{self, InnerProductProof};
use super::transcript::Transcript;
use super::util::{bit_vector, inner_product as vec_inner_product, multiscalar_mul, powers, substitute};
use super::xof::Xof;
use crate::error::{Error, Result};

/// A generic Pedersen-style statement `comm = v*g + gamma*h`, specialized
/// by the caller to whichever point plays the role of "H" for this proof
/// (the account/ledger code binds `h` to an ElGamal commitment's `C_R`, see
/// §4.6).
pub struct ElGamalComm {
    pub g: RistrettoPoint,
    pub h: RistrettoPoint,
    pub v: u64,
    pub gamma: Scalar,
    pub commitment: RistrettoPoint,
}

/// `T1, T2, A, S` plus the scalars and nested inner-product proof of §4.3.
/// `g`/`h` are echoed here because `h` varies per call (it is the `C_R` of
/// whichever commitment is being range-proved), unlike the aggregated proof
/// which always uses the prover's own fixed generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeProof {
    pub g: RistrettoPoint,
    pub h: RistrettoPoint,
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

/// Builds a range proof that `comm.v` fits in `prover.config.range_bits`
/// bits, binding the proof to `comm.h` and `comm.gamma`. Draws every
/// blinding scalar from `xof` and advances `transcript` in place.
pub fn prove(
    prover: &RangeProver,
    xof: &mut Xof,
    transcript: &mut Transcript,
    comm: &ElGamalComm,
) -> Result<RangeProof> {
    let n = prover.config.range_bits as usize;
    if range_exceeded(prover.config.range_bits, comm.v) {
        return Err(Error::AmountOutOfRange);
    }
    let g_vec = &prover.g_vec[..n];
    let h_vec = &prover.h_vec[..n];

    let a_l = bit_vector(comm.v, n);
    let a_r: Vec<Scalar> = a_l.iter().map(|b| b - Scalar::ONE).collect();

    let mut ah_points = g_vec.to_vec();
    ah_points.extend_from_slice(h_vec);

    let alpha = xof.random_scalar();
    let mut ar_scalars = a_l.clone();
    ar_scalars.extend(a_r.iter().copied());
    let a_commit = multiscalar_mul(&ar_scalars, &ah_points) + alpha * comm.h;

    let rho = xof.random_scalar();
    let s_l: Vec<Scalar> = (0..n).map(|_| xof.random_scalar()).collect();
    let s_r: Vec<Scalar> = (0..n).map(|_| xof.random_scalar()).collect();
    let mut sr_scalars = s_l.clone();
    sr_scalars.extend(s_r.iter().copied());
    let s_commit = multiscalar_mul(&sr_scalars, &ah_points) + rho * comm.h;

    let y = transcript.challenge(&[&a_commit, &s_commit]);
    let z = transcript.challenge(&[&a_commit, &s_commit]);
    let zz = z * z;

    let powers_of_y = powers(y, n);
    let mut l0 = Vec::with_capacity(n);
    let l1 = s_l;
    let mut r0 = Vec::with_capacity(n);
    let mut r1 = Vec::with_capacity(n);
    for i in 0..n {
        l0.push(a_l[i] - z);
        let mut ri = powers_of_y[i] * (a_r[i] + z);
        ri += zz * prover.powers_of_two[i];
        r0.push(ri);
        r1.push(powers_of_y[i] * s_r[i]);
    }

    let mut t1 = Scalar::ZERO;
    let mut t2 = Scalar::ZERO;
    for i in 0..n {
        t1 += r1[i] * l0[i] + r0[i] * l1[i];
        t2 += l1[i] * r1[i];
    }

    let tau1 = xof.random_scalar();
    let tau2 = xof.random_scalar();
    let t1_commit = t1 * prover.g + tau1 * comm.h;
    let t2_commit = t2 * prover.g + tau2 * comm.h;

    let x = transcript.challenge(&[&t1_commit, &t2_commit]);
    let xx = x * x;

    let l = substitute(&l0, &l1, x);
    let r = substitute(&r0, &r1, x);
    let t_hat = vec_inner_product(&l, &r);
    let tau_x = tau2 * xx + tau1 * x + zz * comm.gamma;
    let mu = alpha + rho * x;

    transcript.challenge(&[&t1_commit, &t2_commit]);
    let u = transcript.uniform_point();

    let y_inv_powers = powers(y.invert(), n);
    let h_prime: Vec<RistrettoPoint> = h_vec
        .iter()
        .zip(&y_inv_powers)
        .map(|(h, yi)| yi * h)
        .collect();

    let inner = inner_product::prove(transcript, l, r, u, g_vec.to_vec(), h_prime);

    Ok(RangeProof {
        g: prover.g,
        h: comm.h,
        tau_x,
        mu,
        t_hat,
        t1: t1_commit,
        t2: t2_commit,
        a: a_commit,
        s: s_commit,
        inner,
    })
}

/// Verifies a range proof against the external value-commitment `v_commit`
/// (the `C_L` of whichever ElGamal commitment was proved in range).
pub fn verify(
    prover: &RangeProver,
    transcript: &mut Transcript,
    proof: &RangeProof,
    v_commit: &RistrettoPoint,
) -> Result<bool> {
    let n = prover.config.range_bits as usize;
    let g_vec = &prover.g_vec[..n];
    let h_vec = &prover.h_vec[..n];

    let y = transcript.challenge(&[&proof.a, &proof.s]);
    let z = transcript.challenge(&[&proof.a, &proof.s]);
    let x = transcript.challenge(&[&proof.t1, &proof.t2]);
    transcript.challenge(&[&proof.t1, &proof.t2]);
    let u = transcript.uniform_point();

    let zz = z * z;
    let xx = x * x;
    let neg_z = -z;

    let powers_of_y = powers(y, n);
    let y_inv_powers = powers(y.invert(), n);
    let h_prime: Vec<RistrettoPoint> = h_vec
        .iter()
        .zip(&y_inv_powers)
        .map(|(h, yi)| yi * h)
        .collect();

    let t_hat_commit = proof.t_hat * prover.g + proof.tau_x * proof.h;
    let delta = prover.delta(y, z);
    let t_hat_commit_prime = zz * v_commit + delta * prover.g + x * proof.t1 + xx * proof.t2;
    if t_hat_commit != t_hat_commit_prime {
        return Ok(false);
    }

    let mut scalars = vec![neg_z; n];
    for i in 0..n {
        scalars.push(z * powers_of_y[i] + zz * prover.powers_of_two[i]);
    }
    let mut points = g_vec.to_vec();
    points.extend_from_slice(&h_prime);
    let p0 = multiscalar_mul(&scalars, &points);
    let p = proof.a + x * proof.s + p0;
    let p_prime = p + (-proof.mu) * proof.h + proof.t_hat * u;

    inner_product::verify(transcript, n, p_prime, u, g_vec, &h_prime, &proof.inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;

    #[test]
    fn honest_range_proof_verifies() {
        let prover = RangeProver::new(Config::default()).unwrap();
        let mut xof = Xof::new([5u8; 32]);
        let gamma = Scalar::from(77u64);
        let h = Scalar::from(9u64) * RISTRETTO_BASEPOINT_POINT;
        let v = 12345u64;
        let commitment = Scalar::from(v) * prover.g + gamma * h;
        let comm = ElGamalComm { g: prover.g, h, v, gamma, commitment };

        let mut t = Transcript::new([2u8; 64]);
        let proof = prove(&prover, &mut xof, &mut t, &comm).unwrap();

        let mut vt = Transcript::new([2u8; 64]);
        assert!(verify(&prover, &mut vt, &proof, &comm.commitment).unwrap());
    }

    #[test]
    fn out_of_range_amount_is_rejected() {
        let prover = RangeProver::new(Config::default()).unwrap();
        let mut xof = Xof::new([6u8; 32]);
        let gamma = Scalar::from(1u64);
        let h = Scalar::from(3u64) * RISTRETTO_BASEPOINT_POINT;
        let comm = ElGamalComm {
            g: prover.g,
            h,
            v: u64::MAX,
            gamma,
            commitment: RistrettoPoint::default(),
        };
        let mut t = Transcript::new([3u8; 64]);
        assert!(matches!(prove(&prover, &mut xof, &mut t, &comm), Err(Error::AmountOutOfRange)));
    }

    #[test]
    fn tampered_commitment_fails_verification() {
        let prover = RangeProver::new(Config::default()).unwrap();
        let mut xof = Xof::new([8u8; 32]);
        let gamma = Scalar::from(4u64);
        let h = Scalar::from(2u64) * RISTRETTO_BASEPOINT_POINT;
        let v = 10u64;
        let commitment = Scalar::from(v) * prover.g + gamma * h;
        let comm = ElGamalComm { g: prover.g, h, v, gamma, commitment };

        let mut t = Transcript::new([4u8; 64]);
        let proof = prove(&prover, &mut xof, &mut t, &comm).unwrap();

        let wrong_commitment = commitment + RISTRETTO_BASEPOINT_POINT;
        let mut vt = Transcript::new([4u8; 64]);
        assert!(!verify(&prover, &mut vt, &proof, &wrong_commitment).unwrap());
    }
}
