//! Transfer Sigma protocol (§4.5): moves a plaintext amount between two
//! accounts' commitments while keeping both the transferred amount and the
//! sender's remaining balance hidden and provably in range.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use super::commitment::Commitment;
use super::generators::RangeProver;
use super::sigma_range_proof::{self, SigmaRangeProof};
use super::transcript::Transcript;
use super::util::scalar_from_u64;
use super::xof::Xof;
use crate::error::{Error, Result};

/// The aggregated range proof over `(amount, remaining balance)`, the
/// Sigma-protocol transcript binding it to both parties' keys, and the two
/// ElGamal ciphertexts of the transferred amount — one decryptable by the
/// sender, one by the receiver, sharing the same `C_R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferProof {
    pub sigma_range_proof: SigmaRangeProof,
    pub ay: RistrettoPoint,
    pub ad: RistrettoPoint,
    pub ab: RistrettoPoint,
    pub ay_prime: RistrettoPoint,
    pub at: RistrettoPoint,
    pub ssk: Scalar,
    pub sr: Scalar,
    pub sb: Scalar,
    pub stau: Scalar,
    pub c_comm: Commitment,
    pub c_prime_comm: Commitment,
}

/// Builds a transfer proof moving `amount` from the sender (`sk`, `y`) to
/// `y_prime`, given the sender's current commitment and plaintext balance.
#[allow(clippy::too_many_arguments)]
pub fn prove(
    prover: &RangeProver,
    xof: &mut Xof,
    transcript: &mut Transcript,
    sk: Scalar,
    y: RistrettoPoint,
    y_prime: RistrettoPoint,
    c_old: &Commitment,
    amount: u64,
    balance: u64,
) -> Result<TransferProof> {
    let remaining = balance.checked_sub(amount).ok_or(Error::AmountOutOfRange)?;

    let b = scalar_from_u64(amount);
    let r = xof.random_scalar();
    let c = b * prover.g + r * y;
    let d = r * prover.g;
    let c_comm = Commitment::new(c, d);

    let c_prime = b * prover.g + r * y_prime;
    let c_prime_comm = Commitment::new(c_prime, d);

    let cl_new = c_old.c_l - c;
    let cr_new = c_old.c_r - d;

    let (sig_range_proof, z) = sigma_range_proof::prove(prover, xof, transcript, amount, remaining)?;

    let k_sk = xof.random_scalar();
    let k_r = xof.random_scalar();
    let k_b = xof.random_scalar();
    let k_tau = xof.random_scalar();

    let ay = k_sk * prover.g;
    let ad = k_r * prover.g;

    let zz = z * z;
    let zzz = zz * z;
    let ab = k_b * prover.g + (k_sk * zz) * d + (k_sk * zzz) * cr_new;
    let ay_prime = k_r * (y - y_prime);
    let at = (-k_b) * prover.g + k_tau * prover.h;

    let challenge = transcript.challenge(&[&ay, &ad, &ab, &ay_prime, &at]);

    let b_prime = scalar_from_u64(remaining);
    let ssk = k_sk + challenge * sk;
    let sr = k_r + challenge * r;
    let sb = k_b + challenge * (b * zz + b_prime * zzz);
    let stau = k_tau + challenge * sig_range_proof.tau_x;

    Ok(TransferProof {
        sigma_range_proof: sig_range_proof,
        ay,
        ad,
        ab,
        ay_prime,
        at,
        ssk,
        sr,
        sb,
        stau,
        c_comm,
        c_prime_comm,
    })
}

/// Verifies a transfer proof against the sender's current commitment,
/// recomputing the same challenges the prover derived.
pub fn verify(
    prover: &RangeProver,
    transcript: &mut Transcript,
    y: RistrettoPoint,
    y_prime: RistrettoPoint,
    c_old: &Commitment,
    proof: &TransferProof,
) -> Result<bool> {
    let (y_chal, z, x, ok) = sigma_range_proof::verify(prover, transcript, &proof.sigma_range_proof)?;
    if !ok {
        return Ok(false);
    }

    let challenge = transcript.challenge(&[&proof.ay, &proof.ad, &proof.ab, &proof.ay_prime, &proof.at]);

    if proof.c_comm.c_r != proof.c_prime_comm.c_r {
        return Ok(false);
    }

    if proof.ssk * prover.g != proof.ay + challenge * y {
        return Ok(false);
    }
    if proof.sr * prover.g != proof.ad + challenge * proof.c_comm.c_r {
        return Ok(false);
    }

    let c_new = c_old.sub(&proof.c_comm);
    let zz = z * z;
    let zzz = zz * z;

    let cr_term = zz * proof.c_comm.c_r + zzz * c_new.c_r;
    let left = proof.sb * prover.g + proof.ssk * cr_term;
    let cl_term = zz * proof.c_comm.c_l + zzz * c_new.c_l;
    let right = proof.ab + challenge * cl_term;
    if left != right {
        return Ok(false);
    }

    let left = proof.sr * (y - y_prime);
    let right = proof.ay_prime + challenge * (proof.c_comm.c_l - proof.c_prime_comm.c_l);
    if left != right {
        return Ok(false);
    }

    let delta = prover.agg_delta(y_chal, z);
    let t = proof.sigma_range_proof.t_hat - delta;
    let tmp_scalar = t * challenge - proof.sb;
    let left = tmp_scalar * prover.g + proof.stau * prover.h;
    let xx = x * x;
    let t12 = x * proof.sigma_range_proof.t1 + xx * proof.sigma_range_proof.t2;
    let right = proof.at + challenge * t12;

    Ok(left == right)
}
