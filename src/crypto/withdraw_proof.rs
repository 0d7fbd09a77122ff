//! Withdraw Sigma protocol (§4.6): reveals a plaintext amount while proving
//! the sender's remaining balance stays non-negative and in range.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use super::commitment::Commitment;
use super::generators::RangeProver;
use super::range_proof::{self, ElGamalComm, RangeProof};
use super::transcript::Transcript;
use super::util::scalar_from_u64;
use super::xof::Xof;
use crate::error::Result;

/// `C_WD` (the fresh encryption of the withdrawn amount), the embedded
/// range proof over the sender's post-withdrawal balance, and the
/// Sigma-protocol transcript linking them to the sender's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawProof {
    pub comm_wd: Commitment,
    pub range_proof: RangeProof,
    pub a_d: RistrettoPoint,
    pub a_y: RistrettoPoint,
    pub a_g: RistrettoPoint,
    pub s_sk: Scalar,
    pub s_r: Scalar,
}

/// Builds a withdraw proof for `amount`, given the sender's secret key,
/// public key, current commitment and plaintext remaining balance.
pub fn prove(
    prover: &RangeProver,
    xof: &mut Xof,
    transcript: &mut Transcript,
    sk: Scalar,
    y: RistrettoPoint,
    c_old: &Commitment,
    amount: u64,
    remaining: u64,
) -> Result<WithdrawProof> {
    let r = xof.random_scalar();
    let comm_wd = Commitment::encrypt(scalar_from_u64(amount), r, &y, &prover.g);
    let c_new = c_old.sub(&comm_wd);

    let elgamal = ElGamalComm {
        g: prover.g,
        h: c_new.c_r,
        v: remaining,
        gamma: sk,
        commitment: c_new.c_l,
    };
    let range_proof = range_proof::prove(prover, xof, transcript, &elgamal)?;

    let k_r = xof.random_scalar();
    let k_sk = xof.random_scalar();
    let a_y = k_r * y;
    let a_d = k_sk * comm_wd.c_r;
    let a_g = k_r * prover.g;

    let c = transcript.challenge(&[&a_d, &a_y, &a_g]);
    let s_sk = k_sk + c * sk;
    let s_r = k_r + c * r;

    Ok(WithdrawProof {
        comm_wd,
        range_proof,
        a_d,
        a_y,
        a_g,
        s_sk,
        s_r,
    })
}

/// Verifies a withdraw proof: the embedded range proof over the sender's
/// post-withdrawal balance, then the three Sigma equations binding it to
/// the sender's public key and the revealed amount.
pub fn verify(
    prover: &RangeProver,
    transcript: &mut Transcript,
    y: RistrettoPoint,
    c_old: &Commitment,
    amount: u64,
    proof: &WithdrawProof,
) -> Result<bool> {
    let c_new = c_old.sub(&proof.comm_wd);
    if proof.range_proof.h != c_new.c_r {
        return Ok(false);
    }
    if !range_proof::verify(prover, transcript, &proof.range_proof, &c_new.c_l)? {
        return Ok(false);
    }

    let c = transcript.challenge(&[&proof.a_d, &proof.a_y, &proof.a_g]);
    let v = scalar_from_u64(amount);
    let cb_g = (c * v) * prover.g;

    let lhs1 = cb_g + proof.s_sk * proof.comm_wd.c_r;
    let rhs1 = proof.a_d + c * proof.comm_wd.c_l;

    let lhs2 = proof.s_r * prover.g;
    let rhs2 = proof.a_g + c * proof.comm_wd.c_r;

    let lhs3 = cb_g + proof.s_r * y;
    let rhs3 = proof.a_y + c * proof.comm_wd.c_l;

    Ok(lhs1 == rhs1 && lhs2 == rhs2 && lhs3 == rhs3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn honest_withdraw_proof_verifies() {
        let prover = RangeProver::new(Config::default()).unwrap();
        let mut xof = Xof::new([31u8; 32]);
        let sk = Scalar::from(19u64);
        let y = sk * prover.g;
        let c_old = Commitment::encrypt(scalar_from_u64(100), Scalar::from(6u64), &y, &prover.g);

        let mut t = Transcript::new([40u8; 64]);
        let proof = prove(&prover, &mut xof, &mut t, sk, y, &c_old, 60, 40).unwrap();

        let mut vt = Transcript::new([40u8; 64]);
        assert!(verify(&prover, &mut vt, y, &c_old, 60, &proof).unwrap());
    }

    #[test]
    fn claiming_a_different_amount_fails() {
        let prover = RangeProver::new(Config::default()).unwrap();
        let mut xof = Xof::new([32u8; 32]);
        let sk = Scalar::from(23u64);
        let y = sk * prover.g;
        let c_old = Commitment::encrypt(scalar_from_u64(100), Scalar::from(2u64), &y, &prover.g);

        let mut t = Transcript::new([41u8; 64]);
        let proof = prove(&prover, &mut xof, &mut t, sk, y, &c_old, 60, 40).unwrap();

        let mut vt = Transcript::new([41u8; 64]);
        assert!(!verify(&prover, &mut vt, y, &c_old, 61, &proof).unwrap());
    }
}
