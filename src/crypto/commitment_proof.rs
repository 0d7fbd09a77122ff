//! Chaum-Pedersen commitment-equality proof shared by Deposit and Burn
//! (§4.7). Uses a distinct, simpler challenge derivation than the rest of
//! the protocol: a SHA-256 digest of the two commitment points, expanded
//! through the account's XOF construction rather than chained through the
//! running Fiat-Shamir [`super::transcript::Transcript`].

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha256};

use super::util::scalar_from_u64;
use super::xof::Xof;

/// Proves knowledge of `sk` such that `Y = sk*G` and `C_L - B*G = sk*C_R`,
/// i.e. that the commitment `(C_L, C_R)` opens to the claimed plaintext `B`
/// under the secret key behind `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitmentProof {
    pub a_y: RistrettoPoint,
    pub a_cr: RistrettoPoint,
    pub s_sk: Scalar,
    pub b: Scalar,
}

fn challenge(a_y: &RistrettoPoint, a_cr: &RistrettoPoint) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update(a_y.compress().as_bytes());
    hasher.update(a_cr.compress().as_bytes());
    let seed: [u8; 32] = hasher.finalize().into();
    let mut xof = Xof::new(seed);
    let mut buf = [0u8; 64];
    xof.read(&mut buf);
    Scalar::from_bytes_mod_order_wide(&buf)
}

/// Builds a commitment proof that `c_r`/`c_l` (the `Y` account's own
/// commitment) opens to `amount` under `sk`, relative to generator `g`.
pub fn prove(xof: &mut Xof, sk: Scalar, c_r: RistrettoPoint, g: &RistrettoPoint, amount: u64) -> CommitmentProof {
    let k_sk = xof.random_scalar();
    let a_y = k_sk * g;
    let a_cr = k_sk * c_r;
    let c = challenge(&a_y, &a_cr);
    let s_sk = k_sk + c * sk;
    CommitmentProof {
        a_y,
        a_cr,
        s_sk,
        b: scalar_from_u64(amount),
    }
}

/// Verifies that `proof` opens `(c_l, c_r)` to its claimed plaintext under
/// public key `y`, relative to generator `g`.
pub fn verify(
    proof: &CommitmentProof,
    y: &RistrettoPoint,
    c_l: &RistrettoPoint,
    c_r: &RistrettoPoint,
    g: &RistrettoPoint,
) -> bool {
    let c = challenge(&proof.a_y, &proof.a_cr);

    let lhs1 = proof.s_sk * g;
    let rhs1 = proof.a_y + c * y;
    if lhs1 != rhs1 {
        return false;
    }

    let lhs2 = proof.s_sk * c_r;
    let rhs2 = proof.a_cr + c * (c_l - proof.b * g);
    lhs2 == rhs2
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;

    const G: RistrettoPoint = RISTRETTO_BASEPOINT_POINT;

    #[test]
    fn honest_proof_verifies() {
        let mut xof = Xof::new([21u8; 32]);
        let sk = Scalar::from(17u64);
        let y = sk * G;
        let r = Scalar::from(5u64);
        let amount = 250u64;
        let c_l = scalar_from_u64(amount) * G + r * y;
        let c_r = r * G;

        let proof = prove(&mut xof, sk, c_r, &G, amount);
        assert!(verify(&proof, &y, &c_l, &c_r, &G));
    }

    #[test]
    fn wrong_claimed_amount_fails() {
        let mut xof = Xof::new([22u8; 32]);
        let sk = Scalar::from(3u64);
        let y = sk * G;
        let r = Scalar::from(8u64);
        let c_l = scalar_from_u64(40) * G + r * y;
        let c_r = r * G;

        let proof = prove(&mut xof, sk, c_r, &G, 40);
        let wrong_c_l = scalar_from_u64(41) * G + r * y;
        assert!(!verify(&proof, &y, &wrong_c_l, &c_r, &G));
    }
}
