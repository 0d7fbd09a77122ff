//! Inner-product argument (§4.2): reduces a `<a, b> = c` statement over
//! vectors of length `n` to two scalars in `log2(n)` rounds.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use super::transcript::Transcript;
use super::util::{inner_product, left, multiscalar_mul, right};
use crate::error::{Error, Result};

/// A logarithmic-size proof that `<a, b>` equals a value implicitly bound
/// into the commitment `P` the verifier supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerProductProof {
    pub l_vec: Vec<RistrettoPoint>,
    pub r_vec: Vec<RistrettoPoint>,
    pub a: Scalar,
    pub b: Scalar,
}

impl InnerProductProof {
    pub fn iterations(&self) -> usize {
        self.l_vec.len()
    }
}

/// `sum(a_i*G_i) + sum(b_i*H_i) + <a,b>*u`.
fn commit(a: &[Scalar], b: &[Scalar], g: &[RistrettoPoint], h: &[RistrettoPoint], u: &RistrettoPoint) -> RistrettoPoint {
    let product = inner_product(a, b);
    let mut scalars: Vec<Scalar> = Vec::with_capacity(a.len() + b.len() + 1);
    scalars.extend_from_slice(a);
    scalars.extend_from_slice(b);
    scalars.push(product);
    let mut points: Vec<RistrettoPoint> = Vec::with_capacity(g.len() + h.len() + 1);
    points.extend_from_slice(g);
    points.extend_from_slice(h);
    points.push(*u);
    multiscalar_mul(&scalars, &points)
}

/// Runs the prover side: folds `(a, b, G, H)` down to a single pair of
/// scalars, emitting one `(L, R)` pair per round. `transcript` is advanced
/// in place; the caller has already committed whatever precedes the inner
/// product argument (e.g. `A`, `S`, `T1`, `T2`).
pub fn prove(
    transcript: &mut Transcript,
    mut a: Vec<Scalar>,
    mut b: Vec<Scalar>,
    u: RistrettoPoint,
    mut g: Vec<RistrettoPoint>,
    mut h: Vec<RistrettoPoint>,
) -> InnerProductProof {
    let mut l_vec = Vec::new();
    let mut r_vec = Vec::new();

    while a.len() != 1 {
        let a_l = left(&a);
        let a_r = right(&a);
        let b_l = left(&b);
        let b_r = right(&b);
        let g_l = left(&g);
        let g_r = right(&g);
        let h_l = left(&h);
        let h_r = right(&h);

        let l_i = commit(&a_l, &b_r, &g_r, &h_l, &u);
        let r_i = commit(&a_r, &b_l, &g_l, &h_r, &u);

        let x = transcript.challenge(&[&l_i, &r_i]);
        let x_inv = x.invert();

        g = g_l
            .iter()
            .zip(&g_r)
            .map(|(gl, gr)| x_inv * gl + x * gr)
            .collect();
        h = h_l
            .iter()
            .zip(&h_r)
            .map(|(hl, hr)| x * hl + x_inv * hr)
            .collect();

        a = a_l.iter().zip(&a_r).map(|(al, ar)| x * al + x_inv * ar).collect();
        b = b_l.iter().zip(&b_r).map(|(bl, br)| x_inv * bl + x * br).collect();

        l_vec.push(l_i);
        r_vec.push(r_i);
    }

    InnerProductProof {
        l_vec,
        r_vec,
        a: a[0],
        b: b[0],
    }
}

/// Reconstructs the per-index folding coefficients `s_i` from the round
/// challenges without replaying the fold (§4.2 verifier shortcut).
fn fold_coefficients(challenges: &[Scalar], challenges_sq: &[Scalar], n: usize) -> Vec<Scalar> {
    let mut s = vec![Scalar::ONE; n];
    let product: Scalar = challenges.iter().product();
    s[0] = product.invert();
    for i in 1..n {
        let mut si = s[0];
        for (j, csq) in challenges_sq.iter().enumerate() {
            if (i >> j) & 1 == 1 {
                si *= csq;
            }
        }
        s[i] = si;
    }
    s
}

/// Verifies an inner-product proof against the commitment `p` the caller
/// has already assembled from the outer range-proof equations.
pub fn verify(
    transcript: &mut Transcript,
    n: usize,
    p: RistrettoPoint,
    u: RistrettoPoint,
    g: &[RistrettoPoint],
    h: &[RistrettoPoint],
    proof: &InnerProductProof,
) -> Result<bool> {
    let k = proof.l_vec.len();
    if k != proof.r_vec.len() || (1usize << k) != n {
        return Ok(false);
    }

    let mut challenges = Vec::with_capacity(k);
    for i in 0..k {
        challenges.push(transcript.challenge(&[&proof.l_vec[i], &proof.r_vec[i]]));
    }
    let challenges_sq: Vec<Scalar> = challenges.iter().map(|c| c * c).collect();

    let s = fold_coefficients(&challenges, &challenges_sq, n);

    let a_s: Vec<Scalar> = s.iter().map(|si| proof.a * si).collect();
    let b_sinv: Vec<Scalar> = (0..n).map(|i| proof.b * s[n - 1 - i]).collect();

    let rhs = multiscalar_mul(&a_s, g) + multiscalar_mul(&b_sinv, h) + (proof.a * proof.b) * u;

    let mut lhs = p;
    for i in 0..k {
        let inv = challenges_sq[i].invert();
        lhs += challenges_sq[i] * proof.l_vec[i] + inv * proof.r_vec[i];
    }

    Ok(lhs == rhs)
}

pub fn encoded_len_ok(l_vec_len: usize, r_vec_len: usize) -> Result<()> {
    if l_vec_len != r_vec_len {
        return Err(Error::MalformedGenerators);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generators::generate_points;

    #[test]
    fn proves_and_verifies_a_small_statement() {
        let n = 4usize;
        let (g, h) = generate_points(n, b"test inner product");
        let u = RistrettoPoint::default();
        let a: Vec<Scalar> = (1..=n as u64).map(Scalar::from).collect();
        let b: Vec<Scalar> = (1..=n as u64).map(|i| Scalar::from(i * 2)).collect();
        let p = commit(&a, &b, &g, &h, &u);

        let mut prover_t = Transcript::new([0u8; 64]);
        let proof = prove(&mut prover_t, a, b, u, g.clone(), h.clone());

        let mut verifier_t = Transcript::new([0u8; 64]);
        assert!(verify(&mut verifier_t, n, p, u, &g, &h, &proof).unwrap());
    }

    #[test]
    fn tampered_proof_fails() {
        let n = 4usize;
        let (g, h) = generate_points(n, b"test inner product tamper");
        let u = RistrettoPoint::default();
        let a: Vec<Scalar> = (1..=n as u64).map(Scalar::from).collect();
        let b: Vec<Scalar> = (1..=n as u64).map(|i| Scalar::from(i * 2)).collect();
        let p = commit(&a, &b, &g, &h, &u);

        let mut prover_t = Transcript::new([1u8; 64]);
        let mut proof = prove(&mut prover_t, a, b, u, g.clone(), h.clone());
        proof.a += Scalar::ONE;

        let mut verifier_t = Transcript::new([1u8; 64]);
        assert!(!verify(&mut verifier_t, n, p, u, &g, &h, &proof).unwrap());
    }
}
