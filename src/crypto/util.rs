//! Vector and scalar arithmetic shared by the inner-product argument and the
//! range-proof generators/verifiers.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::VartimeMultiscalarMul;

/// `<a, b>`.
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> Scalar {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Elements at even positions: `0, 2, 4, ...`. Named `left` to match the
/// component design's parity convention (even indices fold into the "left"
/// half of an inner-product round, odd indices into "right").
pub fn left<T: Copy>(v: &[T]) -> Vec<T> {
    v.iter().step_by(2).copied().collect()
}

/// Elements at odd positions: `1, 3, 5, ...`.
pub fn right<T: Copy>(v: &[T]) -> Vec<T> {
    v.iter().skip(1).step_by(2).copied().collect()
}

/// `1, y, y^2, ..., y^(n-1)`.
pub fn powers(y: Scalar, n: usize) -> Vec<Scalar> {
    let mut out = Vec::with_capacity(n);
    let mut cur = Scalar::ONE;
    for _ in 0..n {
        out.push(cur);
        cur *= y;
    }
    out
}

/// Little-endian bit decomposition of `v` into `l` scalars, each `0` or `1`.
pub fn bit_vector(v: u64, l: usize) -> Vec<Scalar> {
    (0..l)
        .map(|i| Scalar::from((v >> i) & 1))
        .collect()
}

/// `sum(a_i * G_i)`.
pub fn multiscalar_mul(scalars: &[Scalar], points: &[RistrettoPoint]) -> RistrettoPoint {
    RistrettoPoint::vartime_multiscalar_mul(scalars.iter().copied(), points.iter().copied())
}

/// `f(x) = a0_i + a1_i * x` applied element-wise.
pub fn substitute(a0: &[Scalar], a1: &[Scalar], x: Scalar) -> Vec<Scalar> {
    a0.iter().zip(a1).map(|(c0, c1)| c0 + c1 * x).collect()
}

/// Converts a small cleartext amount into its scalar representation. This
/// never fails: every `u64` is canonical modulo the group order.
pub fn scalar_from_u64(v: u64) -> Scalar {
    Scalar::from(v)
}

/// Recovers a `u64` from a scalar that is known to represent a small
/// cleartext value (the low 8 bytes of its canonical encoding).
pub fn u64_from_scalar(s: &Scalar) -> u64 {
    let bytes = s.to_bytes();
    u64::from_le_bytes(bytes[..8].try_into().expect("8 bytes"))
}
