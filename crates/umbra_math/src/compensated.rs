//! Error-compensated floating point primitives.
//!
//! Products and sums are carried as an unevaluated pair `(value, error)` so the
//! rounding error of each step can be folded back in at the end. The matrix
//! engine builds its 3x3/4x4 determinant, inverse and product on these.

/// A float together with the rounding error accumulated while computing it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompensatedFloat {
    pub value: f32,
    pub error: f32,
}

impl CompensatedFloat {
    #[inline]
    pub fn new(value: f32, error: f32) -> Self {
        Self { value, error }
    }
}

impl From<CompensatedFloat> for f32 {
    #[inline]
    fn from(c: CompensatedFloat) -> Self {
        c.value + c.error
    }
}

/// `a * b` with its exact rounding error (recovered with a fused multiply-add).
#[inline]
pub fn two_product(a: f32, b: f32) -> CompensatedFloat {
    let ab = a * b;
    CompensatedFloat::new(ab, a.mul_add(b, -ab))
}

/// `a + b` with its exact rounding error (Knuth's branch-free two-sum).
#[inline]
pub fn two_sum(a: f32, b: f32) -> CompensatedFloat {
    let s = a + b;
    let d = s - a;
    CompensatedFloat::new(s, (a - (s - d)) + (b - d))
}

/// Computes `a * b - c * d` without catastrophic cancellation.
#[inline]
pub fn difference_of_products(a: f32, b: f32, c: f32, d: f32) -> f32 {
    let cd = c * d;
    let dop = a.mul_add(b, -cd);
    let error = (-c).mul_add(d, cd);
    dop + error
}

/// Computes `a * b + c * d` without catastrophic cancellation.
#[inline]
pub fn sum_of_products(a: f32, b: f32, c: f32, d: f32) -> f32 {
    let cd = c * d;
    let sop = a.mul_add(b, cd);
    let error = c.mul_add(d, -cd);
    sop + error
}

/// Compensated inner product of interleaved pairs: `[a0, b0, a1, b1, ...]`
/// evaluates `a0*b0 + a1*b1 + ...`.
///
/// Pairs are folded right to left; every product and partial sum contributes
/// its rounding error to a separate accumulator that is added once at the end.
pub fn inner_product(terms: &[f32]) -> f32 {
    debug_assert!(
        terms.len() % 2 == 0,
        "inner_product expects interleaved pairs, got {} terms",
        terms.len()
    );

    let mut pairs = terms.chunks_exact(2).rev();
    let Some(last) = pairs.next() else {
        return 0.0;
    };

    let mut acc = two_product(last[0], last[1]);
    for pair in pairs {
        let ab = two_product(pair[0], pair[1]);
        let sum = two_sum(ab.value, acc.value);
        acc = CompensatedFloat::new(sum.value, ab.error + (acc.error + sum.error));
    }
    f32::from(acc)
}
