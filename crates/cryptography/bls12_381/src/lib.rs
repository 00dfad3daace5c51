// Re-export ff, so other crates do not need to directly import(and independently version) it
pub use ff;

pub mod traits {
    pub use ff::{Field, PrimeField};
}

use ff::Field;

/// Scalar field element for the BLS12-381 curve.
///
/// The multiplicative group of this field has a subgroup of order `2^32`,
/// which bounds the size of every transform domain built on top of it.
pub type Scalar = blstrs::Scalar;

/// The radix-2 butterfly: `(a, b) <- (a + b, a - b)`.
///
/// Both outputs are computed from the original value of `a`.
#[inline(always)]
pub fn butterfly<F: Field>(a: &mut F, b: &mut F) {
    let t = *b;
    *b = *a - t;
    *a += t;
}
