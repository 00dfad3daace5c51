use bls12_381::{ff::Field, Scalar};

/// A shift `g` for evaluating over the coset `g * D` of a domain `D`, together
/// with its inverse for interpolating back.
///
/// [`Domain::transform`](crate::Domain::transform) always shifts by the
/// field's multiplicative generator; this type lets the `coset_*_scalars`
/// helpers use any non-zero shift.
#[derive(Debug, Clone)]
pub struct CosetFFT {
    pub generator: Scalar,
    pub generator_inv: Scalar,
}

impl CosetFFT {
    /// # Panics
    /// Panics if `gen` is zero, which does not define a coset.
    pub fn new(gen: Scalar) -> Self {
        Self {
            generator: gen,
            generator_inv: gen.invert().expect("cosets should be non-zero"),
        }
    }
}
