use bls12_381::{butterfly, ff::Field, Scalar};

/// Butterfly between two positions of the same slice, `i < j`.
#[inline(always)]
fn butterfly_at(a: &mut [Scalar], i: usize, j: usize) {
    debug_assert!(i < j);
    let (lo, hi) = a.split_at_mut(j);
    butterfly(&mut lo[i], &mut hi[0]);
}

/// Size-8 decimation-in-frequency transform.
///
/// Equivalent to three levels of [`dif_fft`](crate::fft::dif_fft) with `gen`
/// a primitive 8th root of unity: natural order in, bit-reversed order out.
pub(crate) fn ker_dif8(a: &mut [Scalar], gen: Scalar) {
    debug_assert_eq!(a.len(), 8);

    let w1 = gen;
    let w2 = gen.square();
    let w3 = w2 * gen;

    butterfly_at(a, 0, 4);
    butterfly_at(a, 1, 5);
    butterfly_at(a, 2, 6);
    butterfly_at(a, 3, 7);
    a[5] *= w1;
    a[6] *= w2;
    a[7] *= w3;

    butterfly_at(a, 0, 2);
    butterfly_at(a, 1, 3);
    butterfly_at(a, 4, 6);
    butterfly_at(a, 5, 7);
    a[3] *= w2;
    a[7] *= w2;

    butterfly_at(a, 0, 1);
    butterfly_at(a, 2, 3);
    butterfly_at(a, 4, 5);
    butterfly_at(a, 6, 7);
}

/// Size-8 decimation-in-time transform.
///
/// The mirror image of [`ker_dif8`]: bit-reversed order in, natural order out.
pub(crate) fn ker_dit8(a: &mut [Scalar], gen: Scalar) {
    debug_assert_eq!(a.len(), 8);

    let w1 = gen;
    let w2 = gen.square();
    let w3 = w2 * gen;

    butterfly_at(a, 0, 1);
    butterfly_at(a, 2, 3);
    butterfly_at(a, 4, 5);
    butterfly_at(a, 6, 7);

    a[3] *= w2;
    a[7] *= w2;
    butterfly_at(a, 0, 2);
    butterfly_at(a, 1, 3);
    butterfly_at(a, 4, 6);
    butterfly_at(a, 5, 7);

    // Last level: a[4 + i] *= w^i.
    a[5] *= w1;
    a[6] *= w2;
    a[7] *= w3;
    butterfly_at(a, 0, 4);
    butterfly_at(a, 1, 5);
    butterfly_at(a, 2, 6);
    butterfly_at(a, 3, 7);
}
