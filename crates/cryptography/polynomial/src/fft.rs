use bls12_381::{butterfly, ff::Field, Scalar};

use crate::{
    errors::Error,
    kernels::{ker_dif8, ker_dit8},
    parallel::{execute_paired, SplitPlan},
};

/// A butterfly stage is only split across workers when each half holds more
/// than this many elements, and only while the recursion may still fork.
const BUTTERFLY_THRESHOLD: usize = 16;

/// Selects the ordering of the recursive transform.
///
/// - `DIT` (decimation in time) expects its input in bit-reversed order and
///   produces natural order.
/// - `DIF` (decimation in frequency) expects natural order and produces
///   bit-reversed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Decimation {
    DIT = 0,
    DIF = 1,
}

impl TryFrom<u8> for Decimation {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::DIT),
            1 => Ok(Self::DIF),
            discriminant => Err(Error::UnsupportedDecimation { discriminant }),
        }
    }
}

/// Whether a transform evaluates (`Forward`) or interpolates (`Inverse`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

/// Recursive decimation-in-frequency transform of `values` using `gen`, a
/// primitive `values.len()`-th root of unity.
///
/// Each level first combines the two halves with butterflies, multiplying the
/// difference by `gen^i`, and then transforms both halves with `gen^2`.
pub(crate) fn dif_fft(values: &mut [Scalar], gen: Scalar, stage: usize, plan: SplitPlan) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    if n == 8 {
        ker_dif8(values, gen);
        return;
    }

    let m = n >> 1;
    let (lo, hi) = values.split_at_mut(m);

    if m > BUTTERFLY_THRESHOLD && plan.forks_at(stage) {
        execute_paired(lo, hi, plan.workers_at(stage), |start, lo, hi| {
            dif_butterflies(lo, hi, gen, gen.pow_vartime([start as u64]));
        });
    } else {
        // The first twiddle is one.
        butterfly(&mut lo[0], &mut hi[0]);
        dif_butterflies(&mut lo[1..], &mut hi[1..], gen, gen);
    }

    if m == 1 {
        return;
    }

    let gen_sq = gen.square();
    let next_stage = stage + 1;
    if plan.forks_at(stage) {
        maybe_rayon::join(
            || dif_fft(hi, gen_sq, next_stage, plan),
            || dif_fft(lo, gen_sq, next_stage, plan),
        );
    } else {
        dif_fft(lo, gen_sq, next_stage, plan);
        dif_fft(hi, gen_sq, next_stage, plan);
    }
}

/// Recursive decimation-in-time transform of `values` using `gen`, a
/// primitive `values.len()`-th root of unity.
///
/// Each level first transforms both halves with `gen^2`, then multiplies the
/// high element by `gen^i` and combines the halves with butterflies.
pub(crate) fn dit_fft(values: &mut [Scalar], gen: Scalar, stage: usize, plan: SplitPlan) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    if n == 8 {
        ker_dit8(values, gen);
        return;
    }

    let m = n >> 1;
    let (lo, hi) = values.split_at_mut(m);

    let gen_sq = gen.square();
    let next_stage = stage + 1;
    if plan.forks_at(stage) {
        maybe_rayon::join(
            || dit_fft(hi, gen_sq, next_stage, plan),
            || dit_fft(lo, gen_sq, next_stage, plan),
        );
    } else {
        dit_fft(lo, gen_sq, next_stage, plan);
        dit_fft(hi, gen_sq, next_stage, plan);
    }

    if m > BUTTERFLY_THRESHOLD && plan.forks_at(stage) {
        execute_paired(lo, hi, plan.workers_at(stage), |start, lo, hi| {
            dit_butterflies(lo, hi, gen, gen.pow_vartime([start as u64]));
        });
    } else {
        butterfly(&mut lo[0], &mut hi[0]);
        dit_butterflies(&mut lo[1..], &mut hi[1..], gen, gen);
    }
}

/// `(lo[i], hi[i]) <- (lo[i] + hi[i], (lo[i] - hi[i]) * twiddle * gen^i)`
#[inline]
fn dif_butterflies(lo: &mut [Scalar], hi: &mut [Scalar], gen: Scalar, mut twiddle: Scalar) {
    for (a, b) in lo.iter_mut().zip(hi) {
        butterfly(a, b);
        *b *= twiddle;
        twiddle *= gen;
    }
}

/// `(lo[i], hi[i]) <- (lo[i] + t, lo[i] - t)` with `t = hi[i] * twiddle * gen^i`
#[inline]
fn dit_butterflies(lo: &mut [Scalar], hi: &mut [Scalar], gen: Scalar, mut twiddle: Scalar) {
    for (a, b) in lo.iter_mut().zip(hi) {
        *b *= twiddle;
        butterfly(a, b);
        twiddle *= gen;
    }
}

/// Reverses the least significant `bits` of the given number `n`.
///
/// `n` - The input number whose bits are to be reversed.
/// `bits` - The number of least significant bits to reverse.
///
/// Returns a new `usize` with the specified number of bits reversed.
pub const fn reverse_bits(n: usize, bits: u32) -> usize {
    // `overflowing_shr` rather than `>>` so that `bits == 0` shifts by
    // `usize::BITS` without panicking.
    n.reverse_bits().overflowing_shr(usize::BITS - bits).0
}

/// In-place bit-reversal permutation of a slice.
///
/// The element at index `i` moves to the index whose `log2(a.len())`-bit
/// binary representation is that of `i` reversed. For `a.len() == 8`:
///
/// ```text
/// Index  Binary   Reversed   Swapped With
/// -----  -------  ---------  -------------
///   0     000       000           -
///   1     001       100           4
///   2     010       010           -
///   3     011       110           6
///   4     100       001           1
///   5     101       101           -
///   6     110       011           3
///   7     111       111           -
/// ```
///
/// Each pair is swapped exactly once, so applying the permutation twice
/// restores the original order.
///
/// # Panics
/// Panics if the length of the slice is not a power of two. An empty slice is
/// left untouched.
pub fn reverse_bit_order<T>(a: &mut [T]) {
    if a.is_empty() {
        return;
    }

    let n = a.len();
    assert!(
        n.is_power_of_two(),
        "bit-reversal needs a power of two length, got {n}"
    );

    let log_n = log2_pow2(n);
    for k in 0..n {
        let rk = reverse_bits(k, log_n);
        if k < rk {
            a.swap(rk, k);
        }
    }
}

/// We assume that `n` is a power of 2.
pub(crate) const fn log2_pow2(n: usize) -> u32 {
    n.trailing_zeros()
}
