//! Polynomials over the BLS12-381 scalar field, and the number theoretic
//! transform that moves them between coefficient and evaluation form.
//!
//! The transform is a recursive radix-2 FFT over a [`Domain`] of roots of
//! unity, available in both decimation orders, optionally over a coset, and
//! parallelized according to a [`Parallelism`] budget.

pub mod coset_fft;
pub mod domain;
pub mod errors;
pub mod fft;
mod kernels;
pub mod parallel;
pub mod poly_coeff;

pub use coset_fft::CosetFFT;
pub use domain::Domain;
pub use errors::{DomainSizeError, Error};
pub use fft::{reverse_bit_order, Decimation, Direction};
pub use parallel::Parallelism;
pub use poly_coeff::PolyCoeff;
