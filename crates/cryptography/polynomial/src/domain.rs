use bls12_381::{
    ff::{Field, PrimeField},
    Scalar,
};

use crate::{
    coset_fft::CosetFFT,
    errors::{DomainSizeError, Error},
    fft::{dif_fft, dit_fft, log2_pow2, reverse_bit_order, Decimation, Direction},
    parallel::{execute, Parallelism, SplitPlan},
    poly_coeff::PolyCoeff,
};

/// A struct representing a set of points that are roots of unity,
/// which allows us to efficiently evaluate and interpolate polynomial
/// over these points using FFT.
///
/// A domain is built once for a given size and is read-only afterwards, so a
/// single instance can be shared by any number of concurrent transforms.
#[derive(Debug, Clone)]
pub struct Domain {
    /// Number of points in the domain
    pub cardinality: usize,
    /// Inverse of the cardinality as a scalar, used to normalize inverse transforms
    pub cardinality_inv: Scalar,
    /// Generator for this domain
    // Element has order `cardinality`
    pub generator: Scalar,
    /// Inverse of the generator for the domain
    /// This is cached for the inverse transform
    pub generator_inv: Scalar,
    /// Generator of the full multiplicative group, used to shift the domain
    /// onto a coset
    pub multiplicative_gen: Scalar,
    /// Inverse of `multiplicative_gen`
    pub multiplicative_gen_inv: Scalar,
}

impl Domain {
    /// Creates the domain of the `size`-th roots of unity.
    ///
    /// `size` must be a power of two no larger than `2^32`, the largest
    /// power-of-two subgroup of the scalar field.
    pub fn new(size: usize) -> Result<Self, Error> {
        let generator = Self::compute_generator_for_size(size)?;
        let generator_inv = generator.invert().expect("generator should not be zero");

        let cardinality_inv = Scalar::from(size as u64)
            .invert()
            .expect("size should not be zero");

        let multiplicative_gen = Scalar::MULTIPLICATIVE_GENERATOR;
        let multiplicative_gen_inv = multiplicative_gen
            .invert()
            .expect("multiplicative generator should not be zero");

        #[cfg(feature = "tracing")]
        tracing::debug!(size, "creating evaluation domain");


        Ok(Self {
            cardinality: size,
            cardinality_inv,
            generator,
            generator_inv,
            multiplicative_gen,
            multiplicative_gen_inv,
        })
    }

    /// Computes an n'th root of unity for a given `n`
    fn compute_generator_for_size(size: usize) -> Result<Scalar, Error> {
        if !size.is_power_of_two() {
            return Err(DomainSizeError::NotPowerOfTwo { size }.into());
        }

        let log_size_of_group = log2_pow2(size);
        if log_size_of_group > Self::two_adicity() {
            return Err(DomainSizeError::ExceedsTwoAdicity {
                log_size: log_size_of_group,
                two_adicity: Self::two_adicity(),
            }
            .into());
        }

        // We now want to compute the generator which has order `size`
        let exponent: u64 = 1 << (u64::from(Self::two_adicity()) - u64::from(log_size_of_group));

        Ok(Self::largest_root_of_unity().pow_vartime([exponent]))
    }

    /// The largest root of unity that we can use for the domain
    const fn largest_root_of_unity() -> Scalar {
        Scalar::ROOT_OF_UNITY
    }

    /// The largest power of two that we can use for the domain
    const fn two_adicity() -> u32 {
        Scalar::S
    }

    /// The roots of unity `[w^0, w^1, ..., w^(n - 1)]`, in natural order.
    ///
    /// Computed on every call; the domain itself stores only the generator.
    pub fn roots(&self) -> Vec<Scalar> {
        powers(self.generator, Scalar::ONE, self.size(), &Parallelism::default())
    }

    /// The size of the domain
    ///
    /// Note: This is always a power of two
    pub const fn size(&self) -> usize {
        self.cardinality
    }

    /// Forward transform of `values`, in place, using the default [`Parallelism`].
    ///
    /// See [`Domain::transform`].
    pub fn fft(
        &self,
        values: &mut [Scalar],
        decimation: Decimation,
        coset: bool,
    ) -> Result<(), Error> {
        self.transform(
            values,
            Direction::Forward,
            decimation,
            coset,
            &Parallelism::default(),
        )
    }

    /// Inverse transform of `values`, in place, using the default [`Parallelism`].
    ///
    /// See [`Domain::transform`].
    pub fn fft_inverse(
        &self,
        values: &mut [Scalar],
        decimation: Decimation,
        coset: bool,
    ) -> Result<(), Error> {
        self.transform(
            values,
            Direction::Inverse,
            decimation,
            coset,
            &Parallelism::default(),
        )
    }

    /// Transforms `values` in place.
    ///
    /// - [`Decimation::DIF`] takes natural order and leaves the result in
    ///   bit-reversed order.
    /// - [`Decimation::DIT`] takes bit-reversed order and leaves the result in
    ///   natural order.
    ///
    /// A forward transform evaluates the polynomial whose coefficients are
    /// `values` over the domain; an inverse transform interpolates and
    /// normalizes by the cardinality. With `coset` set, the domain is shifted
    /// by the field's multiplicative generator `g`: the forward transform
    /// evaluates at `g * w^i` and the inverse undoes exactly that.
    ///
    /// Returns an error, leaving `values` untouched, if `values.len()` is not
    /// the size of the domain.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip_all,
            fields(size = values.len(), direction = ?direction, decimation = ?decimation, coset = coset)
        )
    )]
    pub fn transform(
        &self,
        values: &mut [Scalar],
        direction: Direction,
        decimation: Decimation,
        coset: bool,
        parallelism: &Parallelism,
    ) -> Result<(), Error> {
        if values.len() != self.size() {
            return Err(DomainSizeError::LengthMismatch {
                got: values.len(),
                expected: self.size(),
            }
            .into());
        }

        let plan = SplitPlan::new(parallelism);

        match direction {
            Direction::Forward => {
                if coset {
                    let mut coset_table =
                        powers(self.multiplicative_gen, Scalar::ONE, self.size(), parallelism);
                    // DIT input is in bit-reversed order, so the shift for index
                    // `i` lives at `reverse(i)`.
                    if decimation == Decimation::DIT {
                        reverse_bit_order(&mut coset_table);
                    }
                    scale_by_table(values, &coset_table, parallelism);
                }
                run(values, self.generator, decimation, plan);
            }
            Direction::Inverse => {
                run(values, self.generator_inv, decimation, plan);
                if coset {
                    // The normalization is folded into the table: table[i] = n^-1 * g^-i
                    let mut coset_table = powers(
                        self.multiplicative_gen_inv,
                        self.cardinality_inv,
                        self.size(),
                        parallelism,
                    );
                    // DIF output is in bit-reversed order.
                    if decimation == Decimation::DIF {
                        reverse_bit_order(&mut coset_table);
                    }
                    scale_by_table(values, &coset_table, parallelism);
                } else {
                    let cardinality_inv = self.cardinality_inv;
                    execute(values, parallelism.max_workers(), |_, chunk| {
                        for value in chunk {
                            *value *= cardinality_inv;
                        }
                    });
                }
            }
        }

        Ok(())
    }

    /// Evaluates a polynomial at the points in the domain
    ///
    /// The evaluations are returned in the natural order of [`Domain::roots`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn fft_scalars(&self, mut polynomial: PolyCoeff) -> Result<Vec<Scalar>, Error> {
        // Pad the polynomial with zeroes, so that it is the same size as the
        // domain.
        self.pad_to_size(&mut polynomial)?;

        self.fft(&mut polynomial, Decimation::DIF, false)?;
        reverse_bit_order(&mut polynomial.0);

        Ok(polynomial.0)
    }

    /// Evaluates a polynomial at the points in the domain multiplied by a coset
    /// generator `g`.
    pub fn coset_fft_scalars(
        &self,
        mut points: PolyCoeff,
        coset: &CosetFFT,
    ) -> Result<Vec<Scalar>, Error> {
        self.pad_to_size(&mut points)?;

        let mut coset_scale = Scalar::ONE;
        for point in &mut points.0 {
            *point *= coset_scale;
            coset_scale *= coset.generator;
        }
        self.fft(&mut points, Decimation::DIF, false)?;
        reverse_bit_order(&mut points.0);

        Ok(points.0)
    }

    /// Interpolates the points over the domain to get a polynomial
    /// in monomial form.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn ifft_scalars(&self, mut points: Vec<Scalar>) -> Result<PolyCoeff, Error> {
        self.pad_to_size(&mut points)?;

        reverse_bit_order(&mut points);
        self.fft_inverse(&mut points, Decimation::DIT, false)?;

        Ok(points.into())
    }

    /// Interpolates a polynomial over the coset of a domain
    pub fn coset_ifft_scalars(
        &self,
        points: Vec<Scalar>,
        coset: &CosetFFT,
    ) -> Result<PolyCoeff, Error> {
        let mut coset_coeffs = self.ifft_scalars(points)?;

        let mut coset_scale = Scalar::ONE;
        for element in &mut coset_coeffs.0 {
            *element *= coset_scale;
            coset_scale *= coset.generator_inv;
        }
        Ok(coset_coeffs)
    }

    fn pad_to_size(&self, values: &mut Vec<Scalar>) -> Result<(), Error> {
        if values.len() > self.size() {
            return Err(DomainSizeError::LengthMismatch {
                got: values.len(),
                expected: self.size(),
            }
            .into());
        }
        values.resize(self.size(), Scalar::ZERO);
        Ok(())
    }
}

fn run(values: &mut [Scalar], gen: Scalar, decimation: Decimation, plan: SplitPlan) {
    match decimation {
        Decimation::DIF => dif_fft(values, gen, 0, plan),
        Decimation::DIT => dit_fft(values, gen, 0, plan),
    }
}

/// Returns `[first, first * base, first * base^2, ..., first * base^(len - 1)]`.
///
/// Each worker starts its chunk from `first * base^start`.
fn powers(base: Scalar, first: Scalar, len: usize, parallelism: &Parallelism) -> Vec<Scalar> {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("compute powers", len).entered();

    let mut table = vec![Scalar::ZERO; len];
    execute(&mut table, parallelism.max_workers(), |start, chunk| {
        let mut x = first * base.pow_vartime([start as u64]);
        for entry in chunk {
            *entry = x;
            x *= base;
        }
    });
    table
}

fn scale_by_table(values: &mut [Scalar], table: &[Scalar], parallelism: &Parallelism) {
    debug_assert_eq!(values.len(), table.len());
    execute(values, parallelism.max_workers(), |start, chunk| {
        for (value, factor) in chunk.iter_mut().zip(&table[start..]) {
            *value *= factor;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_scalars(n: usize) -> Vec<Scalar> {
        (0..n)
            .map(|_| Scalar::random(&mut rand::thread_rng()))
            .collect()
    }

    #[test]
    fn largest_root_of_unity_has_correct_order() {
        let root = Domain::largest_root_of_unity();
        let order = 2u64.pow(Domain::two_adicity());

        assert_eq!(root.pow_vartime([order]), Scalar::ONE);

        // Check that it is indeed a primitive root of unity
        for i in 0..Domain::two_adicity() {
            assert_ne!(root.pow_vartime([2u64.pow(i)]), Scalar::ONE);
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn largest_domain_is_cheap_to_build() {
        let domain = Domain::new(1 << Domain::two_adicity()).unwrap();
        assert_eq!(domain.size(), 1 << 32);
        assert_eq!(domain.generator, Domain::largest_root_of_unity());
        assert_eq!(domain.generator * domain.generator_inv, Scalar::ONE);
    }

    #[test]
    fn domain_parameters_are_consistent() {
        for log_n in 0..=10 {
            let n = 1usize << log_n;
            let domain = Domain::new(n).expect("power of two size");

            assert_eq!(domain.size(), n);
            assert_eq!(domain.roots().len(), n);
            assert_eq!(domain.generator.pow_vartime([n as u64]), Scalar::ONE);
            // Exact order n: w^(n/2) == -1 unless n == 1
            if n > 1 {
                assert_eq!(
                    domain.generator.pow_vartime([(n / 2) as u64]),
                    -Scalar::ONE
                );
            }
            assert_eq!(domain.generator * domain.generator_inv, Scalar::ONE);
            assert_eq!(domain.cardinality_inv * Scalar::from(n as u64), Scalar::ONE);
            assert_eq!(
                domain.multiplicative_gen * domain.multiplicative_gen_inv,
                Scalar::ONE
            );
            for (i, root) in domain.roots().iter().enumerate() {
                assert_eq!(*root, domain.generator.pow_vartime([i as u64]));
            }
        }
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert_eq!(
            Domain::new(0).unwrap_err(),
            Error::DomainSize(DomainSizeError::NotPowerOfTwo { size: 0 })
        );
        assert_eq!(
            Domain::new(12).unwrap_err(),
            Error::DomainSize(DomainSizeError::NotPowerOfTwo { size: 12 })
        );
        assert_eq!(
            Domain::new(1 << 33).unwrap_err(),
            Error::DomainSize(DomainSizeError::ExceedsTwoAdicity {
                log_size: 33,
                two_adicity: 32
            })
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        let domain = Domain::new(16).unwrap();
        let mut values = random_scalars(8);
        let before = values.clone();

        let err = domain
            .fft(&mut values, Decimation::DIF, false)
            .unwrap_err();
        assert_eq!(
            err,
            Error::DomainSize(DomainSizeError::LengthMismatch {
                got: 8,
                expected: 16
            })
        );
        assert_eq!(values, before);

        let too_long = PolyCoeff(random_scalars(17));
        assert!(domain.fft_scalars(too_long).is_err());
    }

    #[test]
    fn size_one_is_the_identity() {
        let domain = Domain::new(1).unwrap();
        let input = random_scalars(1);
        for decimation in [Decimation::DIT, Decimation::DIF] {
            for coset in [false, true] {
                let mut values = input.clone();
                domain.fft(&mut values, decimation, coset).unwrap();
                assert_eq!(values, input);
                domain.fft_inverse(&mut values, decimation, coset).unwrap();
                assert_eq!(values, input);
            }
        }
    }

    #[test]
    fn forward_transform_evaluates_on_the_domain() {
        let domain = Domain::new(32).unwrap();
        let poly = PolyCoeff(random_scalars(32));

        let mut dif = poly.0.clone();
        domain.fft(&mut dif, Decimation::DIF, false).unwrap();
        reverse_bit_order(&mut dif);

        let mut dit = poly.0.clone();
        reverse_bit_order(&mut dit);
        domain.fft(&mut dit, Decimation::DIT, false).unwrap();

        for (i, root) in domain.roots().iter().enumerate() {
            assert_eq!(dif[i], poly.eval(root));
            assert_eq!(dit[i], poly.eval(root));
        }
    }

    #[test]
    fn coset_transform_evaluates_on_the_shifted_domain() {
        let domain = Domain::new(64).unwrap();
        let poly = PolyCoeff(random_scalars(64));

        let mut dif = poly.0.clone();
        domain.fft(&mut dif, Decimation::DIF, true).unwrap();
        reverse_bit_order(&mut dif);

        let mut dit = poly.0.clone();
        reverse_bit_order(&mut dit);
        domain.fft(&mut dit, Decimation::DIT, true).unwrap();

        for (i, root) in domain.roots().iter().enumerate() {
            let point = domain.multiplicative_gen * root;
            assert_eq!(dif[i], poly.eval(&point));
            assert_eq!(dit[i], poly.eval(&point));
        }
    }

    #[test]
    fn round_trip_every_decimation_pairing() {
        for log_n in [1, 2, 3, 4, 5, 8] {
            let domain = Domain::new(1 << log_n).unwrap();
            let input = random_scalars(1 << log_n);

            for coset in [false, true] {
                // natural -> bit-reversed -> natural
                let mut values = input.clone();
                domain.fft(&mut values, Decimation::DIF, coset).unwrap();
                domain.fft_inverse(&mut values, Decimation::DIT, coset).unwrap();
                assert_eq!(values, input, "DIF/DIT, size 2^{log_n}, coset {coset}");

                // bit-reversed -> natural -> bit-reversed
                let mut values = input.clone();
                domain.fft(&mut values, Decimation::DIT, coset).unwrap();
                domain.fft_inverse(&mut values, Decimation::DIF, coset).unwrap();
                assert_eq!(values, input, "DIT/DIF, size 2^{log_n}, coset {coset}");
            }
        }
    }

    #[test]
    fn inverse_dif_interpolates_into_bit_reversed_order() {
        let domain = Domain::new(16).unwrap();
        let poly = PolyCoeff(random_scalars(16));

        for coset in [false, true] {
            let shift = if coset {
                domain.multiplicative_gen
            } else {
                Scalar::ONE
            };
            let mut evals: Vec<_> = domain
                .roots()
                .iter()
                .map(|root| poly.eval(&(shift * root)))
                .collect();

            domain
                .fft_inverse(&mut evals, Decimation::DIF, coset)
                .unwrap();
            reverse_bit_order(&mut evals);
            assert_eq!(evals, poly.0);
        }
    }

    #[test]
    fn result_does_not_depend_on_parallelism() {
        let domain = Domain::new(1 << 9).unwrap();
        let input = random_scalars(1 << 9);

        for direction in [Direction::Forward, Direction::Inverse] {
            for decimation in [Decimation::DIT, Decimation::DIF] {
                for coset in [false, true] {
                    let mut expected = input.clone();
                    domain
                        .transform(
                            &mut expected,
                            direction,
                            decimation,
                            coset,
                            &Parallelism::single_threaded(),
                        )
                        .unwrap();

                    for workers in [2, 3, 7, 32, usize::MAX] {
                        let mut got = input.clone();
                        domain
                            .transform(
                                &mut got,
                                direction,
                                decimation,
                                coset,
                                &Parallelism::new(workers),
                            )
                            .unwrap();
                        assert_eq!(got, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn fft_test_polynomial() {
        let evaluations = vec![Scalar::from(2u64), Scalar::from(4u64)];
        let domain = Domain::new(2).unwrap();

        // Interpolate the evaluations
        let poly_coeff = domain.ifft_scalars(evaluations.clone()).unwrap();

        // Check interpolation was correct by evaluating the polynomial at the roots
        for (i, root) in domain.roots().iter().enumerate() {
            let eval = poly_coeff.eval(root);
            assert_eq!(eval, evaluations[i]);
        }

        // Evaluate the polynomial at the domain points
        let got_evals = domain.fft_scalars(poly_coeff).unwrap();
        assert_eq!(got_evals, evaluations);
    }

    #[test]
    fn scalars_helpers_pad_short_inputs() {
        let domain = Domain::new(8).unwrap();
        let poly = PolyCoeff(random_scalars(3));

        let evals = domain.fft_scalars(poly.clone()).unwrap();
        for (eval, root) in evals.iter().zip(&domain.roots()) {
            assert_eq!(*eval, poly.eval(root));
        }

        let mut expected = poly.0.clone();
        expected.resize(8, Scalar::ZERO);
        assert_eq!(domain.ifft_scalars(evals).unwrap().0, expected);
    }

    #[test]
    fn test_polynomial_coset_fft() {
        let polynomial = PolyCoeff((0..32).map(|i| -Scalar::from(i)).collect());

        let domain = Domain::new(32).unwrap();
        let coset_fft = CosetFFT::new(Scalar::MULTIPLICATIVE_GENERATOR);
        let coset_evals = domain
            .coset_fft_scalars(polynomial.clone(), &coset_fft)
            .unwrap();
        let got_poly = domain
            .coset_ifft_scalars(coset_evals.clone(), &coset_fft)
            .unwrap();

        assert_eq!(got_poly, polynomial);

        // The multiplicative generator coset is the one `transform` uses.
        let mut values = polynomial.0;
        domain.fft(&mut values, Decimation::DIF, true).unwrap();
        reverse_bit_order(&mut values);
        assert_eq!(values, coset_evals);
    }
}
