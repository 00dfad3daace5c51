use std::ops::{Deref, DerefMut};

use bls12_381::{ff::Field, Scalar};
use maybe_rayon::prelude::*;

use crate::{domain::Domain, errors::Error, fft::Decimation};

/// A polynomial in monomial form over the field `Scalar`.
///
/// Internally stores coefficients in ascending order of degree:
///
/// ```text
/// Layout: x^0 * a_0 + x^1 * a_1 + ... + x^(n-1) * a_(n-1)
/// ```
///
/// Every operation borrows its operands and returns a fresh polynomial, so an
/// operand is never modified, even when the same polynomial is passed on both
/// sides.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct PolyCoeff(pub Vec<Scalar>);

impl PolyCoeff {
    /// Adds two polynomials `self + other` and returns the result.
    ///
    /// Polynomials may have different lengths; the shorter one is padded with zeros.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        if other.len() > result.len() {
            result.resize(other.len(), Scalar::ZERO);
        }
        for (i, &b) in other.iter().enumerate() {
            result[i] += b;
        }
        result.truncate_trailing_zeros();
        result
    }

    /// Computes the additive inverse `-self` and returns the result.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self(self.iter().map(|c| -*c).collect())
    }

    /// Subtracts `other` from `self`, returning `self - other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self + constant`.
    #[must_use]
    pub fn add_constant(&self, constant: Scalar) -> Self {
        self.add(&Self(vec![constant]))
    }

    /// Returns `self - constant`.
    #[must_use]
    pub fn sub_constant(&self, constant: Scalar) -> Self {
        self.add_constant(-constant)
    }

    /// Evaluates the polynomial at the given scalar point `x`.
    ///
    /// Uses Horner’s method for efficient evaluation.
    #[must_use]
    pub fn eval(&self, x: &Scalar) -> Scalar {
        let mut result = Scalar::ZERO;
        for coeff in self.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Multiplies two polynomials `self * other` and returns the result.
    ///
    /// This is the quadratic schoolbook method; see [`PolyCoeff::mul_fft`] for
    /// large inputs.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut result = Self(vec![
            Scalar::ZERO;
            (self.len() + other.len()).saturating_sub(1)
        ]);
        for (i, a) in self.iter().enumerate() {
            for (j, b) in other.iter().enumerate() {
                result[i + j] += a * b;
            }
        }

        result.truncate_trailing_zeros();
        result
    }

    /// Multiplies two polynomials by evaluating both over a large enough
    /// domain, multiplying pointwise and interpolating the product.
    ///
    /// Fails only if the product has more than `2^32` coefficients.
    pub fn mul_fft(&self, other: &Self) -> Result<Self, Error> {
        if self.is_empty() || other.is_empty() {
            return Ok(Self::default());
        }

        let product_len = self.len() + other.len() - 1;
        let domain = Domain::new(product_len.next_power_of_two())?;

        let mut lhs = self.0.clone();
        lhs.resize(domain.size(), Scalar::ZERO);
        let mut rhs = other.0.clone();
        rhs.resize(domain.size(), Scalar::ZERO);

        // Both evaluations come out in the same bit-reversed order, which is
        // exactly what the DIT inverse expects.
        domain.fft(&mut lhs, Decimation::DIF, false)?;
        domain.fft(&mut rhs, Decimation::DIF, false)?;

        lhs.maybe_par_iter_mut()
            .zip(rhs.maybe_par_iter())
            .for_each(|(a, b)| *a *= b);

        domain.fft_inverse(&mut lhs, Decimation::DIT, false)?;

        lhs.truncate(product_len);
        let mut result = Self(lhs);
        result.truncate_trailing_zeros();
        Ok(result)
    }

    /// Divides `self` by `(X - point)` using synthetic division.
    ///
    /// Returns `(quotient, remainder)` where `remainder == self.eval(point)`, so
    /// that `self = (X - point) * quotient + remainder`.
    #[must_use]
    pub fn divide_by_linear(&self, point: &Scalar) -> (Self, Scalar) {
        if self.len() < 2 {
            let constant = self.first().copied().unwrap_or(Scalar::ZERO);
            return (Self::default(), constant);
        }

        let mut quotient = vec![Scalar::ZERO; self.len() - 1];
        let mut carry = Scalar::ZERO;
        for (i, coeff) in self.iter().enumerate().skip(1).rev() {
            carry = carry * point + coeff;
            quotient[i - 1] = carry;
        }
        let remainder = carry * point + self[0];

        (Self(quotient), remainder)
    }

    /// Truncate the polynomial to remove trailing zeros.
    ///
    /// These are the coefficients of the highest degree terms.
    fn truncate_trailing_zeros(&mut self) {
        while self.last().is_some_and(|c| c.is_zero().into()) {
            self.pop();
        }
    }
}

impl Deref for PolyCoeff {
    type Target = Vec<Scalar>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PolyCoeff {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Scalar>> for PolyCoeff {
    fn from(value: Vec<Scalar>) -> Self {
        Self(value)
    }
}

/// Given a list of points, this method will compute the polynomial
/// Z(x) which is equal to zero when evaluated at each point.
///
/// Example: vanishing_poly([1, 2, 3]) = (x - 1)(x - 2)(x - 3)
pub fn vanishing_poly(roots: &[Scalar]) -> PolyCoeff {
    let mut poly = PolyCoeff(vec![Scalar::ONE]);
    for root in roots {
        poly = poly.mul(&PolyCoeff(vec![-root, Scalar::ONE]));
    }
    poly
}
