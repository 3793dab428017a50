//! Polynomial with fixed-point decimal coefficients.
//!
//! Coefficients are stored as scaled `BigInt`s: the logical value of
//! coefficient `i` is `coeffs[i] / 10^scale`. All supported operations are
//! exact in this representation.

use num_bigint::BigInt;
use num_traits::Zero;

use super::big_int_poly::{div_round_half_away, BigIntPolynomial};

/// A polynomial over `Z[X]/(X^N-1)` with fixed-point decimal coefficients.
///
/// `halve`, `add` and `sub` mutate in place; `multiply` and `round` return
/// new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigDecimalPolynomial {
    coeffs: Vec<BigInt>,
    scale: u32,
}

impl BigDecimalPolynomial {
    /// A new polynomial with `n` coefficients initialized to 0
    pub fn new(n: usize) -> Self {
        BigDecimalPolynomial {
            coeffs: vec![BigInt::zero(); n],
            scale: 0,
        }
    }

    /// Wraps already-scaled coefficients: logical values are
    /// `coeffs[i] / 10^scale`
    pub fn from_scaled(coeffs: Vec<BigInt>, scale: u32) -> Self {
        BigDecimalPolynomial { coeffs, scale }
    }

    pub fn from_big_int_poly(p: &BigIntPolynomial) -> Self {
        BigDecimalPolynomial {
            coeffs: p.coeffs.clone(),
            scale: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Divides all coefficients by 2 (exactly, by scaling)
    pub fn halve(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c *= 5;
        }
        self.scale += 1;
    }

    /// Multiplies by a `BigInt`-coefficient polynomial, taking the indices
    /// mod N. Returns the result as a new polynomial.
    pub fn multiply_big(&self, poly2: &BigIntPolynomial) -> BigDecimalPolynomial {
        self.multiply(&BigDecimalPolynomial::from_big_int_poly(poly2))
    }

    /// Multiplies by another polynomial of the same length, taking the
    /// indices mod N. Returns the result as a new polynomial.
    pub fn multiply(&self, poly2: &BigDecimalPolynomial) -> BigDecimalPolynomial {
        let n = self.coeffs.len();
        assert_eq!(poly2.coeffs.len(), n, "number of coefficients must be the same");

        // the underlying integer Karatsuba does the work; scales add
        let a = BigIntPolynomial::from_coeffs(self.coeffs.clone());
        let b = BigIntPolynomial::from_coeffs(poly2.coeffs.clone());
        BigDecimalPolynomial {
            coeffs: a.multiply(&b).coeffs,
            scale: self.scale + poly2.scale,
        }
    }

    /// Adds another polynomial which can have a different number of
    /// coefficients; the shorter operand is zero-padded.
    pub fn add(&mut self, b: &BigDecimalPolynomial) {
        let (b_coeffs, scale) = self.align_scales(b);
        self.scale = scale;
        if b_coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b_coeffs.len(), BigInt::zero());
        }
        for (i, bi) in b_coeffs.iter().enumerate() {
            self.coeffs[i] += bi;
        }
    }

    /// Subtracts another polynomial which can have a different number of
    /// coefficients; the shorter operand is zero-padded.
    pub fn sub(&mut self, b: &BigDecimalPolynomial) {
        let (b_coeffs, scale) = self.align_scales(b);
        self.scale = scale;
        if b_coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b_coeffs.len(), BigInt::zero());
        }
        for (i, bi) in b_coeffs.iter().enumerate() {
            self.coeffs[i] -= bi;
        }
    }

    // Rescales self and b to a common scale; returns b's rescaled
    // coefficients and the common scale.
    fn align_scales(&mut self, b: &BigDecimalPolynomial) -> (Vec<BigInt>, u32) {
        let scale = self.scale.max(b.scale);
        if self.scale < scale {
            let factor = BigInt::from(10).pow(scale - self.scale);
            for c in self.coeffs.iter_mut() {
                *c *= &factor;
            }
        }
        let b_coeffs = if b.scale < scale {
            let factor = BigInt::from(10).pow(scale - b.scale);
            b.coeffs.iter().map(|c| c * &factor).collect()
        } else {
            b.coeffs.clone()
        };
        (b_coeffs, scale)
    }

    /// Rounds all coefficients to the nearest integer, half away from zero
    pub fn round(&self) -> BigIntPolynomial {
        let divisor = BigInt::from(10).pow(self.scale);
        BigIntPolynomial::from_coeffs(
            self.coeffs
                .iter()
                .map(|c| div_round_half_away(c, &divisor))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::poly::IntegerPolynomial;
    use crate::math::DenseTernaryPolynomial;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn from_i64(coeffs: &[i64]) -> BigDecimalPolynomial {
        BigDecimalPolynomial::from_big_int_poly(&BigIntPolynomial::from_integer_poly(
            &IntegerPolynomial::from_coeffs(coeffs.to_vec()),
        ))
    }

    #[test]
    fn test_mult() {
        let a = from_i64(&[4, -1, 9, 2, 1, -5, 12, -7, 0, -9, 5]);
        let b = from_i64(&[-6, 0, 0, 13, 3, -2, -4, 10, 11, 2, -1]);
        let c = a.multiply(&b);
        let expected = from_i64(&[2, -189, 77, 124, -29, 0, -75, 124, -49, 267, 34]);
        assert_eq!(c.round(), expected.round());
    }

    #[test]
    fn test_mult_by_inverse_is_one() {
        // multiply a polynomial by its inverse mod 2048, the rounded result
        // must be the identity
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let (d, d_inv) = loop {
            let d = DenseTernaryPolynomial::generate_random(1001, 333, 334, &mut rng);
            let d = d.to_integer_polynomial();
            if let Some(inv) = d.invert_fq(2048) {
                break (d, inv);
            }
        };

        let mut d_mod = d.clone();
        d_mod.mod_small(2048);
        let e = BigDecimalPolynomial::from_big_int_poly(&BigIntPolynomial::from_integer_poly(&d_mod));
        let f = BigIntPolynomial::from_integer_poly(&d_inv);
        let mut g = IntegerPolynomial::from_big_int_poly(&e.multiply_big(&f).round());
        g.mod_positive(2048);
        assert!(g.equals_one());
    }

    #[test]
    fn test_halve_and_round() {
        let mut p = from_i64(&[3, -3, 4]);
        p.halve();
        // 1.5 and -1.5 round half away from zero, 2 stays exact
        let rounded = p.round();
        assert_eq!(
            rounded.coeffs,
            vec![BigInt::from(2), BigInt::from(-2), BigInt::from(2)]
        );
    }
}
