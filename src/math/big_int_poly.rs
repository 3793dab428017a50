//! Polynomial with arbitrary-precision integer coefficients.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use super::big_dec_poly::BigDecimalPolynomial;
use super::poly::IntegerPolynomial;

/// A polynomial over `Z[X]/(X^N-1)` with `BigInt` coefficients, used where
/// the resultant and lattice-basis computations outgrow machine integers.
///
/// `add`, `sub`, `mult_factor`, `div_round` and `mod_big` mutate in place;
/// clone first if the original is still needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigIntPolynomial {
    pub coeffs: Vec<BigInt>,
}

impl BigIntPolynomial {
    /// A new polynomial with `n` coefficients initialized to 0
    pub fn new(n: usize) -> Self {
        BigIntPolynomial {
            coeffs: vec![BigInt::zero(); n],
        }
    }

    pub fn from_coeffs(coeffs: Vec<BigInt>) -> Self {
        BigIntPolynomial { coeffs }
    }

    pub fn from_integer_poly(p: &IntegerPolynomial) -> Self {
        BigIntPolynomial {
            coeffs: p.coeffs.iter().map(|&c| BigInt::from(c)).collect(),
        }
    }

    /// Multiplies by another polynomial of the same length, taking the
    /// indices mod N. Returns the result as a new polynomial.
    pub fn multiply(&self, poly2: &BigIntPolynomial) -> BigIntPolynomial {
        let n = self.coeffs.len();
        assert_eq!(poly2.coeffs.len(), n, "number of coefficients must be the same");

        let mut c = self.mult_recursive(poly2);
        if c.coeffs.len() > n {
            for k in n..c.coeffs.len() {
                let upper = c.coeffs[k].clone();
                c.coeffs[k - n] += upper;
            }
            c.coeffs.truncate(n);
        }
        c
    }

    // Karatsuba multiplication
    fn mult_recursive(&self, poly2: &BigIntPolynomial) -> BigIntPolynomial {
        let a = &self.coeffs;
        let b = &poly2.coeffs;

        let n = poly2.coeffs.len();
        if n <= 1 {
            let mut c = self.coeffs.clone();
            for ci in c.iter_mut() {
                *ci *= &poly2.coeffs[0];
            }
            BigIntPolynomial { coeffs: c }
        } else {
            let n1 = n / 2;
            let a1 = BigIntPolynomial::from_coeffs(a[..n1].to_vec());
            let a2 = BigIntPolynomial::from_coeffs(a[n1..].to_vec());
            let b1 = BigIntPolynomial::from_coeffs(b[..n1].to_vec());
            let b2 = BigIntPolynomial::from_coeffs(b[n1..].to_vec());

            let mut big_a = a1.clone();
            big_a.add(&a2);
            let mut big_b = b1.clone();
            big_b.add(&b2);

            let c1 = a1.mult_recursive(&b1);
            let c2 = a2.mult_recursive(&b2);
            let mut c3 = big_a.mult_recursive(&big_b);
            c3.sub(&c1);
            c3.sub(&c2);

            let mut c = BigIntPolynomial::new(2 * n - 1);
            for (i, ci) in c1.coeffs.iter().enumerate() {
                c.coeffs[i] = ci.clone();
            }
            for (i, ci) in c3.coeffs.iter().enumerate() {
                c.coeffs[n1 + i] += ci;
            }
            for (i, ci) in c2.coeffs.iter().enumerate() {
                c.coeffs[2 * n1 + i] += ci;
            }
            c
        }
    }

    /// Adds another polynomial which can have a different number of
    /// coefficients; the shorter operand is zero-padded.
    pub fn add(&mut self, b: &BigIntPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), BigInt::zero());
        }
        for (i, bi) in b.coeffs.iter().enumerate() {
            self.coeffs[i] += bi;
        }
    }

    /// Subtracts another polynomial which can have a different number of
    /// coefficients; the shorter operand is zero-padded.
    pub fn sub(&mut self, b: &BigIntPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), BigInt::zero());
        }
        for (i, bi) in b.coeffs.iter().enumerate() {
            self.coeffs[i] -= bi;
        }
    }

    /// Multiplies each coefficient by a `BigInt`
    pub fn mult_factor(&mut self, factor: &BigInt) {
        for c in self.coeffs.iter_mut() {
            *c *= factor;
        }
    }

    /// Divides each coefficient by `divisor`, rounding half away from zero
    pub fn div_round(&mut self, divisor: &BigInt) {
        for c in self.coeffs.iter_mut() {
            *c = div_round_half_away(c, divisor);
        }
    }

    /// Divides each coefficient by `divisor` and rounds the result to
    /// `decimal_places` fractional digits.
    pub fn div_decimal(&self, divisor: &BigInt, decimal_places: u32) -> BigDecimalPolynomial {
        // factor = 1/divisor carried to enough digits that the final
        // rounding is exact
        let digits = self.max_coeff_length() as u32 + decimal_places + 1;
        let factor = div_round_half_away(&BigInt::from(10).pow(digits), divisor);

        let pow_rest = BigInt::from(10).pow(digits - decimal_places);
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| div_round_half_away(&(c * &factor), &pow_rest))
            .collect();
        BigDecimalPolynomial::from_scaled(coeffs, decimal_places)
    }

    /// Base-10 length of the largest coefficient
    pub fn max_coeff_length(&self) -> usize {
        let max = self
            .coeffs
            .iter()
            .map(|c| c.abs())
            .max()
            .unwrap_or_else(BigInt::zero);
        max.to_string().len()
    }

    /// Takes each coefficient modulo `modulus`, into `[0, modulus)`
    pub fn mod_big(&mut self, modulus: &BigInt) {
        for c in self.coeffs.iter_mut() {
            *c = c.mod_floor(modulus);
        }
    }

    /// The sum of all coefficients, i.e. the polynomial evaluated at 1
    pub fn sum_coeffs(&self) -> BigInt {
        self.coeffs.iter().sum()
    }
}

/// `n / d` rounded half away from zero
pub(crate) fn div_round_half_away(n: &BigInt, d: &BigInt) -> BigInt {
    let half = d.abs() / 2;
    let adjusted = if n.is_negative() { n - half } else { n + half };
    adjusted / d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_i64(coeffs: &[i64]) -> BigIntPolynomial {
        BigIntPolynomial::from_coeffs(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    #[test]
    fn test_mult() {
        let a = from_i64(&[4, -1, 9, 2, 1, -5, 12, -7, 0, -9, 5]);
        let b = from_i64(&[-6, 0, 0, 13, 3, -2, -4, 10, 11, 2, -1]);
        let c = a.multiply(&b);
        assert_eq!(c, from_i64(&[2, -189, 77, 124, -29, 0, -75, 124, -49, 267, 34]));
    }

    #[test]
    fn test_div_round() {
        let mut p = from_i64(&[7, -7, 8, -8, 0]);
        p.div_round(&BigInt::from(5));
        assert_eq!(p, from_i64(&[1, -1, 2, -2, 0]));
    }

    #[test]
    fn test_div_decimal_round_trip() {
        let p = from_i64(&[10, -20, 30]);
        let d = p.div_decimal(&BigInt::from(2), 4);
        let rounded = d.round();
        assert_eq!(rounded, from_i64(&[5, -10, 15]));
    }
}
