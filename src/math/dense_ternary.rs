//! Ternary polynomial stored as a dense coefficient array.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::math::big_int_poly::BigIntPolynomial;
use crate::math::long_poly_5::LongPolynomial5;
use crate::math::poly::IntegerPolynomial;

/// A ternary polynomial over `Z[X]/(X^N-1)` with all coefficients stored.
///
/// When the modulus is 2048, multiplication goes through
/// [`LongPolynomial5`], which packs five coefficients per word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseTernaryPolynomial {
    poly: IntegerPolynomial,
}

impl DenseTernaryPolynomial {
    /// Builds a dense ternary polynomial from coefficients, which must all
    /// be -1, 0 or 1.
    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
        for &c in &coeffs {
            assert!((-1..=1).contains(&c), "illegal coefficient value: {}", c);
        }
        DenseTernaryPolynomial {
            poly: IntegerPolynomial::from_coeffs(coeffs),
        }
    }

    /// Generates a random polynomial with `num_ones` coefficients equal to 1,
    /// `num_neg_ones` equal to -1, and the rest zero.
    pub fn generate_random(
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let mut coeffs = vec![0i64; n];
        for c in coeffs.iter_mut().take(num_ones) {
            *c = 1;
        }
        for c in coeffs.iter_mut().skip(num_ones).take(num_neg_ones) {
            *c = -1;
        }
        coeffs.shuffle(rng);
        DenseTernaryPolynomial {
            poly: IntegerPolynomial::from_coeffs(coeffs),
        }
    }

    /// Generates a polynomial whose coefficients are each uniformly random
    /// over {-1, 0, 1}.
    pub fn generate_random_uniform(n: usize, rng: &mut impl Rng) -> Self {
        let coeffs = (0..n).map(|_| rng.gen_range(-1..=1)).collect();
        DenseTernaryPolynomial {
            poly: IntegerPolynomial::from_coeffs(coeffs),
        }
    }

    /// Multiplies by a dense polynomial, taking the indices mod N
    pub fn multiply(&self, poly2: &IntegerPolynomial) -> IntegerPolynomial {
        self.poly.multiply(poly2)
    }

    /// Multiplies by a dense polynomial and takes the values mod `modulus`.
    /// The modulus 2048 takes the packed-word fast path.
    pub fn multiply_mod(&self, poly2: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        if modulus == 2048 {
            let mut poly2_pos = poly2.clone();
            poly2_pos.mod_positive(2048);
            let poly5 = LongPolynomial5::from_integer_poly(&poly2_pos);
            poly5.multiply(self).to_integer_polynomial()
        } else {
            self.poly.multiply_mod(poly2, modulus)
        }
    }

    /// Multiplies by a `BigInt`-coefficient polynomial
    pub fn multiply_big(&self, poly2: &BigIntPolynomial) -> BigIntPolynomial {
        self.poly.multiply_big(poly2)
    }

    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        self.poly.clone()
    }

    /// Number of coefficients the polynomial has
    pub fn size(&self) -> usize {
        self.poly.coeffs.len()
    }

    pub fn coeffs(&self) -> &[i64] {
        &self.poly.coeffs
    }

    /// Indices of coefficients equal to 1
    pub fn ones(&self) -> Vec<usize> {
        self.poly
            .coeffs
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == 1)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of coefficients equal to -1
    pub fn neg_ones(&self) -> Vec<usize> {
        self.poly
            .coeffs
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == -1)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_mult_mod_2048_fast_path() {
        // multiplication via packed words must match the generic route
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        for _ in 0..5 {
            let p1 = DenseTernaryPolynomial::generate_random_uniform(443, &mut rng);
            let p2 = IntegerPolynomial::from_coeffs(
                (0..443).map(|_| rng.gen_range(0..2048)).collect(),
            );

            let mut fast = p1.multiply_mod(&p2, 2048);
            fast.mod_positive(2048);
            let mut expected = p1.to_integer_polynomial().multiply_mod(&p2, 2048);
            expected.mod_positive(2048);
            assert_eq!(fast, expected);
        }
    }

    #[test]
    fn test_generate_random_counts() {
        let mut rng = ChaCha20Rng::seed_from_u64(32);
        let poly = DenseTernaryPolynomial::generate_random(1087, 120, 121, &mut rng);
        assert_eq!(poly.ones().len(), 120);
        assert_eq!(poly.neg_ones().len(), 121);
        assert_eq!(poly.size(), 1087);
    }

    #[test]
    #[should_panic]
    fn test_rejects_non_ternary() {
        DenseTernaryPolynomial::from_coeffs(vec![0, 1, 2]);
    }
}
