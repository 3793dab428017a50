//! Ternary polynomial stored as index lists.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::encode;
use crate::error::Result;
use crate::math::big_int_poly::BigIntPolynomial;
use crate::math::poly::IntegerPolynomial;

/// Number of bits spent on each stored index
const BITS_PER_INDEX: usize = 11;

/// A ternary polynomial over `Z[X]/(X^N-1)` that stores only the positions
/// of its nonzero coefficients, so multiplication is a rotate-and-add over
/// the few populated indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseTernaryPolynomial {
    n: usize,
    ones: Vec<usize>,
    neg_ones: Vec<usize>,
}

impl SparseTernaryPolynomial {
    /// Builds a sparse polynomial from index lists. Indices must be < `n`.
    pub fn new(n: usize, ones: Vec<usize>, neg_ones: Vec<usize>) -> Self {
        SparseTernaryPolynomial { n, ones, neg_ones }
    }

    /// Builds a sparse polynomial from dense coefficients, which must all
    /// be -1, 0 or 1.
    pub fn from_coeffs(coeffs: &[i64]) -> Self {
        let mut ones = Vec::new();
        let mut neg_ones = Vec::new();
        for (i, &c) in coeffs.iter().enumerate() {
            match c {
                1 => ones.push(i),
                -1 => neg_ones.push(i),
                0 => {}
                _ => panic!("illegal coefficient value: {}", c),
            }
        }
        SparseTernaryPolynomial {
            n: coeffs.len(),
            ones,
            neg_ones,
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
        SparseTernaryPolynomial::from_coeffs(&coeffs)
    }

    /// Decodes a polynomial encoded with [`to_binary`](Self::to_binary).
    pub fn from_binary(
        input: &mut &[u8],
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
    ) -> Result<Self> {
        let max_index = 1 << BITS_PER_INDEX;

        let bytes1 = encode::read_exact(input, encode::mod_q_len(num_ones, max_index))?;
        let ones = encode::decode_mod_q(bytes1, num_ones, max_index)?
            .into_iter()
            .map(|i| i as usize)
            .collect();

        let bytes2 = encode::read_exact(input, encode::mod_q_len(num_neg_ones, max_index))?;
        let neg_ones = encode::decode_mod_q(bytes2, num_neg_ones, max_index)?
            .into_iter()
            .map(|i| i as usize)
            .collect();

        Ok(SparseTernaryPolynomial { n, ones, neg_ones })
    }

    /// Encodes the polynomial as its two index lists, 11 bits per index.
    pub fn to_binary(&self) -> Vec<u8> {
        let max_index = 1i64 << BITS_PER_INDEX;
        let ones: Vec<i64> = self.ones.iter().map(|&i| i as i64).collect();
        let neg_ones: Vec<i64> = self.neg_ones.iter().map(|&i| i as i64).collect();

        let mut data = encode::encode_mod_q(&ones, max_index);
        data.extend_from_slice(&encode::encode_mod_q(&neg_ones, max_index));
        data
    }

    /// Multiplies by a dense polynomial, taking the indices mod N
    pub fn multiply(&self, poly2: &IntegerPolynomial) -> IntegerPolynomial {
        let b = &poly2.coeffs;
        let n = self.n;
        assert_eq!(b.len(), n, "number of coefficients must be the same");

        let mut c = vec![0i64; n];
        for &idx in &self.ones {
            let mut j = n - 1 - idx;
            for k in (0..n).rev() {
                c[k] += b[j];
                j = if j == 0 { n - 1 } else { j - 1 };
            }
        }
        for &idx in &self.neg_ones {
            let mut j = n - 1 - idx;
            for k in (0..n).rev() {
                c[k] -= b[j];
                j = if j == 0 { n - 1 } else { j - 1 };
            }
        }
        IntegerPolynomial::from_coeffs(c)
    }

    /// Multiplies by a dense polynomial and takes the values mod `modulus`
    pub fn multiply_mod(&self, poly2: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        let mut c = self.multiply(poly2);
        c.mod_small(modulus);
        c
    }

    /// Multiplies by a `BigInt`-coefficient polynomial
    pub fn multiply_big(&self, poly2: &BigIntPolynomial) -> BigIntPolynomial {
        let b = &poly2.coeffs;
        let n = self.n;
        assert_eq!(b.len(), n, "number of coefficients must be the same");

        let mut c = BigIntPolynomial::new(n);
        for &idx in &self.ones {
            let mut j = n - 1 - idx;
            for k in (0..n).rev() {
                c.coeffs[k] += &b[j];
                j = if j == 0 { n - 1 } else { j - 1 };
            }
        }
        for &idx in &self.neg_ones {
            let mut j = n - 1 - idx;
            for k in (0..n).rev() {
                c.coeffs[k] -= &b[j];
                j = if j == 0 { n - 1 } else { j - 1 };
            }
        }
        c
    }

    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        let mut coeffs = vec![0i64; self.n];
        for &i in &self.ones {
            coeffs[i] = 1;
        }
        for &i in &self.neg_ones {
            coeffs[i] = -1;
        }
        IntegerPolynomial::from_coeffs(coeffs)
    }

    /// Number of coefficients the polynomial has
    pub fn size(&self) -> usize {
        self.n
    }

    /// Indices of coefficients equal to 1
    pub fn ones(&self) -> &[usize] {
        &self.ones
    }

    /// Indices of coefficients equal to -1
    pub fn neg_ones(&self) -> &[usize] {
        &self.neg_ones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_mult_matches_dense() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let n = 743;
        let p1 = SparseTernaryPolynomial::generate_random(n, 248, 248, &mut rng);
        let p2 = IntegerPolynomial::from_coeffs(
            (0..n).map(|_| rng.gen_range(-1000..1000)).collect(),
        );

        let expected = p1.to_integer_polynomial().multiply(&p2);
        assert_eq!(p1.multiply(&p2), expected);
    }

    #[test]
    fn test_from_binary() {
        let mut rng = ChaCha20Rng::seed_from_u64(22);
        let poly = SparseTernaryPolynomial::generate_random(743, 248, 248, &mut rng);
        let data = poly.to_binary();
        let mut cursor = &data[..];
        let decoded = SparseTernaryPolynomial::from_binary(&mut cursor, 743, 248, 248).unwrap();
        assert_eq!(poly, decoded);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_from_binary_too_short() {
        let mut rng = ChaCha20Rng::seed_from_u64(23);
        let poly = SparseTernaryPolynomial::generate_random(743, 248, 248, &mut rng);
        let data = poly.to_binary();
        let mut cursor = &data[..data.len() - 1];
        assert!(SparseTernaryPolynomial::from_binary(&mut cursor, 743, 248, 248).is_err());
    }

    #[test]
    fn test_generate_random_counts() {
        let mut rng = ChaCha20Rng::seed_from_u64(24);
        let poly = SparseTernaryPolynomial::generate_random(1087, 120, 121, &mut rng);
        assert_eq!(poly.ones().len(), 120);
        assert_eq!(poly.neg_ones().len(), 121);
        let dense = poly.to_integer_polynomial();
        assert_eq!(dense.count(1), 120);
        assert_eq!(dense.count(-1), 121);
        assert_eq!(dense.count(0), 1087 - 241);
    }
}
