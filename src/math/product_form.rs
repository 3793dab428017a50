//! Ternary polynomial in product form, `f = f1*f2 + f3`.

use rand::Rng;

use crate::error::Result;
use crate::math::big_int_poly::BigIntPolynomial;
use crate::math::poly::IntegerPolynomial;
use crate::math::sparse_ternary::SparseTernaryPolynomial;

/// A polynomial of the form `f1*f2 + f3` with all three factors sparse and
/// ternary. Multiplying by it costs three sparse multiplications instead of
/// one dense one, at the price of a slightly different key distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormPolynomial {
    f1: SparseTernaryPolynomial,
    f2: SparseTernaryPolynomial,
    f3: SparseTernaryPolynomial,
}

impl ProductFormPolynomial {
    pub fn new(
        f1: SparseTernaryPolynomial,
        f2: SparseTernaryPolynomial,
        f3: SparseTernaryPolynomial,
    ) -> Self {
        ProductFormPolynomial { f1, f2, f3 }
    }

    /// Generates the three factors at the given weights; `f1` and `f2` get
    /// equal numbers of 1s and -1s.
    pub fn generate_random(
        n: usize,
        df1: usize,
        df2: usize,
        df3_ones: usize,
        df3_neg_ones: usize,
        rng: &mut impl Rng,
    ) -> Self {
        ProductFormPolynomial {
            f1: SparseTernaryPolynomial::generate_random(n, df1, df1, rng),
            f2: SparseTernaryPolynomial::generate_random(n, df2, df2, rng),
            f3: SparseTernaryPolynomial::generate_random(n, df3_ones, df3_neg_ones, rng),
        }
    }

    /// Decodes the three factors encoded with [`to_binary`](Self::to_binary).
    pub fn from_binary(
        input: &mut &[u8],
        n: usize,
        df1: usize,
        df2: usize,
        df3_ones: usize,
        df3_neg_ones: usize,
    ) -> Result<Self> {
        let f1 = SparseTernaryPolynomial::from_binary(input, n, df1, df1)?;
        let f2 = SparseTernaryPolynomial::from_binary(input, n, df2, df2)?;
        let f3 = SparseTernaryPolynomial::from_binary(input, n, df3_ones, df3_neg_ones)?;
        Ok(ProductFormPolynomial { f1, f2, f3 })
    }

    /// Concatenation of the three factors' index encodings
    pub fn to_binary(&self) -> Vec<u8> {
        let mut data = self.f1.to_binary();
        data.extend_from_slice(&self.f2.to_binary());
        data.extend_from_slice(&self.f3.to_binary());
        data
    }

    /// Multiplies by a dense polynomial, taking the indices mod N
    pub fn multiply(&self, b: &IntegerPolynomial) -> IntegerPolynomial {
        let mut c = self.f1.multiply(b);
        c = self.f2.multiply(&c);
        c.add(&self.f3.multiply(b));
        c
    }

    /// Multiplies by a dense polynomial and takes the values mod `modulus`
    pub fn multiply_mod(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        let mut c = self.multiply(b);
        c.mod_small(modulus);
        c
    }

    /// Multiplies by a `BigInt`-coefficient polynomial
    pub fn multiply_big(&self, b: &BigIntPolynomial) -> BigIntPolynomial {
        let mut c = self.f1.multiply_big(b);
        c = self.f2.multiply_big(&c);
        c.add(&self.f3.multiply_big(b));
        c
    }

    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        let mut i = self.f1.multiply(&self.f2.to_integer_polynomial());
        i.add(&self.f3.to_integer_polynomial());
        i
    }

    /// Number of coefficients the polynomial has
    pub fn size(&self) -> usize {
        self.f1.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_mult_matches_expanded_form() {
        let mut rng = ChaCha20Rng::seed_from_u64(61);
        let p = ProductFormPolynomial::generate_random(439, 9, 8, 5, 5, &mut rng);
        let b = IntegerPolynomial::from_coeffs(
            (0..439).map(|_| rng.gen_range(-1000..1000)).collect(),
        );

        let expected = p.to_integer_polynomial().multiply(&b);
        assert_eq!(p.multiply(&b), expected);
    }

    #[test]
    fn test_from_binary() {
        let mut rng = ChaCha20Rng::seed_from_u64(62);
        let p = ProductFormPolynomial::generate_random(439, 9, 8, 5, 5, &mut rng);
        let data = p.to_binary();
        let mut cursor = &data[..];
        let decoded = ProductFormPolynomial::from_binary(&mut cursor, 439, 9, 8, 5, 5).unwrap();
        assert_eq!(p, decoded);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_from_binary_too_short() {
        let mut rng = ChaCha20Rng::seed_from_u64(63);
        let p = ProductFormPolynomial::generate_random(439, 9, 8, 5, 5, &mut rng);
        let data = p.to_binary();
        let mut cursor = &data[..data.len() / 2];
        assert!(ProductFormPolynomial::from_binary(&mut cursor, 439, 9, 8, 5, 5).is_err());
    }
}
