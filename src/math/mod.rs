//! Polynomial arithmetic over Z[X]/(X^N - 1).
//!
//! Everything here works in the convolution ring the cryptosystem lives in:
//!
//! - **Dense polynomials** with machine-integer or `BigInt` coefficients,
//!   multiplied by cyclic Karatsuba
//! - **Ternary polynomials** in dense, sparse-index and product form
//! - **Packed-word polynomials** that carry several mod-2048 coefficients
//!   per 64-bit word for the inversion and multiplication hot paths
//! - **Extended Euclid and resultants**, including the probabilistic CRT
//!   resultant over a fixed prime table

pub mod big_dec_poly;
pub mod big_int_poly;
pub mod dense_ternary;
pub mod euclid;
pub mod long_poly_2;
pub mod long_poly_5;
pub mod poly;
pub mod product_form;
pub mod resultant;
pub mod sparse_ternary;

pub use big_dec_poly::BigDecimalPolynomial;
pub use big_int_poly::BigIntPolynomial;
pub use dense_ternary::DenseTernaryPolynomial;
pub use long_poly_2::LongPolynomial2;
pub use long_poly_5::LongPolynomial5;
pub use poly::IntegerPolynomial;
pub use product_form::ProductFormPolynomial;
pub use resultant::{ModularResultant, Resultant};
pub use sparse_ternary::SparseTernaryPolynomial;

use rand::Rng;

/// A ternary polynomial in either the dense or the sparse representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TernaryPolynomial {
    Dense(DenseTernaryPolynomial),
    Sparse(SparseTernaryPolynomial),
}

impl TernaryPolynomial {
    /// Generates a random polynomial with `num_ones` coefficients equal to 1
    /// and `num_neg_ones` equal to -1, in the requested representation.
    pub fn generate_random(
        n: usize,
        num_ones: usize,
        num_neg_ones: usize,
        sparse: bool,
        rng: &mut impl Rng,
    ) -> Self {
        if sparse {
            TernaryPolynomial::Sparse(SparseTernaryPolynomial::generate_random(
                n,
                num_ones,
                num_neg_ones,
                rng,
            ))
        } else {
            TernaryPolynomial::Dense(DenseTernaryPolynomial::generate_random(
                n,
                num_ones,
                num_neg_ones,
                rng,
            ))
        }
    }

    pub fn multiply(&self, b: &IntegerPolynomial) -> IntegerPolynomial {
        match self {
            TernaryPolynomial::Dense(p) => p.multiply(b),
            TernaryPolynomial::Sparse(p) => p.multiply(b),
        }
    }

    pub fn multiply_mod(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        match self {
            TernaryPolynomial::Dense(p) => p.multiply_mod(b, modulus),
            TernaryPolynomial::Sparse(p) => p.multiply_mod(b, modulus),
        }
    }

    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        match self {
            TernaryPolynomial::Dense(p) => p.to_integer_polynomial(),
            TernaryPolynomial::Sparse(p) => p.to_integer_polynomial(),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            TernaryPolynomial::Dense(p) => p.size(),
            TernaryPolynomial::Sparse(p) => p.size(),
        }
    }
}

/// The secret polynomial of a key pair: plain ternary or product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivatePolynomial {
    Ternary(TernaryPolynomial),
    Product(ProductFormPolynomial),
}

impl PrivatePolynomial {
    pub fn multiply(&self, b: &IntegerPolynomial) -> IntegerPolynomial {
        match self {
            PrivatePolynomial::Ternary(p) => p.multiply(b),
            PrivatePolynomial::Product(p) => p.multiply(b),
        }
    }

    pub fn multiply_mod(&self, b: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        match self {
            PrivatePolynomial::Ternary(p) => p.multiply_mod(b, modulus),
            PrivatePolynomial::Product(p) => p.multiply_mod(b, modulus),
        }
    }

    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        match self {
            PrivatePolynomial::Ternary(p) => p.to_integer_polynomial(),
            PrivatePolynomial::Product(p) => p.to_integer_polynomial(),
        }
    }
}
