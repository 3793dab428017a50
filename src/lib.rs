//! NTRU lattice cryptosystem core over the convolution ring Z[X]/(X^N - 1).
//!
//! This crate implements the polynomial machinery and key operations of the
//! NTRUEncrypt scheme as specified in IEEE P1363.1:
//!
//! - Polynomial arithmetic in dense, sparse, product-form and packed-word
//!   representations, with Karatsuba multiplication and inversion mod 2^k
//!   and mod 3
//! - The probabilistic CRT resultant over a fixed prime table
//! - The P1363.1 bit, trit and index encodings
//! - The Index Generation Function (IGF)
//! - Key generation (`h = 3*g*f^-1 mod q`) and the raw encrypt/decrypt
//!   polynomial operations
//!
//! Message padding and the outer SVES construction are out of scope; the
//! raw primitives in [`pke`] operate on bare polynomials.

pub mod bitstring;
pub mod encode;
pub mod error;
pub mod igf;
pub mod keygen;
pub mod math;
pub mod params;
pub mod pke;

pub use error::{NtruError, Result};
pub use igf::IndexGenerator;
pub use keygen::{generate_key_pair, EncryptionKeyPair, EncryptionPrivateKey, EncryptionPublicKey};
pub use math::{
    BigDecimalPolynomial, BigIntPolynomial, DenseTernaryPolynomial, IntegerPolynomial,
    PrivatePolynomial, ProductFormPolynomial, SparseTernaryPolynomial, TernaryPolynomial,
};
pub use params::{DigestAlgorithm, EncryptionParameters, TernaryPolyType};
pub use pke::{decrypt_raw, encrypt_raw, generate_blinding_poly};
