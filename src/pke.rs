//! Raw encryption primitives: `e = r*h + m mod q` and its inverse.
//!
//! These operate on bare polynomials; message padding and blinding-seed
//! derivation are the caller's business.

use crate::igf::IndexGenerator;
use crate::keygen::EncryptionPrivateKey;
use crate::math::{
    DenseTernaryPolynomial, IntegerPolynomial, PrivatePolynomial, ProductFormPolynomial,
    SparseTernaryPolynomial, TernaryPolynomial,
};
use crate::params::{EncryptionParameters, TernaryPolyType};

/// Deterministically derives the blinding polynomial `r` from a seed using
/// the index generation function.
pub fn generate_blinding_poly(seed: &[u8], params: &EncryptionParameters) -> PrivatePolynomial {
    let mut ig = IndexGenerator::new(seed, params);

    match params.poly_type {
        TernaryPolyType::Product => {
            let r1 = SparseTernaryPolynomial::from_coeffs(&blinding_coeffs(
                &mut ig, params.n, params.dr1,
            ));
            let r2 = SparseTernaryPolynomial::from_coeffs(&blinding_coeffs(
                &mut ig, params.n, params.dr2,
            ));
            let r3 = SparseTernaryPolynomial::from_coeffs(&blinding_coeffs(
                &mut ig, params.n, params.dr3,
            ));
            PrivatePolynomial::Product(ProductFormPolynomial::new(r1, r2, r3))
        }
        TernaryPolyType::Simple => {
            let r = blinding_coeffs(&mut ig, params.n, params.dr);
            let t = if params.sparse {
                TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_coeffs(&r))
            } else {
                TernaryPolynomial::Dense(DenseTernaryPolynomial::from_coeffs(r))
            };
            PrivatePolynomial::Ternary(t)
        }
    }
}

// dr coefficients of each sign, placed at generated indices; occupied
// indices are skipped so the weights come out exact
fn blinding_coeffs(ig: &mut IndexGenerator, n: usize, dr: usize) -> Vec<i64> {
    let mut r = vec![0i64; n];
    for coeff in [-1i64, 1] {
        let mut t = 0;
        while t < dr {
            let i = ig.next_index();
            if r[i] == 0 {
                r[i] = coeff;
                t += 1;
            }
        }
    }
    r
}

/// Encrypts a ternary message polynomial: `e = r*h + m mod q`, positive
/// residues.
pub fn encrypt_raw(
    m: &IntegerPolynomial,
    r: &PrivatePolynomial,
    h: &IntegerPolynomial,
    q: i64,
) -> IntegerPolynomial {
    let mut e = r.multiply_mod(h, q);
    e.add_mod(m, q);
    e.ensure_positive(q);
    e
}

/// Decrypts a ciphertext polynomial back to its ternary message.
pub fn decrypt_raw(
    e: &IntegerPolynomial,
    key: &EncryptionPrivateKey,
    params: &EncryptionParameters,
) -> IntegerPolynomial {
    let q = params.q;
    let mut a = key.t.multiply_mod(e, q);
    if params.fast_fp {
        // f = 1 + 3t, so f*e = e + 3*(t*e)
        a.mult_factor(3);
        a.add(e);
    }
    a.center0(q);
    a.mod3();

    let mut c = if params.fast_fp {
        a
    } else {
        DenseTernaryPolynomial::from_coeffs(a.coeffs).multiply_mod(&key.fp, 3)
    };
    c.center0(3);
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::generate_key_pair;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn random_message(n: usize, rng: &mut impl Rng) -> IntegerPolynomial {
        IntegerPolynomial::from_coeffs((0..n).map(|_| rng.gen_range(-1..=1)).collect())
    }

    #[test]
    fn test_round_trip_simple() {
        let params = EncryptionParameters::apr2011_439();
        let mut rng = ChaCha20Rng::seed_from_u64(81);
        let kp = generate_key_pair(&params, &mut rng);

        for i in 0..5u8 {
            let m = random_message(params.n, &mut rng);
            let r = generate_blinding_poly(&[i, 1, 2, 3], &params);
            let e = encrypt_raw(&m, &r, &kp.public.h, params.q);
            assert_eq!(decrypt_raw(&e, &kp.private, &params), m);
        }
    }

    #[test]
    fn test_round_trip_product_fast_fp() {
        let params = EncryptionParameters::apr2011_439_fast();
        let mut rng = ChaCha20Rng::seed_from_u64(82);
        let kp = generate_key_pair(&params, &mut rng);

        for i in 0..5u8 {
            let m = random_message(params.n, &mut rng);
            let r = generate_blinding_poly(&[9, 9, i], &params);
            let e = encrypt_raw(&m, &r, &kp.public.h, params.q);
            assert_eq!(decrypt_raw(&e, &kp.private, &params), m);
        }
    }

    #[test]
    fn test_blinding_poly_deterministic() {
        let params = EncryptionParameters::apr2011_439();
        let r1 = generate_blinding_poly(b"seed", &params);
        let r2 = generate_blinding_poly(b"seed", &params);
        assert_eq!(
            r1.to_integer_polynomial().coeffs,
            r2.to_integer_polynomial().coeffs
        );

        let dense = r1.to_integer_polynomial();
        assert_eq!(dense.count(1), params.dr);
        assert_eq!(dense.count(-1), params.dr);
    }
}
