//! Key generation and key material.

use rand::Rng;
use tracing::debug;

use crate::encode;
use crate::error::{NtruError, Result};
use crate::math::{
    DenseTernaryPolynomial, IntegerPolynomial, PrivatePolynomial, ProductFormPolynomial,
    SparseTernaryPolynomial, TernaryPolynomial,
};
use crate::params::{EncryptionParameters, TernaryPolyType};

/// The public polynomial `h = 3*g*f^-1 mod q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionPublicKey {
    pub h: IntegerPolynomial,
}

impl EncryptionPublicKey {
    pub fn new(h: IntegerPolynomial) -> Self {
        EncryptionPublicKey { h }
    }

    pub fn to_bytes(&self, params: &EncryptionParameters) -> Vec<u8> {
        self.h.to_binary(params.q)
    }

    pub fn from_bytes(data: &[u8], params: &EncryptionParameters) -> Result<Self> {
        let mut input = data;
        let h_bytes = encode::read_exact(&mut input, encode::mod_q_len(params.n, params.q))?;
        Ok(EncryptionPublicKey {
            h: IntegerPolynomial::from_binary(h_bytes, params.n, params.q)?,
        })
    }
}

/// A private key is essentially the polynomial `t`, which takes different
/// forms depending on whether product-form polynomials are used, and on
/// `fast_fp`. The inverse of `f` modulo 3 is precomputed on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionPrivateKey {
    pub h: IntegerPolynomial,
    /// Determines the key: if `fast_fp`, `f = 1 + 3t`; otherwise `f = t`
    pub t: PrivatePolynomial,
    pub fp: IntegerPolynomial,
}

impl EncryptionPrivateKey {
    /// Serializes as `h` followed by `t`: the product-form index codec for
    /// product keys, the tight base-3 codec otherwise.
    pub fn to_bytes(&self, params: &EncryptionParameters) -> Vec<u8> {
        let mut data = self.h.to_binary(params.q);
        match &self.t {
            PrivatePolynomial::Product(p) => data.extend_from_slice(&p.to_binary()),
            PrivatePolynomial::Ternary(p) => {
                data.extend_from_slice(&p.to_integer_polynomial().to_binary3_tight())
            }
        }
        data
    }

    /// Decodes a private key and re-derives `fp` from `t`.
    pub fn from_bytes(data: &[u8], params: &EncryptionParameters) -> Result<Self> {
        let mut input = data;
        let h_bytes = encode::read_exact(&mut input, encode::mod_q_len(params.n, params.q))?;
        let h = IntegerPolynomial::from_binary(h_bytes, params.n, params.q)?;

        let t = match params.poly_type {
            TernaryPolyType::Product => {
                let df3_neg_ones = if params.fast_fp {
                    params.df3
                } else {
                    params.df3 - 1
                };
                PrivatePolynomial::Product(ProductFormPolynomial::from_binary(
                    &mut input,
                    params.n,
                    params.df1,
                    params.df2,
                    params.df3,
                    df3_neg_ones,
                )?)
            }
            TernaryPolyType::Simple => {
                let f_bytes = encode::read_exact(&mut input, encode::mod3_tight_len(params.n))?;
                let f_int = IntegerPolynomial::from_binary3_tight(f_bytes, params.n)?;
                let t = if params.sparse {
                    TernaryPolynomial::Sparse(SparseTernaryPolynomial::from_coeffs(&f_int.coeffs))
                } else {
                    TernaryPolynomial::Dense(DenseTernaryPolynomial::from_coeffs(f_int.coeffs))
                };
                PrivatePolynomial::Ternary(t)
            }
        };

        let fp = derive_fp(&t, params)?;
        Ok(EncryptionPrivateKey { h, t, fp })
    }
}

fn derive_fp(t: &PrivatePolynomial, params: &EncryptionParameters) -> Result<IntegerPolynomial> {
    if params.fast_fp {
        let mut fp = IntegerPolynomial::new(params.n);
        fp.coeffs[0] = 1;
        Ok(fp)
    } else {
        t.to_integer_polynomial()
            .invert_f3()
            .ok_or(NtruError::MalformedEncoding(
                "private polynomial is not invertible mod 3",
            ))
    }
}

/// An encryption key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionKeyPair {
    pub public: EncryptionPublicKey,
    pub private: EncryptionPrivateKey,
}

/// Generates a new key pair.
///
/// Candidate polynomials that are not invertible are thrown away and
/// resampled, so the loop runs until it succeeds.
pub fn generate_key_pair(
    params: &EncryptionParameters,
    rng: &mut impl Rng,
) -> EncryptionKeyPair {
    let n = params.n;
    let q = params.q;

    // choose a random f that is invertible mod 3 and mod q
    let (t, fq, fp) = loop {
        let (t, f) = if params.fast_fp {
            // f = 1 + 3t is always invertible mod 3
            let t = sample_t(params, params.df, params.df3, rng);
            let mut f = t.to_integer_polynomial();
            f.mult_factor(3);
            f.coeffs[0] += 1;
            (t, f)
        } else {
            let t = sample_t(params, params.df - 1, params.df3.saturating_sub(1), rng);
            let f = t.to_integer_polynomial();
            (t, f)
        };

        let fp = if params.fast_fp {
            let mut fp = IntegerPolynomial::new(n);
            fp.coeffs[0] = 1;
            fp
        } else {
            match f.invert_f3() {
                Some(fp) => fp,
                None => {
                    debug!("f not invertible mod 3, resampling");
                    continue;
                }
            }
        };

        match f.invert_fq(q) {
            Some(fq) => break (t, fq, fp),
            None => debug!("f not invertible mod q, resampling"),
        }
    };

    // choose a random g that is invertible mod q
    let dg = params.dg;
    let g = loop {
        let g = DenseTernaryPolynomial::generate_random(n, dg, dg - 1, rng);
        if g.to_integer_polynomial().invert_fq(q).is_some() {
            break g;
        }
        debug!("g not invertible mod q, resampling");
    };

    let mut h = g.multiply_mod(&fq, q);
    h.mult3_mod(q);
    h.ensure_positive(q);

    EncryptionKeyPair {
        public: EncryptionPublicKey::new(h.clone()),
        private: EncryptionPrivateKey { h, t, fp },
    }
}

// Samples t at the weights of the parameter set; the negative-one counts
// are passed in because they differ between the fast_fp forms of f.
fn sample_t(
    params: &EncryptionParameters,
    df_neg_ones: usize,
    df3_neg_ones: usize,
    rng: &mut impl Rng,
) -> PrivatePolynomial {
    match params.poly_type {
        TernaryPolyType::Simple => PrivatePolynomial::Ternary(TernaryPolynomial::generate_random(
            params.n,
            params.df,
            df_neg_ones,
            params.sparse,
            rng,
        )),
        TernaryPolyType::Product => PrivatePolynomial::Product(ProductFormPolynomial::generate_random(
            params.n,
            params.df1,
            params.df2,
            params.df3,
            df3_neg_ones,
            rng,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_h_is_three_g_over_f() {
        // h*f = 3g mod q, so h*f must be small and divisible by 3 after
        // centering
        let params = EncryptionParameters::apr2011_439();
        let mut rng = ChaCha20Rng::seed_from_u64(71);
        let kp = generate_key_pair(&params, &mut rng);

        let f = kp.private.t.to_integer_polynomial();
        let mut hf = kp.private.t.multiply_mod(&kp.public.h, params.q);
        hf.center0(params.q);
        for &c in &hf.coeffs {
            assert_eq!(c % 3, 0);
            assert!(c.abs() <= 3);
        }
        assert_eq!(f.count(1), params.df);
    }

    #[test]
    fn test_fp_is_inverse_of_f() {
        let params = EncryptionParameters::apr2011_439();
        let mut rng = ChaCha20Rng::seed_from_u64(72);
        let kp = generate_key_pair(&params, &mut rng);

        let f = kp.private.t.to_integer_polynomial();
        let mut check = f.multiply_mod(&kp.private.fp, 3);
        check.mod_positive(3);
        assert!(check.equals_one());
    }
}
