//! Dense integer-coefficient polynomials over Z[X]/(X^N - 1).
//!
//! This is the arithmetic core: cyclic Karatsuba multiplication, inversion
//! modulo powers of two and modulo 3, and the probabilistic CRT resultant
//! used by the signing lattice-basis construction.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;
use std::collections::VecDeque;
use tracing::debug;

use crate::encode;
use crate::error::Result;
use crate::math::big_int_poly::BigIntPolynomial;
use crate::math::euclid;
use crate::math::long_poly_2::LongPolynomial2;
use crate::math::resultant::{ModularResultant, Resultant};

/// Karatsuba recursion switches to schoolbook convolution below this size.
const KARATSUBA_THRESHOLD: usize = 32;

/// Number of consecutive equal CRT-stabilized resultants required before the
/// probabilistic resultant loop exits.
const NUM_EQUAL_RESULTANTS: usize = 3;

/// Prime numbers > 4500 for resultant computation. Starting them below
/// ~4400 causes incorrect results occasionally. Fortunately, 4500 is about
/// the optimum number for performance. The table holds enough primes that
/// none have to be computed on-line for any standard parameter set.
const PRIMES: [i64; 619] = [
    4507, 4513, 4517, 4519, 4523, 4547, 4549, 4561, 4567, 4583,
    4591, 4597, 4603, 4621, 4637, 4639, 4643, 4649, 4651, 4657,
    4663, 4673, 4679, 4691, 4703, 4721, 4723, 4729, 4733, 4751,
    4759, 4783, 4787, 4789, 4793, 4799, 4801, 4813, 4817, 4831,
    4861, 4871, 4877, 4889, 4903, 4909, 4919, 4931, 4933, 4937,
    4943, 4951, 4957, 4967, 4969, 4973, 4987, 4993, 4999, 5003,
    5009, 5011, 5021, 5023, 5039, 5051, 5059, 5077, 5081, 5087,
    5099, 5101, 5107, 5113, 5119, 5147, 5153, 5167, 5171, 5179,
    5189, 5197, 5209, 5227, 5231, 5233, 5237, 5261, 5273, 5279,
    5281, 5297, 5303, 5309, 5323, 5333, 5347, 5351, 5381, 5387,
    5393, 5399, 5407, 5413, 5417, 5419, 5431, 5437, 5441, 5443,
    5449, 5471, 5477, 5479, 5483, 5501, 5503, 5507, 5519, 5521,
    5527, 5531, 5557, 5563, 5569, 5573, 5581, 5591, 5623, 5639,
    5641, 5647, 5651, 5653, 5657, 5659, 5669, 5683, 5689, 5693,
    5701, 5711, 5717, 5737, 5741, 5743, 5749, 5779, 5783, 5791,
    5801, 5807, 5813, 5821, 5827, 5839, 5843, 5849, 5851, 5857,
    5861, 5867, 5869, 5879, 5881, 5897, 5903, 5923, 5927, 5939,
    5953, 5981, 5987, 6007, 6011, 6029, 6037, 6043, 6047, 6053,
    6067, 6073, 6079, 6089, 6091, 6101, 6113, 6121, 6131, 6133,
    6143, 6151, 6163, 6173, 6197, 6199, 6203, 6211, 6217, 6221,
    6229, 6247, 6257, 6263, 6269, 6271, 6277, 6287, 6299, 6301,
    6311, 6317, 6323, 6329, 6337, 6343, 6353, 6359, 6361, 6367,
    6373, 6379, 6389, 6397, 6421, 6427, 6449, 6451, 6469, 6473,
    6481, 6491, 6521, 6529, 6547, 6551, 6553, 6563, 6569, 6571,
    6577, 6581, 6599, 6607, 6619, 6637, 6653, 6659, 6661, 6673,
    6679, 6689, 6691, 6701, 6703, 6709, 6719, 6733, 6737, 6761,
    6763, 6779, 6781, 6791, 6793, 6803, 6823, 6827, 6829, 6833,
    6841, 6857, 6863, 6869, 6871, 6883, 6899, 6907, 6911, 6917,
    6947, 6949, 6959, 6961, 6967, 6971, 6977, 6983, 6991, 6997,
    7001, 7013, 7019, 7027, 7039, 7043, 7057, 7069, 7079, 7103,
    7109, 7121, 7127, 7129, 7151, 7159, 7177, 7187, 7193, 7207,
    7211, 7213, 7219, 7229, 7237, 7243, 7247, 7253, 7283, 7297,
    7307, 7309, 7321, 7331, 7333, 7349, 7351, 7369, 7393, 7411,
    7417, 7433, 7451, 7457, 7459, 7477, 7481, 7487, 7489, 7499,
    7507, 7517, 7523, 7529, 7537, 7541, 7547, 7549, 7559, 7561,
    7573, 7577, 7583, 7589, 7591, 7603, 7607, 7621, 7639, 7643,
    7649, 7669, 7673, 7681, 7687, 7691, 7699, 7703, 7717, 7723,
    7727, 7741, 7753, 7757, 7759, 7789, 7793, 7817, 7823, 7829,
    7841, 7853, 7867, 7873, 7877, 7879, 7883, 7901, 7907, 7919,
    7927, 7933, 7937, 7949, 7951, 7963, 7993, 8009, 8011, 8017,
    8039, 8053, 8059, 8069, 8081, 8087, 8089, 8093, 8101, 8111,
    8117, 8123, 8147, 8161, 8167, 8171, 8179, 8191, 8209, 8219,
    8221, 8231, 8233, 8237, 8243, 8263, 8269, 8273, 8287, 8291,
    8293, 8297, 8311, 8317, 8329, 8353, 8363, 8369, 8377, 8387,
    8389, 8419, 8423, 8429, 8431, 8443, 8447, 8461, 8467, 8501,
    8513, 8521, 8527, 8537, 8539, 8543, 8563, 8573, 8581, 8597,
    8599, 8609, 8623, 8627, 8629, 8641, 8647, 8663, 8669, 8677,
    8681, 8689, 8693, 8699, 8707, 8713, 8719, 8731, 8737, 8741,
    8747, 8753, 8761, 8779, 8783, 8803, 8807, 8819, 8821, 8831,
    8837, 8839, 8849, 8861, 8863, 8867, 8887, 8893, 8923, 8929,
    8933, 8941, 8951, 8963, 8969, 8971, 8999, 9001, 9007, 9011,
    9013, 9029, 9041, 9043, 9049, 9059, 9067, 9091, 9103, 9109,
    9127, 9133, 9137, 9151, 9157, 9161, 9173, 9181, 9187, 9199,
    9203, 9209, 9221, 9227, 9239, 9241, 9257, 9277, 9281, 9283,
    9293, 9311, 9319, 9323, 9337, 9341, 9343, 9349, 9371, 9377,
    9391, 9397, 9403, 9413, 9419, 9421, 9431, 9433, 9437, 9439,
    9461, 9463, 9467, 9473, 9479, 9491, 9497, 9511, 9521, 9533,
    9539, 9547, 9551, 9587, 9601, 9613, 9619, 9623, 9629, 9631,
    9643, 9649, 9661, 9677, 9679, 9689, 9697, 9719, 9721, 9733,
    9739, 9743, 9749, 9767, 9769, 9781, 9787, 9791, 9803, 9811,
    9817, 9829, 9833, 9839, 9851, 9857, 9859, 9871, 9883, 9887,
    9901, 9907, 9923, 9929, 9931, 9941, 9949, 9967, 9973,
];

/// A polynomial with `N` machine-integer coefficients over
/// `Z[X]/(X^N - 1)`.
///
/// Mutating operations (`add`, `sub`, the `mod_*` family) act in place;
/// clone first when the original is still needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerPolynomial {
    pub coeffs: Vec<i64>,
}

impl IntegerPolynomial {
    /// A new polynomial with `n` coefficients initialized to 0
    pub fn new(n: usize) -> Self {
        IntegerPolynomial {
            coeffs: vec![0; n],
        }
    }

    pub fn from_coeffs(coeffs: Vec<i64>) -> Self {
        IntegerPolynomial { coeffs }
    }

    /// Narrows a `BigIntPolynomial`; all coefficients must fit in an `i64`.
    pub fn from_big_int_poly(p: &BigIntPolynomial) -> Self {
        IntegerPolynomial {
            coeffs: p
                .coeffs
                .iter()
                .map(|c| c.try_into().expect("coefficient fits in i64"))
                .collect(),
        }
    }

    /// Decodes `n` coefficients in `[0, q)` from the dense mod-q encoding
    pub fn from_binary(data: &[u8], n: usize, q: i64) -> Result<Self> {
        Ok(IntegerPolynomial::from_coeffs(encode::decode_mod_q(data, n, q)?))
    }

    /// Decodes `n` ternary coefficients from the sves encoding
    pub fn from_binary3_sves(data: &[u8], n: usize) -> Result<Self> {
        Ok(IntegerPolynomial::from_coeffs(encode::decode_mod3_sves(
            data, n,
        )?))
    }

    /// Decodes `n` ternary coefficients from the tight base-3 encoding
    pub fn from_binary3_tight(data: &[u8], n: usize) -> Result<Self> {
        Ok(IntegerPolynomial::from_coeffs(encode::decode_mod3_tight(
            data, n,
        )?))
    }

    /// Encodes coefficients in `[0, q)` to the dense mod-q format
    pub fn to_binary(&self, q: i64) -> Vec<u8> {
        encode::encode_mod_q(&self.coeffs, q)
    }

    /// Encodes ternary coefficients to the sves format. Only safe on
    /// polynomials produced by [`from_binary3_sves`](Self::from_binary3_sves)
    /// since adjacent (-1,-1) pairs are unencodable.
    pub fn to_binary3_sves(&self) -> Result<Vec<u8>> {
        encode::encode_mod3_sves(&self.coeffs)
    }

    /// Encodes ternary coefficients to the tight base-3 format
    pub fn to_binary3_tight(&self) -> Vec<u8> {
        encode::encode_mod3_tight(&self.coeffs)
    }

    /// Multiplies by another polynomial of the same length, taking the
    /// indices mod N. Returns the result as a new polynomial.
    pub fn multiply(&self, poly2: &IntegerPolynomial) -> IntegerPolynomial {
        let n = self.coeffs.len();
        assert_eq!(poly2.coeffs.len(), n, "number of coefficients must be the same");

        let mut c = self.mult_recursive(poly2);
        if c.coeffs.len() > n {
            for k in n..c.coeffs.len() {
                c.coeffs[k - n] += c.coeffs[k];
            }
            c.coeffs.truncate(n);
        }
        c
    }

    /// Multiplies by another polynomial, taking the values mod `modulus`
    /// and the indices mod N
    pub fn multiply_mod(&self, poly2: &IntegerPolynomial, modulus: i64) -> IntegerPolynomial {
        let mut c = self.multiply(poly2);
        c.mod_small(modulus);
        c
    }

    /// Multiplies by a `BigInt`-coefficient polynomial
    pub fn multiply_big(&self, poly2: &BigIntPolynomial) -> BigIntPolynomial {
        BigIntPolynomial::from_integer_poly(self).multiply(poly2)
    }

    // Karatsuba multiplication; the result has 2n-1 unreduced coefficients.
    fn mult_recursive(&self, poly2: &IntegerPolynomial) -> IntegerPolynomial {
        let a = &self.coeffs;
        let b = &poly2.coeffs;

        let n = poly2.coeffs.len();
        if n <= KARATSUBA_THRESHOLD {
            let cn = 2 * n - 1;
            let mut c = IntegerPolynomial::new(cn);
            for k in 0..cn {
                let lo = k.saturating_sub(n - 1);
                let hi = k.min(n - 1);
                for i in lo..=hi {
                    c.coeffs[k] += b[i] * a[k - i];
                }
            }
            c
        } else {
            let n1 = n / 2;
            let a1 = IntegerPolynomial::from_coeffs(a[..n1].to_vec());
            let a2 = IntegerPolynomial::from_coeffs(a[n1..].to_vec());
            let b1 = IntegerPolynomial::from_coeffs(b[..n1].to_vec());
            let b2 = IntegerPolynomial::from_coeffs(b[n1..].to_vec());

            let mut big_a = a1.clone();
            big_a.add(&a2);
            let mut big_b = b1.clone();
            big_b.add(&b2);

            let c1 = a1.mult_recursive(&b1);
            let c2 = a2.mult_recursive(&b2);
            let mut c3 = big_a.mult_recursive(&big_b);
            c3.sub(&c1);
            c3.sub(&c2);

            let mut c = IntegerPolynomial::new(2 * n - 1);
            for (i, &ci) in c1.coeffs.iter().enumerate() {
                c.coeffs[i] = ci;
            }
            for (i, &ci) in c3.coeffs.iter().enumerate() {
                c.coeffs[n1 + i] += ci;
            }
            for (i, &ci) in c2.coeffs.iter().enumerate() {
                c.coeffs[2 * n1 + i] += ci;
            }
            c
        }
    }

    /// Computes the inverse mod `q`; `q` must be a power of 2.
    ///
    /// Returns `None` if the polynomial is not invertible; the caller is
    /// expected to resample and retry.
    pub fn invert_fq(&self, q: i64) -> Option<IntegerPolynomial> {
        let n = self.coeffs.len();
        let mut k = 0usize;
        let mut b = IntegerPolynomial::new(n + 1);
        b.coeffs[0] = 1;
        let mut c = IntegerPolynomial::new(n + 1);
        let mut f = IntegerPolynomial::new(n + 1);
        f.coeffs[..n].copy_from_slice(&self.coeffs);
        f.mod_positive(2);
        // g(x) = x^N - 1 over GF(2)
        let mut g = IntegerPolynomial::new(n + 1);
        g.coeffs[0] = 1;
        g.coeffs[n] = 1;
        loop {
            while f.coeffs[0] == 0 {
                // f(x) = f(x) / x, c(x) = c(x) * x
                for i in 1..=n {
                    f.coeffs[i - 1] = f.coeffs[i];
                    c.coeffs[n + 1 - i] = c.coeffs[n - i];
                }
                f.coeffs[n] = 0;
                c.coeffs[0] = 0;
                k += 1;
                if f.equals_zero() {
                    return None;
                }
            }
            if f.equals_one() {
                break;
            }
            if f.degree() < g.degree() {
                std::mem::swap(&mut f, &mut g);
                std::mem::swap(&mut b, &mut c);
            }
            f.add_mod(&g, 2);
            b.add_mod(&c, 2);
        }

        if b.coeffs[n] != 0 {
            return None;
        }
        // Fq(x) = x^(N-k) * b(x)
        let mut fq = IntegerPolynomial::new(n);
        let k = k % n;
        for i in (0..n).rev() {
            let j = if i < k { i + n - k } else { i - k };
            fq.coeffs[j] = b.coeffs[i];
        }

        Some(self.mod2_to_modq(fq, q))
    }

    // Lifts the inverse mod 2 to the inverse mod q by Newton iteration,
    // doubling the working modulus each round.
    fn mod2_to_modq(&self, mut fq: IntegerPolynomial, q: i64) -> IntegerPolynomial {
        if q == 2048 {
            let this_long = LongPolynomial2::from_integer_poly(self);
            let mut fq_long = LongPolynomial2::from_integer_poly(&fq);
            let mut v = 2i64;
            while v < q {
                v *= 2;
                let mut temp = fq_long.clone();
                temp.mult2_and(v - 1);
                fq_long = this_long.multiply(&fq_long).multiply(&fq_long);
                temp.sub_and(&fq_long, v - 1);
                fq_long = temp;
            }
            fq_long.to_integer_polynomial()
        } else {
            let mut v = 2i64;
            while v < q {
                v *= 2;
                let mut temp = fq.clone();
                temp.mult2_mod(v);
                fq = self.multiply_mod(&fq, v).multiply_mod(&fq, v);
                temp.sub_mod(&fq, v);
                fq = temp;
            }
            fq
        }
    }

    /// Computes the inverse mod 3.
    ///
    /// Returns `None` if the polynomial is not invertible; the caller is
    /// expected to resample and retry.
    pub fn invert_f3(&self) -> Option<IntegerPolynomial> {
        let n = self.coeffs.len();
        let mut k = 0usize;
        let mut b = IntegerPolynomial::new(n + 1);
        b.coeffs[0] = 1;
        let mut c = IntegerPolynomial::new(n + 1);
        let mut f = IntegerPolynomial::new(n + 1);
        f.coeffs[..n].copy_from_slice(&self.coeffs);
        f.mod_positive(3);
        // g(x) = x^N - 1
        let mut g = IntegerPolynomial::new(n + 1);
        g.coeffs[0] = -1;
        g.coeffs[n] = 1;
        loop {
            while f.coeffs[0] == 0 {
                // f(x) = f(x) / x, c(x) = c(x) * x
                for i in 1..=n {
                    f.coeffs[i - 1] = f.coeffs[i];
                    c.coeffs[n + 1 - i] = c.coeffs[n - i];
                }
                f.coeffs[n] = 0;
                c.coeffs[0] = 0;
                k += 1;
                if f.equals_zero() {
                    return None;
                }
            }
            if f.equals_abs_one() {
                break;
            }
            if f.degree() < g.degree() {
                std::mem::swap(&mut f, &mut g);
                std::mem::swap(&mut b, &mut c);
            }
            if f.coeffs[0] == g.coeffs[0] {
                f.sub_mod(&g, 3);
                b.sub_mod(&c, 3);
            } else {
                f.add_mod(&g, 3);
                b.add_mod(&c, 3);
            }
        }

        if b.coeffs[n] != 0 {
            return None;
        }
        // Fp(x) = [+-] x^(N-k) * b(x); the sign of f's constant term decides
        let mut fp = IntegerPolynomial::new(n);
        let k = k % n;
        for i in (0..n).rev() {
            let j = if i < k { i + n - k } else { i - k };
            fp.coeffs[j] = f.coeffs[0] * b.coeffs[i];
        }

        fp.ensure_positive(3);
        Some(fp)
    }

    /// Resultant of this polynomial with `x^n - 1` using a probabilistic
    /// algorithm.
    ///
    /// Rather than computing modular resultants until their product exceeds
    /// the maximum possible resultant, this stops as soon as three
    /// consecutive CRT-stabilized values agree. The return value can
    /// therefore be incorrect with small probability; callers must verify
    /// that `res = rho*this + t*(x^n-1)` holds and try a different
    /// polynomial if it does not.
    pub fn resultant(&self) -> Resultant {
        let n = self.coeffs.len();

        let mut mod_resultants: VecDeque<ModularResultant> = VecDeque::new();
        let mut p_prod = BigInt::one();
        let mut res = BigInt::one();
        // number of consecutive modular resultants equal to each other
        let mut num_equal = 1usize;

        let mut primes = PrimeGenerator::new();
        loop {
            let prime = primes.next_prime();
            let crr = self.resultant_mod(prime);
            let prime_big = BigInt::from(prime);

            let temp = &p_prod * &prime_big;
            let er = euclid::BigIntEuclidean::calculate(&prime_big, &p_prod);
            let res_prev = res.clone();
            res *= &er.x * &prime_big;
            let res2 = &crr.res * (&er.y * &p_prod);
            res = (res + res2).mod_floor(&temp);
            p_prod = temp;
            mod_resultants.push_back(crr);

            let p_prod2 = &p_prod / 2;
            let p_prod2n = -&p_prod2;
            if res > p_prod2 {
                res -= &p_prod;
            } else if res < p_prod2n {
                res += &p_prod;
            }

            if res == res_prev {
                num_equal += 1;
                if num_equal >= NUM_EQUAL_RESULTANTS {
                    break;
                }
            } else {
                num_equal = 1;
            }
        }
        debug!(primes = mod_resultants.len(), "resultant CRT loop stabilized");

        // Combine modular rho's to obtain the final rho; pairs of small
        // resultants are merged into bigger ones until one is left.
        while mod_resultants.len() > 1 {
            let r1 = mod_resultants.pop_front().expect("non-empty");
            let r2 = mod_resultants.pop_front().expect("non-empty");
            mod_resultants.push_back(ModularResultant::combine_rho(&r1, &r2));
        }
        let mut rho = mod_resultants.pop_front().expect("non-empty").rho;

        let p_prod2 = &p_prod / 2;
        let p_prod2n = -&p_prod2;
        if res > p_prod2 {
            res -= &p_prod;
        }
        if res < p_prod2n {
            res += &p_prod;
        }

        for c in rho.coeffs.iter_mut().take(n) {
            if *c > p_prod2 {
                *c -= &p_prod;
            }
            if *c < p_prod2n {
                *c += &p_prod;
            }
        }

        Resultant::new(rho, res)
    }

    /// Resultant of this polynomial with `x^n - 1 mod p`.
    pub fn resultant_mod(&self, p: i64) -> ModularResultant {
        // the operations involve polynomials of degree deg(f)+1
        let mut fcoeffs = self.coeffs.clone();
        fcoeffs.push(0);
        let n = fcoeffs.len();

        let mut a = IntegerPolynomial::new(n);
        a.coeffs[0] = -1;
        a.coeffs[n - 1] = 1;
        let mut b = IntegerPolynomial::from_coeffs(fcoeffs);
        let mut v1 = IntegerPolynomial::new(n);
        let mut v2 = IntegerPolynomial::new(n);
        v2.coeffs[0] = 1;
        let mut da = n - 1;
        let mut db = b.degree();
        let mut ta = da;
        let mut r: i64 = 1;
        while db > 0 {
            let mut c = euclid::invert(b.coeffs[db], p);
            c = (c * a.coeffs[da]) % p;
            a.mult_shift_sub(&b, c, da - db, p);
            v1.mult_shift_sub(&v2, c, da - db, p);

            da = a.degree();
            if da < db {
                r *= euclid::pow_mod(b.coeffs[db], (ta - da) as i64, p);
                r %= p;
                if ta % 2 == 1 && db % 2 == 1 {
                    r = -r % p;
                }
                std::mem::swap(&mut a, &mut b);
                std::mem::swap(&mut v1, &mut v2);
                ta = db;
                std::mem::swap(&mut da, &mut db);
            }
        }
        r *= euclid::pow_mod(b.coeffs[0], da as i64, p);
        r %= p;
        let c = euclid::invert(b.coeffs[0], p);
        v2.mult_factor(c);
        v2.mod_small(p);
        v2.mult_factor(r);
        v2.mod_small(p);

        // drop the highest coefficient so the length matches the input
        v2.coeffs.truncate(v2.coeffs.len() - 1);
        ModularResultant::new(
            BigIntPolynomial::from_integer_poly(&v2),
            BigInt::from(r),
            BigInt::from(p),
        )
    }

    // Computes this - b*c*x^k mod p in place (EESS algorithm 2.2.7.1,
    // steps 4a and 4b).
    fn mult_shift_sub(&mut self, b: &IntegerPolynomial, c: i64, k: usize, p: i64) {
        let n = self.coeffs.len();
        for i in k..n {
            self.coeffs[i] = (self.coeffs[i] - b.coeffs[i - k] * c) % p;
        }
    }

    /// The degree of the polynomial
    pub fn degree(&self) -> usize {
        let mut degree = self.coeffs.len() - 1;
        while degree > 0 && self.coeffs[degree] == 0 {
            degree -= 1;
        }
        degree
    }

    /// Adds another polynomial which can have a different number of
    /// coefficients; the shorter operand is zero-padded.
    pub fn add(&mut self, b: &IntegerPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), 0);
        }
        for (i, &bi) in b.coeffs.iter().enumerate() {
            self.coeffs[i] += bi;
        }
    }

    /// Adds another polynomial and takes the coefficients mod `modulus`
    pub fn add_mod(&mut self, b: &IntegerPolynomial, modulus: i64) {
        self.add(b);
        self.mod_small(modulus);
    }

    /// Subtracts another polynomial which can have a different number of
    /// coefficients; the shorter operand is zero-padded.
    pub fn sub(&mut self, b: &IntegerPolynomial) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), 0);
        }
        for (i, &bi) in b.coeffs.iter().enumerate() {
            self.coeffs[i] -= bi;
        }
    }

    /// Subtracts another polynomial and takes the coefficients mod `modulus`
    pub fn sub_mod(&mut self, b: &IntegerPolynomial, modulus: i64) {
        self.sub(b);
        self.mod_small(modulus);
    }

    /// Subtracts an integer from each coefficient
    pub fn sub_scalar(&mut self, b: i64) {
        for c in self.coeffs.iter_mut() {
            *c -= b;
        }
    }

    /// Multiplies each coefficient by an integer
    pub fn mult_factor(&mut self, factor: i64) {
        for c in self.coeffs.iter_mut() {
            *c *= factor;
        }
    }

    /// Multiplies each coefficient by 2 and applies a modulus
    pub fn mult2_mod(&mut self, modulus: i64) {
        for c in self.coeffs.iter_mut() {
            *c = (*c * 2) % modulus;
        }
    }

    /// Multiplies each coefficient by 3 and applies a modulus
    pub fn mult3_mod(&mut self, modulus: i64) {
        for c in self.coeffs.iter_mut() {
            *c = (*c * 3) % modulus;
        }
    }

    /// Divides each coefficient by `k`, rounding to the nearest integer
    pub fn div_round(&mut self, k: i64) {
        let k2 = (k + 1) / 2;
        for c in self.coeffs.iter_mut() {
            *c += if *c > 0 { k2 } else { -k2 };
            *c /= k;
        }
    }

    /// Takes each coefficient modulo 3 such that all coefficients are ternary
    pub fn mod3(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c %= 3;
            if *c > 1 {
                *c -= 3;
            }
            if *c < -1 {
                *c += 3;
            }
        }
    }

    /// Takes each coefficient modulo `modulus` (truncated, sign-preserving)
    pub fn mod_small(&mut self, modulus: i64) {
        for c in self.coeffs.iter_mut() {
            *c %= modulus;
        }
    }

    /// Ensures all coefficients are between 0 and `modulus - 1`
    pub fn mod_positive(&mut self, modulus: i64) {
        self.mod_small(modulus);
        self.ensure_positive(modulus);
    }

    /// Reduces all coefficients to the interval `[-modulus/2, modulus/2)`
    pub fn mod_center(&mut self, modulus: i64) {
        self.mod_small(modulus);
        for c in self.coeffs.iter_mut() {
            while *c < modulus / 2 {
                *c += modulus;
            }
            while *c >= modulus / 2 {
                *c -= modulus;
            }
        }
    }

    /// Adds `modulus` until all coefficients are non-negative
    pub fn ensure_positive(&mut self, modulus: i64) {
        for c in self.coeffs.iter_mut() {
            while *c < 0 {
                *c += modulus;
            }
        }
    }

    /// Shifts the values of all coefficients to the interval `[-q/2, q/2]`
    pub fn center0(&mut self, q: i64) {
        for c in self.coeffs.iter_mut() {
            while *c < -q / 2 {
                *c += q;
            }
            while *c > q / 2 {
                *c -= q;
            }
        }
    }

    /// The centered euclidean norm of the polynomial
    pub fn centered_norm_sq(&self, q: i64) -> i64 {
        let n = self.coeffs.len() as i64;
        let mut p = self.clone();
        p.shift_gap(q);

        let mut sum = 0i64;
        let mut sq_sum = 0i64;
        for &c in &p.coeffs {
            sum += c;
            sq_sum += c * c;
        }

        sq_sum - sum * sum / n
    }

    /// Shifts all coefficients so the largest gap is centered around `-q/2`,
    /// minimizing wraparound-induced norm inflation.
    pub fn shift_gap(&mut self, q: i64) {
        self.mod_center(q);

        let mut sorted = self.coeffs.clone();
        sorted.sort_unstable();

        let mut maxrange = 0;
        let mut maxrange_start = 0;
        for w in sorted.windows(2) {
            let range = w[1] - w[0];
            if range > maxrange {
                maxrange = range;
                maxrange_start = w[0];
            }
        }

        let pmin = sorted[0];
        let pmax = sorted[sorted.len() - 1];

        let j = q - pmax + pmin;
        let shift = if j > maxrange {
            (pmax + pmin) / 2
        } else {
            maxrange_start + maxrange / 2 + q / 2
        };

        self.sub_scalar(shift);
    }

    /// The sum of all coefficients, i.e. the polynomial evaluated at 1
    pub fn sum_coeffs(&self) -> i64 {
        self.coeffs.iter().sum()
    }

    /// The number of coefficients equal to `value`
    pub fn count(&self, value: i64) -> usize {
        self.coeffs.iter().filter(|&&c| c == value).count()
    }

    /// True iff all coefficients are zero
    pub fn equals_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// True iff the polynomial equals 1
    pub fn equals_one(&self) -> bool {
        self.coeffs[0] == 1 && self.coeffs[1..].iter().all(|&c| c == 0)
    }

    /// True iff the polynomial equals 1 or -1
    pub fn equals_abs_one(&self) -> bool {
        self.coeffs[0].abs() == 1 && self.coeffs[1..].iter().all(|&c| c == 0)
    }

    /// Multiplication by `X` in `Z[X]/(X^N - 1)`
    pub fn rotate1(&mut self) {
        self.coeffs.rotate_right(1);
    }
}

// Yields the fixed prime table, then trial-division primes beyond it.
struct PrimeGenerator {
    index: usize,
    prime: i64,
}

impl PrimeGenerator {
    fn new() -> Self {
        PrimeGenerator { index: 0, prime: 0 }
    }

    fn next_prime(&mut self) -> i64 {
        if self.index < PRIMES.len() {
            self.prime = PRIMES[self.index];
            self.index += 1;
        } else {
            self.prime = next_prime_after(self.prime);
        }
        self.prime
    }
}

fn next_prime_after(n: i64) -> i64 {
    let mut candidate = n + 2;
    loop {
        let mut is_prime = true;
        let mut d = 3;
        while d * d <= candidate {
            if candidate % d == 0 {
                is_prime = false;
                break;
            }
            d += 2;
        }
        if is_prime {
            return candidate;
        }
        candidate += 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    // plain O(n^2) cyclic convolution as a reference
    fn mult_schoolbook(a: &[i64], b: &[i64]) -> Vec<i64> {
        let n = a.len();
        let mut c = vec![0i64; n];
        for i in 0..n {
            for j in 0..n {
                c[(i + j) % n] += a[i] * b[j];
            }
        }
        c
    }

    #[test]
    fn test_mult_fixture() {
        let f = IntegerPolynomial::from_coeffs(vec![4, -1, 9, 2, 1, -5, 12, -7, 0, -9, 5]);
        let g = IntegerPolynomial::from_coeffs(vec![-6, 0, 0, 13, 3, -2, -4, 10, 11, 2, -1]);
        let c = f.multiply(&g);
        assert_eq!(c.coeffs, vec![2, -189, 77, 124, -29, 0, -75, 124, -49, 267, 34]);
    }

    #[test]
    fn test_mult_karatsuba_matches_schoolbook() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for n in [33usize, 100, 439] {
            let a: Vec<i64> = (0..n).map(|_| rng.gen_range(-1000..1000)).collect();
            let b: Vec<i64> = (0..n).map(|_| rng.gen_range(-1000..1000)).collect();
            let expected = mult_schoolbook(&a, &b);
            let c = IntegerPolynomial::from_coeffs(a).multiply(&IntegerPolynomial::from_coeffs(b));
            assert_eq!(c.coeffs, expected, "n={}", n);
        }
    }

    #[test]
    fn test_invert_fq_tutorial_example() {
        let a = IntegerPolynomial::from_coeffs(vec![-1, 1, 1, 0, -1, 0, 1, 0, 0, 1, -1]);
        let b = a.invert_fq(32).unwrap();
        assert_eq!(b.coeffs, vec![5, 9, 6, 16, 4, 15, 16, 22, 20, 18, 30]);
        let mut check = a.multiply_mod(&b, 32);
        check.mod_positive(32);
        assert!(check.equals_one());
    }

    #[test]
    fn test_invert_fq_2048_long_path() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let mut tries = 0;
        while tries < 10 {
            let coeffs: Vec<i64> = (0..439).map(|_| rng.gen_range(-1..=1)).collect();
            let a = IntegerPolynomial::from_coeffs(coeffs);
            if let Some(inv) = a.invert_fq(2048) {
                let mut check = a.multiply_mod(&inv, 2048);
                check.mod_positive(2048);
                assert!(check.equals_one());
                tries += 1;
            }
        }
    }

    #[test]
    fn test_invert_f3() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let mut tries = 0;
        while tries < 10 {
            let coeffs: Vec<i64> = (0..89).map(|_| rng.gen_range(-1..=1)).collect();
            let a = IntegerPolynomial::from_coeffs(coeffs);
            if let Some(inv) = a.invert_f3() {
                let mut check = a.multiply_mod(&inv, 3);
                check.mod_positive(3);
                assert!(check.equals_one());
                tries += 1;
            }
        }
    }

    #[test]
    fn test_not_invertible_returns_none() {
        // x^11 - ... with zero constant coefficient everywhere: f = 0
        let a = IntegerPolynomial::new(11);
        assert!(a.invert_fq(32).is_none());
        assert!(a.invert_f3().is_none());
    }

    #[test]
    fn test_resultant_identity() {
        // res = rho*f + t*(x^n - 1): the cyclic product rho*f must reduce to
        // the constant res. Small polynomials keep rho's coefficients well
        // inside the CRT modulus, so the identity holds over Z.
        for coeffs in [
            vec![-1i64, 1, 1, 0, -1, 0, 1, 0, 0, 1, -1],
            vec![1, 1, 0, 0, -1, 1, 0, -1, 1, 0, 1],
        ] {
            let f = IntegerPolynomial::from_coeffs(coeffs);
            let r = f.resultant();
            let product = f.multiply_big(&r.rho);
            assert_eq!(product.coeffs[0], r.res);
            for c in &product.coeffs[1..] {
                assert_eq!(*c, BigInt::from(0));
            }
        }
    }

    #[test]
    fn test_mod_center_and_center0() {
        let mut p = IntegerPolynomial::from_coeffs(vec![0, 1, 15, 16, 31, -17]);
        p.mod_center(32);
        for &c in &p.coeffs {
            assert!((-16..16).contains(&c));
        }

        let mut p = IntegerPolynomial::from_coeffs(vec![0, 17, -17, 31]);
        p.center0(32);
        for &c in &p.coeffs {
            assert!((-16..=16).contains(&c));
        }
    }

    #[test]
    fn test_centered_norm_sq() {
        // norm is invariant under rotation and global shift mod q
        let mut rng = ChaCha20Rng::seed_from_u64(15);
        let coeffs: Vec<i64> = (0..89).map(|_| rng.gen_range(0..2048)).collect();
        let p = IntegerPolynomial::from_coeffs(coeffs);
        let norm = p.centered_norm_sq(2048);
        let mut rotated = p.clone();
        rotated.rotate1();
        assert_eq!(rotated.centered_norm_sq(2048), norm);
    }

    #[test]
    fn test_add_sub_pad_shorter_operand() {
        let mut a = IntegerPolynomial::from_coeffs(vec![1, 2]);
        a.add(&IntegerPolynomial::from_coeffs(vec![1, 1, 5]));
        assert_eq!(a.coeffs, vec![2, 3, 5]);
        a.sub(&IntegerPolynomial::from_coeffs(vec![0, 0, 0, 7]));
        assert_eq!(a.coeffs, vec![2, 3, 5, -7]);
    }

    #[test]
    fn test_shape_utilities() {
        let p = IntegerPolynomial::from_coeffs(vec![1, 0, -1, 1, 0]);
        assert_eq!(p.sum_coeffs(), 1);
        assert_eq!(p.count(1), 2);
        assert_eq!(p.count(-1), 1);
        assert_eq!(p.degree(), 3);
        assert!(!p.equals_zero());
        let mut one = IntegerPolynomial::new(5);
        one.coeffs[0] = -1;
        assert!(one.equals_abs_one() && !one.equals_one());
    }
}
