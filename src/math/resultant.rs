//! Resultant carriers and their CRT combination.

use num_bigint::BigInt;

use super::big_int_poly::BigIntPolynomial;
use super::euclid::BigIntEuclidean;

/// A resultant and a polynomial `rho` such that
/// `res = rho*f + t*(x^n - 1)` for some integer `t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resultant {
    /// Bezout-like cofactor polynomial
    pub rho: BigIntPolynomial,
    /// Resultant of `f` with `x^n - 1`
    pub res: BigInt,
}

impl Resultant {
    pub fn new(rho: BigIntPolynomial, res: BigInt) -> Self {
        Resultant { rho, res }
    }
}

/// A [`Resultant`] taken modulo an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModularResultant {
    pub rho: BigIntPolynomial,
    pub res: BigInt,
    pub modulus: BigInt,
}

impl ModularResultant {
    pub fn new(rho: BigIntPolynomial, res: BigInt, modulus: BigInt) -> Self {
        ModularResultant { rho, res, modulus }
    }

    /// Combines the `rho`s of two modular resultants into a `rho` modulo
    /// `m1*m2` via the Chinese Remainder Theorem. The combined `res` is not
    /// tracked and comes out zero.
    pub fn combine_rho(res1: &ModularResultant, res2: &ModularResultant) -> ModularResultant {
        let mod1 = &res1.modulus;
        let mod2 = &res2.modulus;
        let prod = mod1 * mod2;
        let er = BigIntEuclidean::calculate(mod2, mod1);

        let mut rho1 = res1.rho.clone();
        rho1.mult_factor(&(&er.x * mod2));
        let mut rho2 = res2.rho.clone();
        rho2.mult_factor(&(&er.y * mod1));

        rho1.add(&rho2);
        rho1.mod_big(&prod);

        ModularResultant::new(rho1, BigInt::from(0), prod)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::poly::IntegerPolynomial;

    #[test]
    fn test_combine_rho() {
        // combining the per-prime rho's must agree with rho mod p1*p2
        let f = IntegerPolynomial::from_coeffs(vec![4, -1, 9, 2, 1, -5, 12, -7, 0, -9, 5]);
        let r1 = f.resultant_mod(4507);
        let r2 = f.resultant_mod(4513);
        let combined = ModularResultant::combine_rho(&r1, &r2);
        assert_eq!(combined.modulus, BigInt::from(4507i64 * 4513));

        // verify res = rho*f mod (x^n - 1) holds modulo each prime
        for (modular, p) in [(&r1, 4507i64), (&r2, 4513)] {
            let p = BigInt::from(p);
            let mut check = f.multiply_big(&modular.rho);
            check.mod_big(&p);
            let mut expected = vec![BigInt::from(0); f.coeffs.len()];
            expected[0] = num_integer::Integer::mod_floor(&modular.res, &p);
            assert_eq!(check.coeffs, expected);
        }
    }
}
