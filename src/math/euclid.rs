//! Extended Euclidean algorithm over machine integers and `BigInt`,
//! plus the small modular helpers built on it.

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Result of the extended Euclidean algorithm: `gcd = a*x + b*y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntEuclidean {
    pub x: i64,
    pub y: i64,
    pub gcd: i64,
}

impl IntEuclidean {
    /// Runs the extended Euclidean algorithm on two `i64`s.
    pub fn calculate(mut a: i64, mut b: i64) -> IntEuclidean {
        let mut x = 0i64;
        let mut last_x = 1i64;
        let mut y = 1i64;
        let mut last_y = 0i64;
        while b != 0 {
            let quotient = a / b;
            let temp = a;
            a = b;
            b = temp % b;

            let temp = x;
            x = last_x - quotient * x;
            last_x = temp;

            let temp = y;
            y = last_y - quotient * y;
            last_y = temp;
        }
        IntEuclidean {
            x: last_x,
            y: last_y,
            gcd: a,
        }
    }
}

/// Result of the extended Euclidean algorithm in `BigInt`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigIntEuclidean {
    pub x: BigInt,
    pub y: BigInt,
    pub gcd: BigInt,
}

impl BigIntEuclidean {
    /// Runs the extended Euclidean algorithm on two `BigInt`s.
    pub fn calculate(a: &BigInt, b: &BigInt) -> BigIntEuclidean {
        let mut a = a.clone();
        let mut b = b.clone();
        let mut x = BigInt::zero();
        let mut last_x = BigInt::one();
        let mut y = BigInt::one();
        let mut last_y = BigInt::zero();
        while !b.is_zero() {
            let quotient = &a / &b;
            let remainder = &a % &b;
            a = b;
            b = remainder;

            let temp = x.clone();
            x = last_x - &quotient * x;
            last_x = temp;

            let temp = y.clone();
            y = last_y - &quotient * y;
            last_y = temp;
        }
        BigIntEuclidean {
            x: last_x,
            y: last_y,
            gcd: a,
        }
    }
}

/// Calculates the inverse of `n` mod `modulus`.
///
/// The result may be negative; callers reduce it together with the values
/// they multiply it into.
pub fn invert(n: i64, modulus: i64) -> i64 {
    let mut n = n % modulus;
    if n < 0 {
        n += modulus;
    }
    IntEuclidean::calculate(n, modulus).x
}

/// Calculates `a^b mod modulus`.
pub fn pow_mod(a: i64, b: i64, modulus: i64) -> i64 {
    let mut p = 1i64;
    for _ in 0..b {
        p = (p * a) % modulus;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_euclidean() {
        let r = IntEuclidean::calculate(120, 23);
        assert_eq!(r, IntEuclidean { x: -9, y: 47, gcd: 1 });

        let r = IntEuclidean::calculate(126, 231);
        assert_eq!(r, IntEuclidean { x: 2, y: -1, gcd: 21 });
    }

    #[test]
    fn test_big_int_euclidean() {
        let r = BigIntEuclidean::calculate(&BigInt::from(120), &BigInt::from(23));
        assert_eq!(r.x, BigInt::from(-9));
        assert_eq!(r.y, BigInt::from(47));
        assert_eq!(r.gcd, BigInt::from(1));

        let r = BigIntEuclidean::calculate(&BigInt::from(126), &BigInt::from(231));
        assert_eq!(r.x, BigInt::from(2));
        assert_eq!(r.y, BigInt::from(-1));
        assert_eq!(r.gcd, BigInt::from(21));
    }

    #[test]
    fn test_invert() {
        for p in [4507i64, 4513] {
            for n in [1i64, 2, 1000, p - 1] {
                let inv = invert(n, p);
                assert_eq!(((n * inv) % p + p) % p, 1);
            }
        }
    }

    #[test]
    fn test_pow_mod() {
        assert_eq!(pow_mod(2, 10, 4507), 1024);
        assert_eq!(pow_mod(3, 0, 7), 1);
        assert_eq!(pow_mod(5, 3, 7), 125 % 7);
    }
}
