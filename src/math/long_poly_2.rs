//! Two 11-bit coefficients packed per 64-bit word.

use crate::math::poly::IntegerPolynomial;

/// Bits 0..10 and 24..34 of each word hold one coefficient each
const LANE_MASK: i64 = 0x7FF0007FF;
/// Keeps borrows from propagating across lanes during subtraction
const BORROW_GUARD: i64 = 0x0800000800000;

/// A polynomial mod 2048 that stores two coefficients per `i64` word, in
/// bits 0..10 and 24..34, so one machine multiplication advances two
/// coefficients at once. Used by the mod-q inversion lift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongPolynomial2 {
    // each word packs two coefficients of the original polynomial
    coeffs: Vec<i64>,
    num_coeffs: usize,
}

impl LongPolynomial2 {
    /// Packs an [`IntegerPolynomial`]; coefficients are normalized into
    /// `[0, 2048)` first.
    pub fn from_integer_poly(p: &IntegerPolynomial) -> Self {
        let num_coeffs = p.coeffs.len();
        let mut coeffs = Vec::with_capacity((num_coeffs + 1) / 2);
        let mut p_idx = 0;
        while p_idx < num_coeffs {
            let mut c0 = p.coeffs[p_idx];
            p_idx += 1;
            while c0 < 0 {
                c0 += 2048;
            }
            let mut c1 = if p_idx < num_coeffs {
                let c = p.coeffs[p_idx];
                p_idx += 1;
                c
            } else {
                0
            };
            while c1 < 0 {
                c1 += 2048;
            }
            coeffs.push(c0 + (c1 << 24));
        }
        LongPolynomial2 { coeffs, num_coeffs }
    }

    fn zeroed(words: usize, num_coeffs: usize) -> Self {
        LongPolynomial2 {
            coeffs: vec![0; words],
            num_coeffs,
        }
    }

    /// Multiplies by another polynomial, taking the indices mod N and the
    /// values mod 2048.
    pub fn multiply(&self, poly2: &LongPolynomial2) -> LongPolynomial2 {
        let n = self.coeffs.len();
        assert!(
            poly2.coeffs.len() == n && poly2.num_coeffs == self.num_coeffs,
            "number of coefficients must be the same"
        );

        let mut c = self.mult_recursive(poly2);

        if c.coeffs.len() > n {
            if self.num_coeffs % 2 == 0 {
                for k in n..c.coeffs.len() {
                    c.coeffs[k - n] = (c.coeffs[k - n] + c.coeffs[k]) & LANE_MASK;
                }
                c.coeffs.truncate(n);
            } else {
                // the upper half is misaligned by one lane
                for k in n..c.coeffs.len() {
                    c.coeffs[k - n] += c.coeffs[k - 1] >> 24;
                    c.coeffs[k - n] += (c.coeffs[k] & 2047) << 24;
                    c.coeffs[k - n] &= LANE_MASK;
                }
                c.coeffs.truncate(n);
                let last = c.coeffs.len() - 1;
                c.coeffs[last] &= 2047;
            }
        }

        c.num_coeffs = self.num_coeffs;
        c
    }

    // Karatsuba multiplication on packed words; lane products stay inside
    // their 11-bit fields because every addition is re-masked.
    fn mult_recursive(&self, poly2: &LongPolynomial2) -> LongPolynomial2 {
        let a = &self.coeffs;
        let b = &poly2.coeffs;

        let n = poly2.coeffs.len();
        if n <= 32 {
            let cn = 2 * n;
            let mut c = LongPolynomial2::zeroed(cn, self.num_coeffs);
            for k in 0..cn {
                let lo = k.saturating_sub(n - 1);
                let hi = k.min(n - 1);
                for i in lo..=hi {
                    let c0 = a[k - i].wrapping_mul(b[i]);
                    // low lane and the bits-24 cross term stay in this word,
                    // the bits-48 term carries one word up
                    let cu = c0 & LANE_MASK;
                    let co = ((c0 as u64) >> 48) as i64 & 2047;

                    c.coeffs[k] = (c.coeffs[k] + cu) & LANE_MASK;
                    if k + 1 < cn {
                        c.coeffs[k + 1] = (c.coeffs[k + 1] + co) & LANE_MASK;
                    }
                }
            }
            c
        } else {
            let n1 = n / 2;
            let a1 = LongPolynomial2 {
                coeffs: a[..n1].to_vec(),
                num_coeffs: self.num_coeffs,
            };
            let a2 = LongPolynomial2 {
                coeffs: a[n1..].to_vec(),
                num_coeffs: self.num_coeffs,
            };
            let b1 = LongPolynomial2 {
                coeffs: b[..n1].to_vec(),
                num_coeffs: self.num_coeffs,
            };
            let b2 = LongPolynomial2 {
                coeffs: b[n1..].to_vec(),
                num_coeffs: self.num_coeffs,
            };

            let mut big_a = a1.clone();
            big_a.add(&a2);
            let mut big_b = b1.clone();
            big_b.add(&b2);

            let c1 = a1.mult_recursive(&b1);
            let c2 = a2.mult_recursive(&b2);
            let mut c3 = big_a.mult_recursive(&big_b);
            c3.sub(&c1);
            c3.sub(&c2);

            let mut c = LongPolynomial2::zeroed(2 * n, self.num_coeffs);
            for (i, &ci) in c1.coeffs.iter().enumerate() {
                c.coeffs[i] = ci & LANE_MASK;
            }
            for (i, &ci) in c3.coeffs.iter().enumerate() {
                c.coeffs[n1 + i] = (c.coeffs[n1 + i] + ci) & LANE_MASK;
            }
            for (i, &ci) in c2.coeffs.iter().enumerate() {
                c.coeffs[2 * n1 + i] = (c.coeffs[2 * n1 + i] + ci) & LANE_MASK;
            }
            c
        }
    }

    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        let mut int_coeffs = vec![0i64; self.num_coeffs];
        let mut u_idx = 0;
        for &c in &self.coeffs {
            int_coeffs[u_idx] = c & 2047;
            u_idx += 1;
            if u_idx < self.num_coeffs {
                int_coeffs[u_idx] = (c >> 24) & 2047;
                u_idx += 1;
            }
        }
        IntegerPolynomial::from_coeffs(int_coeffs)
    }

    // lane-wise addition; the shorter operand is zero-padded
    fn add(&mut self, b: &LongPolynomial2) {
        if b.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(b.coeffs.len(), 0);
        }
        for (i, &bi) in b.coeffs.iter().enumerate() {
            self.coeffs[i] = (self.coeffs[i] + bi) & LANE_MASK;
        }
    }

    // lane-wise subtraction; b must not be longer than self
    fn sub(&mut self, b: &LongPolynomial2) {
        for (i, &bi) in b.coeffs.iter().enumerate() {
            self.coeffs[i] = (BORROW_GUARD + self.coeffs[i] - bi) & LANE_MASK;
        }
    }

    /// Subtracts another polynomial of the same length and applies `mask`
    /// to both lanes of each word. `mask` must be less than 2048.
    pub fn sub_and(&mut self, b: &LongPolynomial2, mask: i64) {
        let long_mask = (mask << 24) + mask;
        for (i, &bi) in b.coeffs.iter().enumerate() {
            self.coeffs[i] = (BORROW_GUARD + self.coeffs[i] - bi) & long_mask;
        }
    }

    /// Multiplies the polynomial by 2 and applies `mask` to both lanes of
    /// each word. `mask` must be less than 2048.
    pub fn mult2_and(&mut self, mask: i64) {
        let long_mask = (mask << 24) + mask;
        for c in self.coeffs.iter_mut() {
            *c = (*c << 1) & long_mask;
        }
    }
}
