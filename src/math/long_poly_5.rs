//! Five 12-bit coefficients packed per 64-bit word.

use crate::math::dense_ternary::DenseTernaryPolynomial;
use crate::math::poly::IntegerPolynomial;

/// Five 12-bit lanes per word, 11 bits of value plus one bit of headroom
const LANE_MASK: i64 = 0x7FF7FF7FF7FF7FF;
/// Keeps borrows from propagating across lanes during subtraction
const BORROW_GUARD: i64 = 0x800800800800800;

/// A polynomial mod 2048 that stores five coefficients per `i64` word in
/// 12-bit lanes. Multiplication by a ternary polynomial reduces to masked
/// word additions and subtractions, one per nonzero coefficient and word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongPolynomial5 {
    // groups of 5 coefficients
    coeffs: Vec<i64>,
    num_coeffs: usize,
}

impl LongPolynomial5 {
    /// Packs an [`IntegerPolynomial`]; coefficients must lie in `[0, 2048)`.
    pub fn from_integer_poly(p: &IntegerPolynomial) -> Self {
        let num_coeffs = p.coeffs.len();
        let mut coeffs = vec![0i64; (num_coeffs + 4) / 5];
        let mut c_idx = 0;
        let mut shift = 0;
        for &c in &p.coeffs {
            coeffs[c_idx] |= c << shift;
            shift += 12;
            if shift >= 60 {
                shift = 0;
                c_idx += 1;
            }
        }
        LongPolynomial5 { coeffs, num_coeffs }
    }

    /// Multiplies by a ternary polynomial, taking the indices mod N and the
    /// values mod 2048.
    pub fn multiply(&self, poly2: &DenseTernaryPolynomial) -> LongPolynomial5 {
        // prod[m] accumulates the partial products whose lane offset is m
        let prod_len = self.coeffs.len() + (poly2.size() + 4) / 5 - 1;
        let mut prod = vec![vec![0i64; prod_len]; 5];

        for &p_idx in &poly2.ones() {
            let c_idx = p_idx / 5;
            let m = p_idx - c_idx * 5;
            for (i, &c) in self.coeffs.iter().enumerate() {
                prod[m][c_idx + i] = (prod[m][c_idx + i] + c) & LANE_MASK;
            }
        }
        for &p_idx in &poly2.neg_ones() {
            let c_idx = p_idx / 5;
            let m = p_idx - c_idx * 5;
            for (i, &c) in self.coeffs.iter().enumerate() {
                prod[m][c_idx + i] = (BORROW_GUARD + prod[m][c_idx + i] - c) & LANE_MASK;
            }
        }

        // combine the 5 lane-shifted accumulators into one array, one word
        // longer to catch the overflow lanes
        let mut c_coeffs = vec![0i64; prod_len + 1];
        for (m, row) in prod.iter().enumerate() {
            let shift = 12 * m;
            let shift60 = 60 - shift;
            let mask = (1i64 << shift60) - 1;
            for (i, &w) in row.iter().enumerate() {
                let upper = w >> shift60;
                let lower = w & mask;

                c_coeffs[i] = (c_coeffs[i] + (lower << shift)) & LANE_MASK;
                c_coeffs[i + 1] = (c_coeffs[i + 1] + upper) & LANE_MASK;
            }
        }

        // reduce the indices of c_coeffs modulo num_coeffs
        let num_coeffs = self.num_coeffs;
        let shift = 12 * (num_coeffs % 5);
        for c_idx in self.coeffs.len()..c_coeffs.len() {
            // the coefficient group to fold into the lower-order words
            let (i_coeff, new_idx) = if c_idx == c_coeffs.len() - 1 {
                // words above the top one only hold overflows of the top one
                let i_coeff = if num_coeffs == 5 {
                    0
                } else {
                    c_coeffs[c_idx] >> shift
                };
                (i_coeff, 0usize)
            } else {
                (c_coeffs[c_idx], c_idx * 5 - num_coeffs)
            };

            let base = new_idx / 5;
            let m = new_idx - base * 5;
            let lower = i_coeff << (12 * m);
            let upper = i_coeff >> (12 * (5 - m));
            c_coeffs[base] = (c_coeffs[base] + lower) & LANE_MASK;
            let base1 = base + 1;
            if base1 < self.coeffs.len() {
                c_coeffs[base1] = (c_coeffs[base1] + upper) & LANE_MASK;
            }
        }

        LongPolynomial5 {
            coeffs: c_coeffs,
            num_coeffs,
        }
    }

    pub fn to_integer_polynomial(&self) -> IntegerPolynomial {
        let mut int_coeffs = vec![0i64; self.num_coeffs];
        let mut c_idx = 0;
        let mut shift = 0;
        for ic in int_coeffs.iter_mut() {
            *ic = (self.coeffs[c_idx] >> shift) & 2047;
            shift += 12;
            if shift >= 60 {
                shift = 0;
                c_idx += 1;
            }
        }
        IntegerPolynomial::from_coeffs(int_coeffs)
    }
}
