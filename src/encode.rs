//! Bit-exact conversions between coefficient arrays and compact byte buffers.
//!
//! Three encodings are provided:
//!
//! - mod-q packing: each coefficient in `[0, q)` takes exactly `log2(q)` bits,
//!   packed LSB-first with no gaps (q must be a power of two),
//! - "sves" ternary packing: the IEEE P1363.1 table mapping two trits to
//!   three bits,
//! - "tight" ternary packing: the coefficients as base-3 digits of a single
//!   big integer, serialized to a fixed number of big-endian bytes.

use num_bigint::{BigUint, Sign};
use num_integer::Integer;
use num_traits::Zero;

use crate::error::{NtruError, Result};

/// Bit-string-to-trit-pair table from P1363.1: three bits index two
/// ternary coefficients.
const COEFF1_TABLE: [i64; 8] = [0, 0, 0, 1, 1, 1, -1, -1];
const COEFF2_TABLE: [i64; 8] = [0, 1, -1, 0, 1, -1, 0, 1];
/// Trit-pair-to-bit-string table from P1363.1, indexed by
/// `(coeff1+1)*3 + (coeff2+1)`. The index 0 entry (both coefficients -1)
/// is unencodable.
const BIT1_TABLE: [u8; 9] = [1, 1, 1, 0, 0, 0, 1, 0, 1];
const BIT2_TABLE: [u8; 9] = [1, 1, 1, 1, 0, 0, 0, 1, 0];
const BIT3_TABLE: [u8; 9] = [1, 0, 1, 0, 0, 1, 1, 1, 0];

/// Takes `len` bytes off the front of `input`, failing if not enough remain.
pub fn read_exact<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(NtruError::MalformedEncoding("not enough bytes to read"));
    }
    let (head, tail) = input.split_at(len);
    *input = tail;
    Ok(head)
}

/// Number of bits per coefficient for a power-of-two modulus
fn bits_per_coeff(q: i64) -> usize {
    63 - (q as u64).leading_zeros() as usize
}

/// Encoded size in bytes of `n` mod-`q` coefficients
pub fn mod_q_len(n: usize, q: i64) -> usize {
    (n * bits_per_coeff(q) + 7) / 8
}

/// Encodes coefficients in `[0, q)` to a byte array leaving no gaps between
/// bits. `q` must be a power of two.
pub fn encode_mod_q(coeffs: &[i64], q: i64) -> Vec<u8> {
    let bits = bits_per_coeff(q);
    let mut data = vec![0u8; mod_q_len(coeffs.len(), q)];
    let mut bit_index = 0;
    for &c in coeffs {
        for j in 0..bits {
            let bit = ((c >> j) & 1) as u8;
            data[bit_index / 8] |= bit << (bit_index % 8);
            bit_index += 1;
        }
    }
    data
}

/// Decodes a byte array produced by [`encode_mod_q`] back to `n` coefficients
/// in `[0, q)`. Ignores any excess bytes.
pub fn decode_mod_q(data: &[u8], n: usize, q: i64) -> Result<Vec<i64>> {
    let bits = bits_per_coeff(q);
    let num_bits = n * bits;
    if data.len() * 8 < num_bits {
        return Err(NtruError::MalformedEncoding("mod-q input too short"));
    }
    let mut coeffs = vec![0i64; n];
    for bit_index in 0..num_bits {
        let bit = (data[bit_index / 8] >> (bit_index % 8)) & 1;
        coeffs[bit_index / bits] += (bit as i64) << (bit_index % bits);
    }
    Ok(coeffs)
}

/// Encodes ternary coefficients two at a time using the P1363.1 two-trit
/// to three-bit table (section 9.2.3). Adjacent pairs where both
/// coefficients equal -1 have no encoding; such input is rejected. If the
/// number of coefficients is odd, the last one is dropped.
pub fn encode_mod3_sves(coeffs: &[i64]) -> Result<Vec<u8>> {
    let num_bits = (coeffs.len() * 3 + 1) / 2;
    let mut data = vec![0u8; (num_bits + 7) / 8];
    let mut bit_index = 0;
    for pair in coeffs.chunks_exact(2) {
        let coeff1 = pair[0] + 1;
        let coeff2 = pair[1] + 1;
        if coeff1 == 0 && coeff2 == 0 {
            return Err(NtruError::InvalidEncoding(
                "adjacent -1 pair is not sves-encodable",
            ));
        }
        let idx = (coeff1 * 3 + coeff2) as usize;
        for bit in [BIT1_TABLE[idx], BIT2_TABLE[idx], BIT3_TABLE[idx]] {
            data[bit_index / 8] |= bit << (bit_index % 8);
            bit_index += 1;
        }
    }
    Ok(data)
}

/// Decodes a byte array produced by [`encode_mod3_sves`] back to `n`
/// ternary coefficients (P1363.1 section 9.2.2). Ignores any excess bytes.
pub fn decode_mod3_sves(data: &[u8], n: usize) -> Result<Vec<i64>> {
    if data.len() * 8 < n / 2 * 3 {
        return Err(NtruError::MalformedEncoding("sves input too short"));
    }
    let mut coeffs = vec![0i64; n];
    let mut coeff_index = 0;
    let mut bit_index = 0;
    while coeff_index + 1 < n {
        let mut table_index = 0usize;
        for _ in 0..3 {
            let bit = (data[bit_index / 8] >> (bit_index % 8)) & 1;
            table_index = table_index * 2 + bit as usize;
            bit_index += 1;
        }
        coeffs[coeff_index] = COEFF1_TABLE[table_index];
        coeffs[coeff_index + 1] = COEFF2_TABLE[table_index];
        coeff_index += 2;
    }
    Ok(coeffs)
}

/// Encoded size in bytes of `n` tight-packed ternary coefficients:
/// `ceil(bitlen(3^n) / 8)`.
pub fn mod3_tight_len(n: usize) -> usize {
    (BigUint::from(3u32).pow(n as u32).bits() as usize + 7) / 8
}

/// Encodes ternary coefficients as base-3 digits (shifted to `{0,1,2}`,
/// index 0 least significant) of one big integer, serialized big-endian and
/// zero-padded to exactly [`mod3_tight_len`] bytes.
pub fn encode_mod3_tight(coeffs: &[i64]) -> Vec<u8> {
    let mut sum = BigUint::zero();
    for &c in coeffs.iter().rev() {
        sum = sum * 3u32 + BigUint::from((c + 1) as u32);
    }

    let size = mod3_tight_len(coeffs.len());
    let digits = sum.to_bytes_be();
    let mut out = vec![0u8; size];
    out[size - digits.len()..].copy_from_slice(&digits);
    out
}

/// Converts a byte array produced by [`encode_mod3_tight`] back to `n`
/// ternary coefficients by repeated division by 3.
pub fn decode_mod3_tight(data: &[u8], n: usize) -> Result<Vec<i64>> {
    if data.len() < mod3_tight_len(n) {
        return Err(NtruError::MalformedEncoding("tight input too short"));
    }
    let mut sum = num_bigint::BigInt::from_bytes_be(Sign::Plus, data);
    let three = num_bigint::BigInt::from(3);
    let mut coeffs = vec![0i64; n];
    for c in coeffs.iter_mut() {
        let (quot, rem) = sum.div_rem(&three);
        let digit: i64 = (&rem).try_into().expect("remainder fits in i64");
        *c = digit - 1;
        sum = quot;
    }
    Ok(coeffs)
}
