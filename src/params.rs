//! Parameter sets for NTRUEncrypt.
//!
//! A parameter set fixes the ring dimension `N`, the big modulus `q`, the
//! weights of the private polynomials, and the knobs of the index generation
//! function. Several predefined sets are provided and new ones can be created
//! as well.

use serde::{Deserialize, Serialize};

use crate::error::{NtruError, Result};

/// Shape of the private polynomial `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TernaryPolyType {
    /// A single ternary polynomial of weight `df`.
    Simple,
    /// A product `f1*f2+f3` of three low-weight sparse ternary polynomials.
    Product,
}

/// Hash function driving the index generation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Digest output size in bytes
    pub fn digest_size(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    /// Algorithm name as written to the parameter stream
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    fn from_name(name: &str) -> Result<Self> {
        match name {
            "SHA-256" => Ok(DigestAlgorithm::Sha256),
            "SHA-512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(NtruError::InvalidParameters("unknown digest algorithm")),
        }
    }
}

/// A set of parameters for NTRUEncrypt key generation and the raw
/// encrypt/decrypt polynomial operations.
///
/// Immutable once constructed; the derived fields (`dr*`, `dg`,
/// `max_msg_len_bytes`, ...) are computed by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionParameters {
    /// Number of polynomial coefficients
    pub n: usize,
    /// The big modulus, a power of two
    pub q: i64,
    /// Number of ones in the private polynomial `f` (simple form)
    pub df: usize,
    /// Number of ones in `f1` (product form)
    pub df1: usize,
    /// Number of ones in `f2` (product form)
    pub df2: usize,
    /// Number of ones in `f3` (product form)
    pub df3: usize,
    /// Weight of the blinding polynomial `r` (simple form)
    pub dr: usize,
    /// Weight of `r1` (product form)
    pub dr1: usize,
    /// Weight of `r2` (product form)
    pub dr2: usize,
    /// Weight of `r3` (product form)
    pub dr3: usize,
    /// Number of ones in the random polynomial `g`
    pub dg: usize,
    /// Number of random bits to prepend to the message
    pub db: usize,
    /// Minimum acceptable number of -1's, 0's and 1's in the message
    /// polynomial in the last encryption step
    pub dm0: usize,
    /// Bits drawn per candidate by the index generation function
    pub c: usize,
    /// Minimum number of hash calls for the IGF to make
    pub min_calls_r: usize,
    /// Minimum number of hash calls to generate the masking polynomial
    pub min_calls_mask: usize,
    /// Whether to hash the seed in the MGF first or use it directly
    pub hash_seed: bool,
    /// Three bytes that uniquely identify the parameter set
    pub oid: [u8; 3],
    /// Whether ternary polynomials are treated as sparse or dense
    pub sparse: bool,
    /// Whether `f = 1 + 3F` (trivially invertible mod 3) or `f` is ternary
    pub fast_fp: bool,
    /// Simple or product-form private keys
    pub poly_type: TernaryPolyType,
    /// Hash algorithm for the index generation function
    pub digest: DigestAlgorithm,

    // derived
    /// Maximum plaintext length in bytes
    pub max_msg_len_bytes: usize,
    /// Length of the encoding buffer in bits
    pub buffer_len_bits: usize,
    /// Length of the encoding buffer in trits
    pub buffer_len_trits: usize,
    /// Public key blinding length
    pub pk_len: usize,
}

/// ceil(log2(max_msg_len_bytes)) in the reference parameter sets
const LLEN: usize = 1;

impl EncryptionParameters {
    /// Constructs a parameter set that uses a single ternary private key
    /// polynomial (`poly_type = Simple`).
    #[allow(clippy::too_many_arguments)]
    pub fn new_simple(
        n: usize,
        q: i64,
        df: usize,
        dm0: usize,
        db: usize,
        c: usize,
        min_calls_r: usize,
        min_calls_mask: usize,
        hash_seed: bool,
        oid: [u8; 3],
        sparse: bool,
        fast_fp: bool,
        digest: DigestAlgorithm,
    ) -> Self {
        let mut params = EncryptionParameters {
            n,
            q,
            df,
            df1: 0,
            df2: 0,
            df3: 0,
            dr: 0,
            dr1: 0,
            dr2: 0,
            dr3: 0,
            dg: 0,
            db,
            dm0,
            c,
            min_calls_r,
            min_calls_mask,
            hash_seed,
            oid,
            sparse,
            fast_fp,
            poly_type: TernaryPolyType::Simple,
            digest,
            max_msg_len_bytes: 0,
            buffer_len_bits: 0,
            buffer_len_trits: 0,
            pk_len: 0,
        };
        params.init();
        params
    }

    /// Constructs a parameter set that uses product-form private keys
    /// (`poly_type = Product`).
    #[allow(clippy::too_many_arguments)]
    pub fn new_product(
        n: usize,
        q: i64,
        df1: usize,
        df2: usize,
        df3: usize,
        dm0: usize,
        db: usize,
        c: usize,
        min_calls_r: usize,
        min_calls_mask: usize,
        hash_seed: bool,
        oid: [u8; 3],
        sparse: bool,
        fast_fp: bool,
        digest: DigestAlgorithm,
    ) -> Self {
        let mut params = EncryptionParameters {
            n,
            q,
            df: 0,
            df1,
            df2,
            df3,
            dr: 0,
            dr1: 0,
            dr2: 0,
            dr3: 0,
            dg: 0,
            db,
            dm0,
            c,
            min_calls_r,
            min_calls_mask,
            hash_seed,
            oid,
            sparse,
            fast_fp,
            poly_type: TernaryPolyType::Product,
            digest,
            max_msg_len_bytes: 0,
            buffer_len_bits: 0,
            buffer_len_trits: 0,
            pk_len: 0,
        };
        params.init();
        params
    }

    fn init(&mut self) {
        self.dr = self.df;
        self.dr1 = self.df1;
        self.dr2 = self.df2;
        self.dr3 = self.df3;
        self.dg = self.n / 3;
        self.max_msg_len_bytes = self.n * 3 / 2 / 8 - LLEN - self.db / 8 - 1;
        self.buffer_len_bits = (self.n * 3 / 2 + 7) / 8 * 8 + 1;
        self.buffer_len_trits = self.n - 1;
        self.pk_len = self.db;
    }

    /// A conservative parameter set that gives 256 bits of security and is
    /// optimized for key size.
    pub fn ees1087ep2() -> Self {
        Self::new_simple(
            1087,
            2048,
            120,
            120,
            256,
            13,
            25,
            14,
            true,
            [0, 6, 3],
            true,
            false,
            DigestAlgorithm::Sha512,
        )
    }

    /// A conservative parameter set that gives 256 bits of security and is
    /// a tradeoff between key size and encryption/decryption speed.
    pub fn ees1171ep1() -> Self {
        Self::new_simple(
            1171,
            2048,
            106,
            106,
            256,
            13,
            20,
            15,
            true,
            [0, 6, 4],
            true,
            false,
            DigestAlgorithm::Sha512,
        )
    }

    /// A conservative parameter set that gives 256 bits of security and is
    /// optimized for encryption/decryption speed.
    pub fn ees1499ep1() -> Self {
        Self::new_simple(
            1499,
            2048,
            79,
            79,
            256,
            13,
            17,
            19,
            true,
            [0, 6, 5],
            true,
            false,
            DigestAlgorithm::Sha512,
        )
    }

    /// A parameter set that gives 128 bits of security, from the 2011
    /// Hirschhorn-Hoffstein-Howgrave-Graham-Whyte paper.
    pub fn apr2011_439() -> Self {
        Self::new_simple(
            439,
            2048,
            146,
            130,
            128,
            9,
            32,
            9,
            true,
            [0, 7, 101],
            true,
            false,
            DigestAlgorithm::Sha512,
        )
    }

    /// Like [`apr2011_439`](Self::apr2011_439) but uses product-form
    /// polynomials and `f = 1 + 3F`.
    pub fn apr2011_439_fast() -> Self {
        Self::new_product(
            439,
            2048,
            9,
            8,
            5,
            130,
            128,
            9,
            32,
            9,
            true,
            [0, 7, 101],
            true,
            true,
            DigestAlgorithm::Sha512,
        )
    }

    /// A parameter set that gives 256 bits of security.
    pub fn apr2011_743() -> Self {
        Self::new_simple(
            743,
            2048,
            248,
            220,
            256,
            10,
            27,
            14,
            true,
            [0, 7, 105],
            false,
            false,
            DigestAlgorithm::Sha512,
        )
    }

    /// Like [`apr2011_743`](Self::apr2011_743) but uses product-form
    /// polynomials and `f = 1 + 3F`.
    pub fn apr2011_743_fast() -> Self {
        Self::new_product(
            743,
            2048,
            11,
            11,
            15,
            220,
            256,
            10,
            27,
            14,
            true,
            [0, 7, 105],
            false,
            true,
            DigestAlgorithm::Sha512,
        )
    }

    /// Check that the parameter set is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(NtruError::InvalidParameters("N must be positive"));
        }
        if self.q < 4 || (self.q & (self.q - 1)) != 0 {
            return Err(NtruError::InvalidParameters("q must be a power of two >= 4"));
        }
        if self.c == 0 || self.c >= 32 {
            return Err(NtruError::InvalidParameters("c must be in 1..32"));
        }
        let weights = match self.poly_type {
            TernaryPolyType::Simple => 2 * self.df,
            TernaryPolyType::Product => 2 * self.df1.max(self.df2).max(self.df3),
        };
        if weights > self.n || 2 * self.dg > self.n {
            return Err(NtruError::InvalidParameters("polynomial weights exceed N"));
        }
        Ok(())
    }

    /// Writes the parameter set as the fixed little-endian field sequence:
    /// eleven 32-bit integers, the boolean flags, the 3-byte OID, the
    /// poly-type tag and the length-prefixed digest name.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for v in [
            self.n as i32,
            self.q as i32,
            self.df as i32,
            self.df1 as i32,
            self.df2 as i32,
            self.df3 as i32,
            self.db as i32,
            self.dm0 as i32,
            self.c as i32,
            self.min_calls_r as i32,
            self.min_calls_mask as i32,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.push(self.hash_seed as u8);
        out.extend_from_slice(&self.oid);
        out.push(self.sparse as u8);
        out.push(self.fast_fp as u8);
        let tag: i32 = match self.poly_type {
            TernaryPolyType::Simple => 0,
            TernaryPolyType::Product => 1,
        };
        out.extend_from_slice(&tag.to_le_bytes());
        let name = self.digest.name().as_bytes();
        out.push(name.len() as u8);
        out.extend_from_slice(name);
    }

    /// Reads a parameter set written by [`write_to`](Self::write_to).
    pub fn read_from(mut input: &[u8]) -> Result<Self> {
        fn read_i32(input: &mut &[u8]) -> Result<i32> {
            let bytes = crate::encode::read_exact(input, 4)?;
            Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        }
        fn read_u8(input: &mut &[u8]) -> Result<u8> {
            Ok(crate::encode::read_exact(input, 1)?[0])
        }

        let n = read_i32(&mut input)? as usize;
        let q = read_i32(&mut input)? as i64;
        let df = read_i32(&mut input)? as usize;
        let df1 = read_i32(&mut input)? as usize;
        let df2 = read_i32(&mut input)? as usize;
        let df3 = read_i32(&mut input)? as usize;
        let db = read_i32(&mut input)? as usize;
        let dm0 = read_i32(&mut input)? as usize;
        let c = read_i32(&mut input)? as usize;
        let min_calls_r = read_i32(&mut input)? as usize;
        let min_calls_mask = read_i32(&mut input)? as usize;
        let hash_seed = read_u8(&mut input)? != 0;
        let oid_bytes = crate::encode::read_exact(&mut input, 3)?;
        let oid = [oid_bytes[0], oid_bytes[1], oid_bytes[2]];
        let sparse = read_u8(&mut input)? != 0;
        let fast_fp = read_u8(&mut input)? != 0;
        let tag = read_i32(&mut input)?;
        let name_len = read_u8(&mut input)? as usize;
        let name_bytes = crate::encode::read_exact(&mut input, name_len)?;
        let name = std::str::from_utf8(name_bytes)
            .map_err(|_| NtruError::MalformedEncoding("digest name is not valid UTF-8"))?;
        let digest = DigestAlgorithm::from_name(name)?;

        let params = match tag {
            0 => Self::new_simple(
                n,
                q,
                df,
                dm0,
                db,
                c,
                min_calls_r,
                min_calls_mask,
                hash_seed,
                oid,
                sparse,
                fast_fp,
                digest,
            ),
            1 => Self::new_product(
                n,
                q,
                df1,
                df2,
                df3,
                dm0,
                db,
                c,
                min_calls_r,
                min_calls_mask,
                hash_seed,
                oid,
                sparse,
                fast_fp,
                digest,
            ),
            _ => return Err(NtruError::MalformedEncoding("unknown polynomial type tag")),
        };
        Ok(params)
    }
}
