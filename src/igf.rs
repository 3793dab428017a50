//! The Index Generation Function from IEEE P1363.1.

use sha2::{Digest, Sha256, Sha512};
use tracing::debug;

use crate::bitstring::BitString;
use crate::params::{DigestAlgorithm, EncryptionParameters};

/// Deterministically expands a seed into a stream of indices in `[0, N)`.
///
/// The generator hashes `seed || counter` with the parameter set's digest,
/// buffers the output bits, and rejection-samples `c`-bit chunks so the
/// indices come out uniform.
pub struct IndexGenerator {
    seed: Vec<u8>,
    n: usize,
    c: usize,
    min_calls_r: usize,
    tot_len: usize,
    rem_len: usize,
    buf: BitString,
    counter: u32,
    initialized: bool,
    digest: DigestAlgorithm,
    h_len: usize,
}

impl IndexGenerator {
    /// Constructs a new index generator from a seed of arbitrary length.
    pub fn new(seed: &[u8], params: &EncryptionParameters) -> Self {
        IndexGenerator {
            seed: seed.to_vec(),
            n: params.n,
            c: params.c,
            min_calls_r: params.min_calls_r,
            tot_len: 0,
            rem_len: 0,
            buf: BitString::new(),
            counter: 0,
            initialized: false,
            digest: params.digest,
            h_len: params.digest.digest_size(),
        }
    }

    /// Returns a number `i` such that `0 <= i < N`.
    pub fn next_index(&mut self) -> usize {
        if !self.initialized {
            self.buf = BitString::new();
            while (self.counter as usize) < self.min_calls_r {
                let hash = self.hash_seed_counter();
                self.buf.append_bytes(&hash);
                self.counter += 1;
            }
            self.tot_len = self.min_calls_r * 8 * self.h_len;
            self.rem_len = self.tot_len;
            self.initialized = true;
            debug!(calls = self.min_calls_r, bits = self.tot_len, "index generator primed");
        }

        loop {
            self.tot_len += self.c;
            let mut m = self.buf.trailing(self.rem_len);
            if self.rem_len < self.c {
                let mut tmp_len = self.c - self.rem_len;
                let c_threshold =
                    self.counter as usize + (tmp_len + self.h_len - 1) / self.h_len;
                let mut hash = Vec::new();
                while (self.counter as usize) < c_threshold {
                    hash = self.hash_seed_counter();
                    m.append_bytes(&hash);
                    self.counter += 1;
                    if tmp_len > 8 * self.h_len {
                        tmp_len -= 8 * self.h_len;
                    }
                }
                self.rem_len = 8 * self.h_len - tmp_len;
                // the buffer restarts from the most recent hash block
                self.buf = BitString::new();
                self.buf.append_bytes(&hash);
            } else {
                self.rem_len -= self.c;
            }

            // assumes c < 32
            let i = m.leading_as_u32(self.c) as usize;
            if i < (1 << self.c) - ((1 << self.c) % self.n) {
                return i % self.n;
            }
        }
    }

    // hash of seed || counter as a big-endian 32-bit integer
    fn hash_seed_counter(&self) -> Vec<u8> {
        match self.digest {
            DigestAlgorithm::Sha256 => {
                let mut h = Sha256::new();
                h.update(&self.seed);
                h.update(self.counter.to_be_bytes());
                h.finalize().to_vec()
            }
            DigestAlgorithm::Sha512 => {
                let mut h = Sha512::new();
                h.update(&self.seed);
                h.update(self.counter.to_be_bytes());
                h.finalize().to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EncryptionParameters;

    #[test]
    fn test_indices_in_range() {
        let params = EncryptionParameters::apr2011_439();
        let mut gen = IndexGenerator::new(b"some arbitrary seed value", &params);
        for _ in 0..10_000 {
            let i = gen.next_index();
            assert!(i < params.n);
        }
    }

    #[test]
    fn test_deterministic() {
        let params = EncryptionParameters::ees1087ep2();
        let mut gen1 = IndexGenerator::new(b"seed", &params);
        let mut gen2 = IndexGenerator::new(b"seed", &params);
        for _ in 0..1000 {
            assert_eq!(gen1.next_index(), gen2.next_index());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let params = EncryptionParameters::apr2011_743();
        let mut gen1 = IndexGenerator::new(b"seed 1", &params);
        let mut gen2 = IndexGenerator::new(b"seed 2", &params);
        let same = (0..100)
            .filter(|_| gen1.next_index() == gen2.next_index())
            .count();
        assert!(same < 10);
    }

    #[test]
    fn test_uniform_within_tolerance() {
        // with 200 draws expected per index, a correct rejection sampler
        // stays within +-50% of the mean with overwhelming probability,
        // while skipping the rejection step would push the indices below
        // 2^c mod N to roughly twice the mean
        let params = EncryptionParameters::apr2011_439();
        let mut gen = IndexGenerator::new(b"uniformity", &params);
        let mut counts = vec![0usize; params.n];
        let expected = 200;
        for _ in 0..expected * params.n {
            counts[gen.next_index()] += 1;
        }
        for (i, &c) in counts.iter().enumerate() {
            assert!(
                c >= expected / 2 && c <= expected * 3 / 2,
                "index {} drawn {} times, expected about {}",
                i,
                c,
                expected
            );
        }
    }
}
