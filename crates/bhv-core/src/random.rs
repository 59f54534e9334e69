//! Random hypervector generation.
//!
//! Uniform generation draws one PRNG word per vector word. Biased
//! generation uses a chunked batch algorithm: the probability is encoded
//! as a base-256 fraction and each output bit is resolved by comparing
//! random bytes against the fraction digits, 64 bits per round. Any
//! [`rand::Rng`] works; `rand_pcg::Pcg64Mcg` is the fast choice for bulk
//! generation, seeded `StdRng` the reproducible one.

use crate::vector::Bhv;
use crate::BITS_PER_WORD;
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

/// Fraction digits used by [`random_into`].
///
/// Each chunk refines the bias by 8 bits, consuming up to 8 bits of
/// entropy per output bit (far less on average; a lane survives a round
/// only on an exact byte tie). Six chunks bound the bias error by
/// `2^-48`, already past what an `f64` probability can express reliably.
pub const DEFAULT_CHUNKS: usize = 6;

/// Fill `dst` with uniform random bits.
pub fn rand_into<R: Rng>(rng: &mut R, dst: &mut Bhv) {
    for word in dst.as_words_mut().iter_mut() {
        *word = rng.gen();
    }
}

/// Allocate a uniform random vector.
pub fn rand<R: Rng>(rng: &mut R) -> Bhv {
    Bhv::random(rng)
}

/// Fill `dst` with bits independently set with probability `p`.
///
/// `p` outside `[0, 1]` is a programmer error and panics. Degenerate
/// probabilities short-circuit: `0` and `1` to constants, `0.5` to raw
/// uniform words. Everything else goes through the chunked batch
/// algorithm with [`DEFAULT_CHUNKS`] digits.
pub fn random_into<R: Rng>(rng: &mut R, p: f64, dst: &mut Bhv) {
    assert!(
        p.is_finite() && (0.0..=1.0).contains(&p),
        "bit probability must be in [0, 1], got {p}"
    );
    if p <= 0.0 {
        *dst = Bhv::zeros();
    } else if p >= 1.0 {
        *dst = Bhv::ones();
    } else if p == 0.5 {
        rand_into(rng, dst);
    } else {
        random_chunked_into(rng, p, DEFAULT_CHUNKS, dst);
    }
}

/// Allocate a Bernoulli(p) random vector.
pub fn random<R: Rng>(rng: &mut R, p: f64) -> Bhv {
    let mut x = Bhv::zeros();
    random_into(rng, p, &mut x);
    x
}

/// Chunked batch Bernoulli generation.
///
/// `p` is encoded as `num_chunks` base-256 fraction digits. For each
/// 64-bit output word, every round draws 64 random bytes and compares
/// them against the current digit: below means 1, above means 0, a tie
/// sends the lane to the next digit. Lanes still tied after the last
/// digit emit 0, truncating the bias toward 0 by at most
/// `2^(-8 * num_chunks)`.
pub fn random_chunked_into<R: Rng>(rng: &mut R, p: f64, num_chunks: usize, dst: &mut Bhv) {
    assert!(num_chunks >= 1, "at least one fraction digit is required");
    let mut chunks = vec![0u8; num_chunks];
    probability_chunks(p, &mut chunks);

    let mut buf = [0u8; BITS_PER_WORD];
    for word in dst.as_words_mut().iter_mut() {
        let mut decided = 0u64;
        let mut value = 0u64;
        for &chunk in &chunks {
            rng.fill_bytes(&mut buf);
            for (bit, &r) in buf.iter().enumerate() {
                let lane = 1u64 << bit;
                if decided & lane != 0 {
                    continue;
                }
                if r < chunk {
                    value |= lane;
                    decided |= lane;
                } else if r > chunk {
                    decided |= lane;
                }
            }
            // All 64 lanes resolve in the first round ~78% of the time.
            if decided == u64::MAX {
                break;
            }
        }
        *word = value;
    }
}

/// Per-bit reference algorithm: one Bernoulli draw per output bit.
///
/// Statistically equivalent to [`random_chunked_into`]; kept as the
/// oracle the batch path is tested against.
pub fn random_reference_into<R: Rng>(rng: &mut R, p: f64, dst: &mut Bhv) {
    assert!(
        p.is_finite() && (0.0..=1.0).contains(&p),
        "bit probability must be in [0, 1], got {p}"
    );
    let gen = Bernoulli::new(p).expect("probability already validated");
    for word in dst.as_words_mut().iter_mut() {
        let mut w = 0u64;
        for bit_id in 0..BITS_PER_WORD {
            if gen.sample(rng) {
                w |= 1u64 << bit_id;
            }
        }
        *word = w;
    }
}

/// Expand `p` into base-256 fraction digits: `p ~= sum(chunks[i] / 256^(i+1))`.
fn probability_chunks(p: f64, chunks: &mut [u8]) {
    let mut x = p;
    for chunk in chunks.iter_mut() {
        *chunk = 0;
        for bit in (0..8).rev() {
            x *= 2.0;
            if x >= 1.0 {
                *chunk |= 1 << bit;
                x -= 1.0;
            }
        }
    }
}
