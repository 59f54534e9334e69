//! Majority/threshold aggregation with size-adaptive counting kernels.
//!
//! Per-bit voting across N input vectors is the dominant cost in
//! hypervector workloads. Three counting regimes cover the cardinality
//! range, all bit-identical for the same inputs:
//!
//! - `N < 256`: byte-parallel counting. One 8-bit counter per output bit,
//!   packed eight to a word, so each input byte is accumulated with a
//!   single table-indexed add ([`SPREAD_TABLE`]).
//! - `N < 65536`: generic counting with u16 counters.
//! - larger: generic counting with u32 counters.
//!
//! Counter width only bounds memory and per-add cost; it never changes
//! the output.

use crate::ops::{majority3_into, select_into};
use crate::random::rand_into;
use crate::vector::Bhv;
use crate::{BITS_PER_WORD, VECTOR_BITS, VECTOR_WORDS};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Spread increments for byte-parallel counting.
///
/// Bit `b` of a byte value becomes a 1 in byte-lane `b` of the 64-bit
/// increment: `spread(v) = sum over set bits b of v: 1 << (8*b)`. Adding
/// `SPREAD_TABLE[byte]` to a counter word bumps eight packed lane
/// counters at once. Lane order is little-endian: the counter for bit
/// `c*8 + b` of a vector word sits in byte-lane `b` of counter word
/// `8*w + c`.
pub const SPREAD_TABLE: [u64; 256] = build_spread_table();

const fn spread(value: u8) -> u64 {
    let mut result = 0u64;
    let mut bit = 0;
    while bit < 8 {
        if (value >> bit) & 1 == 1 {
            result += 1 << (bit * 8);
        }
        bit += 1;
    }
    result
}

const fn build_spread_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut value = 0;
    while value < 256 {
        table[value] = spread(value as u8);
        value += 1;
    }
    table
}

/// Byte-parallel threshold counting. Requires `xs.len() < 256` so no
/// 8-bit lane can overflow.
fn threshold_into_counting_u8(xs: &[Bhv], count: u8, dst: &mut Bhv) {
    debug_assert!(xs.len() < 256);
    let mut totals = [0u64; VECTOR_BITS / 8];

    for x in xs {
        for (word_id, &word) in x.as_words().iter().enumerate() {
            let mut w = word;
            for chunk in 0..8 {
                totals[word_id * 8 + chunk] += SPREAD_TABLE[(w & 0xFF) as usize];
                w >>= 8;
            }
        }
    }

    let dst_words = dst.as_words_mut();
    for word_id in 0..VECTOR_WORDS {
        let mut word = 0u64;
        for chunk in 0..8 {
            let lanes = totals[word_id * 8 + chunk];
            for b in 0..8 {
                let total = (lanes >> (8 * b)) & 0xFF;
                if (count as u64) < total {
                    word |= 1u64 << (chunk * 8 + b);
                }
            }
        }
        dst_words[word_id] = word;
    }
}

/// Generic threshold counting with a caller-chosen counter width.
///
/// The width must be wide enough to hold `xs.len()`; the dispatch in
/// [`threshold_into`] guarantees that.
fn threshold_into_counting_generic<N>(xs: &[Bhv], count: u32, dst: &mut Bhv)
where
    N: Copy + Default + std::ops::AddAssign + From<u8> + Into<u32>,
{
    let mut totals = vec![N::default(); VECTOR_BITS];

    for x in xs {
        for (word_id, &word) in x.as_words().iter().enumerate() {
            let offset = word_id * BITS_PER_WORD;
            for bit_id in 0..BITS_PER_WORD {
                totals[offset + bit_id] += N::from(((word >> bit_id) & 1) as u8);
            }
        }
    }

    let dst_words = dst.as_words_mut();
    for word_id in 0..VECTOR_WORDS {
        let offset = word_id * BITS_PER_WORD;
        let mut word = 0u64;
        for bit_id in 0..BITS_PER_WORD {
            if count < totals[offset + bit_id].into() {
                word |= 1u64 << bit_id;
            }
        }
        dst_words[word_id] = word;
    }
}

/// `dst` bit set iff strictly more than `count` of the inputs set it.
///
/// `xs.is_empty()` yields a uniform random vector (no information to
/// aggregate); `count >= xs.len()` yields zeros. The counting regime is
/// picked by cardinality alone and never changes the output.
pub fn threshold_into<R: Rng>(rng: &mut R, xs: &[Bhv], count: usize, dst: &mut Bhv) {
    let n = xs.len();
    if n == 0 {
        rand_into(rng, dst);
    } else if count >= n {
        *dst = Bhv::zeros();
    } else if n <= u8::MAX as usize {
        threshold_into_counting_u8(xs, count as u8, dst);
    } else if n <= u16::MAX as usize {
        threshold_into_counting_generic::<u16>(xs, count as u32, dst);
    } else {
        threshold_into_counting_generic::<u32>(xs, count as u32, dst);
    }
}

/// Allocating form of [`threshold_into`].
pub fn threshold<R: Rng>(rng: &mut R, xs: &[Bhv], count: usize) -> Bhv {
    let mut dst = Bhv::zeros();
    threshold_into(rng, xs, count, &mut dst);
    dst
}

/// Per-bit majority vote: `dst` bit set iff more than half the inputs set it.
///
/// Small cardinalities shortcut: zero inputs yield uniform random, one a
/// copy, three the boolean majority formula. Two inputs resolve tie bits
/// by a per-bit coin flip, which is why `majority` of two differs from
/// `threshold(xs, 1)` (exact AND) exactly on the tie bits.
pub fn majority_into<R: Rng>(rng: &mut R, xs: &[Bhv], dst: &mut Bhv) {
    match xs {
        [] => rand_into(rng, dst),
        [x] => dst.clone_from(x),
        [x, y] => {
            let cond = Bhv::random(rng);
            select_into(&cond, x, y, dst);
        }
        [x, y, z] => majority3_into(x, y, z, dst),
        _ => threshold_into(rng, xs, xs.len() / 2, dst),
    }
}

/// Allocating form of [`majority_into`].
pub fn majority<R: Rng>(rng: &mut R, xs: &[Bhv]) -> Bhv {
    let mut dst = Bhv::zeros();
    majority_into(rng, xs, &mut dst);
    dst
}

/// Each output bit is copied from one uniformly chosen input vector,
/// re-chosen independently per bit position.
pub fn representative_into<R: Rng>(rng: &mut R, xs: &[Bhv], dst: &mut Bhv) {
    match xs {
        [] => rand_into(rng, dst),
        [x] => dst.clone_from(x),
        [x, y] => {
            let cond = Bhv::random(rng);
            select_into(&cond, x, y, dst);
        }
        _ => {
            let pick = Uniform::from(0..xs.len());
            let dst_words = dst.as_words_mut();
            for (word_id, dst_word) in dst_words.iter_mut().enumerate() {
                let mut word = 0u64;
                for bit_id in 0..BITS_PER_WORD {
                    let x = &xs[pick.sample(rng)];
                    word |= ((x.as_words()[word_id] >> bit_id) & 1) << bit_id;
                }
                *dst_word = word;
            }
        }
    }
}

/// Allocating form of [`representative_into`].
pub fn representative<R: Rng>(rng: &mut R, xs: &[Bhv]) -> Bhv {
    let mut dst = Bhv::zeros();
    representative_into(rng, xs, &mut dst);
    dst
}

/// Words handled per rayon task.
#[cfg(feature = "parallel")]
const PAR_WORD_CHUNK: usize = 16;

/// Parallel threshold counting over disjoint word ranges.
///
/// Each worker counts its own word slice across all inputs and writes its
/// own destination words; output is bit-identical to [`threshold_into`].
/// Requires at least one input (the empty case needs an RNG and stays on
/// the serial path).
#[cfg(feature = "parallel")]
pub fn threshold_par_into(xs: &[Bhv], count: usize, dst: &mut Bhv) {
    use rayon::prelude::*;

    assert!(!xs.is_empty(), "parallel threshold requires at least one input");
    if count >= xs.len() {
        *dst = Bhv::zeros();
        return;
    }

    let count = count as u32;
    dst.as_words_mut()
        .par_chunks_mut(PAR_WORD_CHUNK)
        .enumerate()
        .for_each(|(chunk_id, dst_words)| {
            let base = chunk_id * PAR_WORD_CHUNK;
            let mut totals = vec![0u32; dst_words.len() * BITS_PER_WORD];

            for x in xs {
                let words = &x.as_words()[base..base + dst_words.len()];
                for (i, &word) in words.iter().enumerate() {
                    let offset = i * BITS_PER_WORD;
                    for bit_id in 0..BITS_PER_WORD {
                        totals[offset + bit_id] += ((word >> bit_id) & 1) as u32;
                    }
                }
            }

            for (i, dst_word) in dst_words.iter_mut().enumerate() {
                let offset = i * BITS_PER_WORD;
                let mut word = 0u64;
                for bit_id in 0..BITS_PER_WORD {
                    if count < totals[offset + bit_id] {
                        word |= 1u64 << bit_id;
                    }
                }
                *dst_word = word;
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_inputs(n: usize, seed: u64) -> Vec<Bhv> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| Bhv::random(&mut rng)).collect()
    }

    fn bit_count(xs: &[Bhv], bit: usize) -> usize {
        xs.iter().filter(|x| x.get_bit(bit)).count()
    }

    #[test]
    fn test_spread_table_rule() {
        assert_eq!(SPREAD_TABLE[0], 0);
        assert_eq!(SPREAD_TABLE[1], 1);
        assert_eq!(SPREAD_TABLE[2], 1 << 8);
        assert_eq!(SPREAD_TABLE[0xFF], 0x0101_0101_0101_0101);
        for value in 0..256usize {
            let mut expected = 0u64;
            for bit in 0..8 {
                if (value >> bit) & 1 == 1 {
                    expected += 1u64 << (bit * 8);
                }
            }
            assert_eq!(SPREAD_TABLE[value], expected, "value {value}");
        }
    }

    #[test]
    fn test_threshold_against_per_bit_oracle() {
        let xs = random_inputs(9, 20);
        let mut rng = StdRng::seed_from_u64(21);
        for count in [0, 3, 4, 8] {
            let out = threshold(&mut rng, &xs, count);
            for bit in 0..VECTOR_BITS {
                assert_eq!(
                    out.get_bit(bit),
                    bit_count(&xs, bit) > count,
                    "count {count} bit {bit}"
                );
            }
        }
    }

    #[test]
    fn test_cross_regime_agreement() {
        // The same inputs through the byte-parallel and both generic
        // kernels must agree on every bit.
        let xs = random_inputs(41, 22);
        for count in [10, 20, 31] {
            let mut byte = Bhv::zeros();
            let mut wide16 = Bhv::zeros();
            let mut wide32 = Bhv::zeros();
            threshold_into_counting_u8(&xs, count as u8, &mut byte);
            threshold_into_counting_generic::<u16>(&xs, count, &mut wide16);
            threshold_into_counting_generic::<u32>(&xs, count, &mut wide32);
            assert_eq!(byte, wide16, "count {count}");
            assert_eq!(byte, wide32, "count {count}");
        }
    }

    #[test]
    fn test_cross_regime_agreement_via_padding() {
        // Zero vectors never push a bit over the threshold, so padding
        // past 256 inputs flips the public dispatch to the u16 kernel
        // without changing the answer.
        let xs = random_inputs(200, 23);
        let mut padded = xs.clone();
        padded.resize(300, Bhv::zeros());

        let mut rng = StdRng::seed_from_u64(24);
        let a = threshold(&mut rng, &xs, 77);
        let b = threshold(&mut rng, &padded, 77);
        assert_eq!(a, b);
    }

    #[test]
    fn test_threshold_degenerate_cases() {
        let xs = random_inputs(5, 25);
        let mut rng = StdRng::seed_from_u64(26);

        // count >= N can never be exceeded
        assert_eq!(threshold(&mut rng, &xs, 5), Bhv::zeros());
        assert_eq!(threshold(&mut rng, &xs, 9), Bhv::zeros());
        // count 0 is the per-bit OR
        let or = xs.iter().fold(Bhv::zeros(), |acc, x| &acc | x);
        assert_eq!(threshold(&mut rng, &xs, 0), or);
    }

    #[test]
    fn test_majority_small_cardinalities() {
        let mut rng = StdRng::seed_from_u64(27);
        let xs = random_inputs(3, 28);

        // N == 1: copy
        assert_eq!(majority(&mut rng, &xs[..1]), xs[0]);

        // N == 2: agreeing bits pass through, tie bits come from one side
        let out = majority(&mut rng, &xs[..2]);
        for bit in 0..VECTOR_BITS {
            let (a, b) = (xs[0].get_bit(bit), xs[1].get_bit(bit));
            if a == b {
                assert_eq!(out.get_bit(bit), a, "bit {bit}");
            }
        }

        // N == 3: boolean majority formula
        let out3 = majority(&mut rng, &xs);
        let mut expected = Bhv::zeros();
        crate::ops::majority3_into_scalar(&xs[0], &xs[1], &xs[2], &mut expected);
        assert_eq!(out3, expected);
    }

    #[test]
    fn test_majority_matches_threshold_for_larger_n() {
        let mut rng = StdRng::seed_from_u64(29);
        for n in [4, 5, 8, 17] {
            let xs = random_inputs(n, 30 + n as u64);
            let maj = majority(&mut rng, &xs);
            let thr = threshold(&mut rng, &xs, n / 2);
            assert_eq!(maj, thr, "n {n}");
        }
    }

    #[test]
    fn test_representative_bits_come_from_inputs() {
        let mut rng = StdRng::seed_from_u64(31);
        let xs = random_inputs(6, 32);
        let out = representative(&mut rng, &xs);
        for bit in 0..VECTOR_BITS {
            let any = xs.iter().any(|x| x.get_bit(bit) == out.get_bit(bit));
            assert!(any, "bit {bit} matches no input");
        }

        // All-identical inputs force the output
        let same = vec![xs[0].clone(); 6];
        assert_eq!(representative(&mut rng, &same), xs[0]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let xs = random_inputs(50, 33);
        let mut rng = StdRng::seed_from_u64(34);
        for count in [0, 12, 25, 49] {
            let serial = threshold(&mut rng, &xs, count);
            let mut par = Bhv::zeros();
            threshold_par_into(&xs, count, &mut par);
            assert_eq!(serial, par, "count {count}");
        }
    }
}
