//! Deterministic word-level permutation.
//!
//! Permutations act on whole word slots, not individual bits: coarser
//! mixing than a bit permutation but far cheaper to apply, and that
//! tradeoff is part of the contract. The integer seed is the durable
//! artifact; the permutation itself is regenerated on demand.

use crate::vector::Bhv;
use crate::VECTOR_WORDS;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A bijection on the word slots `[0, VECTOR_WORDS)`.
#[derive(Clone, PartialEq, Eq)]
pub struct WordPermutation {
    slots: [usize; VECTOR_WORDS],
}

impl WordPermutation {
    /// The identity permutation.
    pub fn identity() -> Self {
        let mut slots = [0usize; VECTOR_WORDS];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = i;
        }
        Self { slots }
    }

    /// Derive the permutation for a seed. Seed 0 is the identity.
    pub fn from_seed(seed: u64) -> Self {
        let mut perm = Self::identity();
        if seed != 0 {
            let mut rng = Pcg64Mcg::seed_from_u64(seed);
            perm.slots.shuffle(&mut rng);
        }
        perm
    }

    /// `dst[i] = x[perm[i]]`.
    pub fn apply_into(&self, x: &Bhv, dst: &mut Bhv) {
        let words = x.as_words();
        for (i, dst_word) in dst.as_words_mut().iter_mut().enumerate() {
            *dst_word = words[self.slots[i]];
        }
    }

    /// `dst[perm[i]] = x[i]`, undoing [`Self::apply_into`].
    pub fn apply_inverse_into(&self, x: &Bhv, dst: &mut Bhv) {
        let words = x.as_words();
        let dst_words = dst.as_words_mut();
        for (i, &word) in words.iter().enumerate() {
            dst_words[self.slots[i]] = word;
        }
    }
}

impl std::fmt::Debug for WordPermutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WordPermutation({:?}...)", &self.slots[..8])
    }
}

/// Permute the word slots of `x` by the permutation derived from `seed`.
pub fn permute_into(x: &Bhv, seed: u64, dst: &mut Bhv) {
    if seed == 0 {
        dst.clone_from(x);
    } else {
        WordPermutation::from_seed(seed).apply_into(x, dst);
    }
}

/// Allocating form of [`permute_into`].
pub fn permute(x: &Bhv, seed: u64) -> Bhv {
    let mut dst = Bhv::zeros();
    permute_into(x, seed, &mut dst);
    dst
}

/// Undo [`permute_into`] for the same seed.
pub fn inverse_permute_into(x: &Bhv, seed: u64, dst: &mut Bhv) {
    if seed == 0 {
        dst.clone_from(x);
    } else {
        WordPermutation::from_seed(seed).apply_inverse_into(x, dst);
    }
}

/// Allocating form of [`inverse_permute_into`].
pub fn inverse_permute(x: &Bhv, seed: u64) -> Bhv {
    let mut dst = Bhv::zeros();
    inverse_permute_into(x, seed, &mut dst);
    dst
}
