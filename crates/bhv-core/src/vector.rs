//! Packed hypervector type.
//!
//! 8192-bit vectors stored as 128 u64 words. The dimension is word-aligned,
//! so unlike arbitrary-width bit vectors there is no partial-word masking:
//! every operation reads and writes exactly [`VECTOR_WORDS`] words.

use crate::error::BhvError;
use crate::{VECTOR_BITS, VECTOR_BYTES, VECTOR_WORDS};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Low half of every word set; the canonical "unknown" half pattern.
pub(crate) const HALF_WORD: u64 = u64::MAX >> 32;

/// An 8192-bit boolean hypervector in a compact word representation.
///
/// Bit `i` lives at word `i / 64`, bit-position `i % 64` (LSB-first within
/// a word, little-endian across bytes). This convention is shared by every
/// engine in the crate.
///
/// # Example
/// ```
/// use bhv_core::Bhv;
///
/// let cat = Bhv::from_seed("cat");
/// let dog = Bhv::from_seed("dog");
///
/// // Bind two concepts
/// let bound = cat.bind(&dog);
///
/// // Unbind to recover
/// let recovered = bound.unbind(&cat);
/// assert_eq!(recovered.hamming(&dog), 0);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Bhv {
    /// Internal storage as u64 words for efficient SIMD operations.
    words: [u64; VECTOR_WORDS],
}

impl Bhv {
    /// Create a new all-zero vector.
    #[inline]
    pub fn zeros() -> Self {
        Self {
            words: [0u64; VECTOR_WORDS],
        }
    }

    /// Create a new vector with all bits set to 1.
    #[inline]
    pub fn ones() -> Self {
        Self {
            words: [u64::MAX; VECTOR_WORDS],
        }
    }

    /// Create the canonical half vector: the first half of every word set.
    ///
    /// Used as a "don't-care" pattern; exactly half the bits are active.
    /// [`crate::ops::swap_halves_into`] toggles it against its complement.
    #[inline]
    pub fn half() -> Self {
        Self {
            words: [HALF_WORD; VECTOR_WORDS],
        }
    }

    /// Create a uniform random vector using the given RNG.
    pub fn random<R: rand::Rng>(rng: &mut R) -> Self {
        let mut words = [0u64; VECTOR_WORDS];
        for word in words.iter_mut() {
            *word = rng.gen();
        }
        Self { words }
    }

    /// Create a vector deterministically from a seed string.
    ///
    /// The seed is expanded to the full vector width with the same XOF used
    /// by [`crate::rehash`], under a distinct domain-separation byte.
    pub fn from_seed(seed: &str) -> Self {
        let mut bytes = [0u8; VECTOR_BYTES];
        crate::rehash::xof_fill(seed.as_bytes(), crate::rehash::SEED_DOMAIN, &mut bytes);
        let mut v = Self::zeros();
        v.copy_from_le_bytes(&bytes);
        v
    }

    /// Create a vector from raw little-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BhvError> {
        if bytes.len() != VECTOR_BYTES {
            return Err(BhvError::InvalidSize {
                expected: VECTOR_BYTES,
                actual: bytes.len(),
            });
        }

        let mut v = Self::zeros();
        let mut fixed = [0u8; VECTOR_BYTES];
        fixed.copy_from_slice(bytes);
        v.copy_from_le_bytes(&fixed);
        Ok(v)
    }

    /// Overwrite this vector from a fixed-size little-endian byte buffer.
    pub(crate) fn copy_from_le_bytes(&mut self, bytes: &[u8; VECTOR_BYTES]) {
        for (i, word) in self.words.iter_mut().enumerate() {
            let mut arr = [0u8; 8];
            arr.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            *word = u64::from_le_bytes(arr);
        }
    }

    /// Convert the vector to bytes.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(VECTOR_BYTES);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Get the raw bytes as a slice (zero-copy).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.words.as_ptr() as *const u8, VECTOR_BYTES) }
    }

    /// Borrow the packed words.
    #[inline]
    pub fn as_words(&self) -> &[u64; VECTOR_WORDS] {
        &self.words
    }

    /// Mutably borrow the packed words.
    #[inline]
    pub fn as_words_mut(&mut self) -> &mut [u64; VECTOR_WORDS] {
        &mut self.words
    }

    /// Count the number of set bits (population count).
    #[inline]
    pub fn active(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Calculate the Hamming distance to another vector.
    ///
    /// Returns the number of differing bits (0 to 8192).
    #[inline]
    pub fn hamming(&self, other: &Self) -> u32 {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Calculate similarity score (0.0 to 1.0).
    ///
    /// Returns 1.0 for identical vectors, 0.0 for maximally different.
    #[inline]
    pub fn similarity(&self, other: &Self) -> f64 {
        1.0 - (self.hamming(other) as f64 / VECTOR_BITS as f64)
    }

    /// Bind two vectors together using XOR.
    ///
    /// This creates a composite representation where:
    /// - `bound = a XOR b`
    /// - `a = bound XOR b` (recovers a)
    /// - `b = bound XOR a` (recovers b)
    #[inline]
    pub fn bind(&self, other: &Self) -> Self {
        let mut result = Self::zeros();
        crate::ops::xor_into(self, other, &mut result);
        result
    }

    /// Unbind a vector using XOR (inverse of bind).
    ///
    /// If `bound = a.bind(b)`, then `bound.unbind(a) == b`.
    #[inline]
    pub fn unbind(&self, key: &Self) -> Self {
        // XOR is its own inverse
        self.bind(key)
    }

    /// Check if a specific bit is set.
    #[inline]
    pub fn get_bit(&self, index: usize) -> bool {
        assert!(index < VECTOR_BITS, "bit index {index} out of range");
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Set a specific bit.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < VECTOR_BITS, "bit index {index} out of range");
        let word_idx = index / 64;
        let bit_idx = index % 64;
        if value {
            self.words[word_idx] |= 1u64 << bit_idx;
        } else {
            self.words[word_idx] &= !(1u64 << bit_idx);
        }
    }

    /// Convert to hex string representation.
    pub fn to_hex(&self) -> String {
        self.as_bytes().iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Create from hex string.
    pub fn from_hex(hex: &str) -> Result<Self, BhvError> {
        if hex.len() % 2 != 0 {
            return Err(BhvError::InvalidHex(hex.to_string()));
        }
        let bytes: Result<Vec<u8>, _> = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect();

        match bytes {
            Ok(b) => Self::from_bytes(&b),
            Err(_) => Err(BhvError::InvalidHex(hex.to_string())),
        }
    }
}

impl BitXor for &Bhv {
    type Output = Bhv;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.bind(rhs)
    }
}

impl BitAnd for &Bhv {
    type Output = Bhv;

    fn bitand(self, rhs: Self) -> Self::Output {
        let mut result = Bhv::zeros();
        crate::ops::and_into(self, rhs, &mut result);
        result
    }
}

impl BitOr for &Bhv {
    type Output = Bhv;

    fn bitor(self, rhs: Self) -> Self::Output {
        let mut result = Bhv::zeros();
        crate::ops::or_into(self, rhs, &mut result);
        result
    }
}

impl Not for &Bhv {
    type Output = Bhv;

    fn not(self) -> Self::Output {
        let mut result = Bhv::zeros();
        crate::ops::not_into(self, &mut result);
        result
    }
}

impl BitXorAssign<&Bhv> for Bhv {
    fn bitxor_assign(&mut self, rhs: &Bhv) {
        for (w, r) in self.words.iter_mut().zip(rhs.words.iter()) {
            *w ^= r;
        }
    }
}

impl BitAndAssign<&Bhv> for Bhv {
    fn bitand_assign(&mut self, rhs: &Bhv) {
        for (w, r) in self.words.iter_mut().zip(rhs.words.iter()) {
            *w &= r;
        }
    }
}

impl BitOrAssign<&Bhv> for Bhv {
    fn bitor_assign(&mut self, rhs: &Bhv) {
        for (w, r) in self.words.iter_mut().zip(rhs.words.iter()) {
            *w |= r;
        }
    }
}

impl Default for Bhv {
    fn default() -> Self {
        Self::zeros()
    }
}

impl std::fmt::Debug for Bhv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bhv(active={}, first_word={:#018x})",
            self.active(),
            self.words[0]
        )
    }
}

impl Serialize for Bhv {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Bhv {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let hex = String::deserialize(deserializer)?;
            Self::from_hex(&hex).map_err(serde::de::Error::custom)
        } else {
            let bytes = Vec::<u8>::deserialize(deserializer)?;
            Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}
