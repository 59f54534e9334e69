//! # bhv-core
//!
//! Bitpacked boolean hypervectors (BHVs) for hyperdimensional computing.
//!
//! Features:
//! - 8192-bit vectors packed into 128 u64 words (1024 bytes)
//! - POPCNT-based Hamming distance and active-bit counting
//! - XOR-based binding/unbinding for associative operations
//! - Majority/threshold aggregation with size-adaptive counting kernels
//! - Deterministic word-level permutation derived from integer seeds
//! - TurboSHAKE256-based rehashing and seed generation
//!
//! All randomness flows through an explicit `&mut impl Rng`; pass
//! `rand::thread_rng()` when reproducibility doesn't matter and a seeded
//! `StdRng` when it does.

pub mod error;
pub mod ops;
pub mod permute;
pub mod random;
pub mod rehash;
pub mod threshold;
pub mod vector;

pub use error::*;
pub use ops::*;
pub use permute::*;
pub use random::*;
pub use rehash::*;
pub use threshold::*;
pub use vector::*;

/// Size of hypervectors in bits.
pub const VECTOR_BITS: usize = 8192;

/// Bits per packing word.
pub const BITS_PER_WORD: usize = 64;

/// Number of u64 words per vector (8192 / 64 = 128).
pub const VECTOR_WORDS: usize = VECTOR_BITS / BITS_PER_WORD;

/// Size of a vector's byte representation (1024 bytes).
pub const VECTOR_BYTES: usize = VECTOR_WORDS * 8;
