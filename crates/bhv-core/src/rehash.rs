//! Cryptographic rehash via the TurboSHAKE256 XOF.
//!
//! Maps a vector to an unrelated vector of the same width: the full
//! 1024-byte representation is absorbed and exactly 1024 bytes are
//! squeezed back out, so nothing is truncated or padded.

use crate::vector::Bhv;
use crate::VECTOR_BYTES;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{TurboShake256, TurboShake256Core};

/// Domain-separation byte for vector rehashing.
const REHASH_DOMAIN: u8 = 0x1F;

/// Domain-separation byte for seed-derived vectors ([`Bhv::from_seed`]).
pub(crate) const SEED_DOMAIN: u8 = 0x20;

/// Absorb `input` and squeeze `out.len()` bytes under the given domain.
pub(crate) fn xof_fill(input: &[u8], domain: u8, out: &mut [u8]) {
    let mut hasher = TurboShake256::from_core(TurboShake256Core::new(domain));
    hasher.update(input);
    hasher.finalize_xof().read(out);
}

/// `dst = XOF(x)`: deterministic one-way mapping to a same-size vector.
pub fn rehash_into(x: &Bhv, dst: &mut Bhv) {
    let mut bytes = [0u8; VECTOR_BYTES];
    xof_fill(x.as_bytes(), REHASH_DOMAIN, &mut bytes);
    dst.copy_from_le_bytes(&bytes);
}

/// Allocating form of [`rehash_into`].
pub fn rehash(x: &Bhv) -> Bhv {
    let mut dst = Bhv::zeros();
    rehash_into(x, &mut dst);
    dst
}
