//! Elementwise boolean engine.
//!
//! Word-by-word operations writing into a caller-supplied destination; no
//! allocation happens here. Allocating equivalents live on [`Bhv`] as
//! operator impls (`^`, `&`, `|`, `!`).

use crate::vector::Bhv;

/// `dst = x XOR y`.
#[inline]
pub fn xor_into(x: &Bhv, y: &Bhv, dst: &mut Bhv) {
    let (x, y) = (x.as_words(), y.as_words());
    for (i, d) in dst.as_words_mut().iter_mut().enumerate() {
        *d = x[i] ^ y[i];
    }
}

/// `dst = x AND y`.
#[inline]
pub fn and_into(x: &Bhv, y: &Bhv, dst: &mut Bhv) {
    let (x, y) = (x.as_words(), y.as_words());
    for (i, d) in dst.as_words_mut().iter_mut().enumerate() {
        *d = x[i] & y[i];
    }
}

/// `dst = x OR y`.
#[inline]
pub fn or_into(x: &Bhv, y: &Bhv, dst: &mut Bhv) {
    let (x, y) = (x.as_words(), y.as_words());
    for (i, d) in dst.as_words_mut().iter_mut().enumerate() {
        *d = x[i] | y[i];
    }
}

/// `dst = NOT x`.
#[inline]
pub fn not_into(x: &Bhv, dst: &mut Bhv) {
    let x = x.as_words();
    for (i, d) in dst.as_words_mut().iter_mut().enumerate() {
        *d = !x[i];
    }
}

/// Per-bit ternary select: output bit = `when1` bit where `cond` is 1,
/// else `when0` bit. Branch-free.
#[inline]
pub fn select_into(cond: &Bhv, when1: &Bhv, when0: &Bhv, dst: &mut Bhv) {
    let (c, t, e) = (cond.as_words(), when1.as_words(), when0.as_words());
    for (i, d) in dst.as_words_mut().iter_mut().enumerate() {
        *d = e[i] ^ (c[i] & (e[i] ^ t[i]));
    }
}

/// Exchange the two 32-bit halves of every word.
///
/// Toggles [`Bhv::half`] against its complement.
#[inline]
pub fn swap_halves_into(x: &Bhv, dst: &mut Bhv) {
    let x = x.as_words();
    for (i, d) in dst.as_words_mut().iter_mut().enumerate() {
        *d = x[i].rotate_left(32);
    }
}

/// Per-bit boolean majority of three vectors: bit set iff at least two of
/// the three inputs have it set.
///
/// Dispatches to an AVX-512 kernel when the CPU supports it; the scalar
/// kernel defines the output and the accelerated path matches it bit for
/// bit.
#[inline]
pub fn majority3_into(x: &Bhv, y: &Bhv, z: &Bhv, dst: &mut Bhv) {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx512f") {
            unsafe { majority3_into_avx512(x, y, z, dst) };
            return;
        }
    }
    majority3_into_scalar(x, y, z, dst);
}

/// Portable majority-of-three kernel: `(x&y)|(x&z)|(y&z)` per word.
#[inline]
pub fn majority3_into_scalar(x: &Bhv, y: &Bhv, z: &Bhv, dst: &mut Bhv) {
    let (x, y, z) = (x.as_words(), y.as_words(), z.as_words());
    for (i, d) in dst.as_words_mut().iter_mut().enumerate() {
        *d = (x[i] & y[i]) | (x[i] & z[i]) | (y[i] & z[i]);
    }
}

/// AVX-512 majority-of-three: 512 bits per iteration.
///
/// # Safety
/// Requires AVX-512F support. Check with `is_x86_feature_detected!("avx512f")`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f")]
pub unsafe fn majority3_into_avx512(x: &Bhv, y: &Bhv, z: &Bhv, dst: &mut Bhv) {
    use crate::VECTOR_WORDS;
    use std::arch::x86_64::*;

    let xp = x.as_words().as_ptr();
    let yp = y.as_words().as_ptr();
    let zp = z.as_words().as_ptr();
    let dp = dst.as_words_mut().as_mut_ptr();

    for chunk in 0..(VECTOR_WORDS / 8) {
        let offset = chunk * 8;

        let vx = _mm512_loadu_si512(xp.add(offset) as *const __m512i);
        let vy = _mm512_loadu_si512(yp.add(offset) as *const __m512i);
        let vz = _mm512_loadu_si512(zp.add(offset) as *const __m512i);

        let xy = _mm512_and_si512(vx, vy);
        let xz = _mm512_and_si512(vx, vz);
        let yz = _mm512_and_si512(vy, vz);

        let result = _mm512_or_si512(_mm512_or_si512(xy, xz), yz);

        _mm512_storeu_si512(dp.add(offset) as *mut __m512i, result);
    }
}
