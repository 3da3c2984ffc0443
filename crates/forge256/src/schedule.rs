// Message schedule expansion (FIPS 180-4, section 6.2.2 step 1)

use crate::consts::{BLOCK_LEN, SCHEDULE_WORDS};

/// σ0, applied to `w[t-15]`.
#[inline]
pub(crate) fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

/// σ1, applied to `w[t-2]`.
#[inline]
pub(crate) fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Expands one 64-byte block into the 64-word message schedule.
///
/// Words 0..16 are the block read as big-endian `u32`s; words 16..64 are
/// derived from earlier words with wrapping addition.
pub fn schedule(block: &[u8; BLOCK_LEN]) -> [u32; SCHEDULE_WORDS] {
    let mut w = [0u32; SCHEDULE_WORDS];

    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    for t in 16..SCHEDULE_WORDS {
        w[t] = w[t - 16]
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma1(w[t - 2]));
    }

    w
}
