use crate::consts::{DIGEST_LEN, STATE_WORDS};

/// Serializes the final hash state into the 32-byte digest, each word big-endian.
pub fn finalize(state: &[u32; STATE_WORDS]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}
