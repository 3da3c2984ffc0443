// Message padding (FIPS 180-4, section 5.1.1)

use crate::consts::{BLOCK_LEN, LENGTH_FIELD_LEN};

/// Returns the length of the padded message for an input of `message_len` bytes.
///
/// Always a non-zero multiple of [`BLOCK_LEN`]. When the last partial block
/// has no room left for the `0x80` marker plus the 8-byte length field, the
/// padding spills into one extra block.
pub fn padded_len(message_len: usize) -> usize {
    let used = (message_len + 1 + LENGTH_FIELD_LEN) % BLOCK_LEN;
    let zeros = if used == 0 { 0 } else { BLOCK_LEN - used };
    message_len + 1 + zeros + LENGTH_FIELD_LEN
}

/// Pads `message` into a whole number of 64-byte blocks.
///
/// Layout: the message, a single `0x80` byte, the minimum run of `0x00`
/// bytes, then the message length in bits as a big-endian `u64`.
pub fn pad(message: &[u8]) -> Vec<u8> {
    let total = padded_len(message.len());
    let mut padded = Vec::with_capacity(total);
    padded.extend_from_slice(message);
    padded.push(0x80);
    padded.resize(total - LENGTH_FIELD_LEN, 0x00);

    // Length is defined modulo 2^64 bits.
    let bit_len = (message.len() as u64).wrapping_mul(8);
    padded.extend_from_slice(&bit_len.to_be_bytes());

    debug_assert_eq!(padded.len() % BLOCK_LEN, 0);
    padded
}

/// Splits a padded message into its 64-byte blocks, in order.
///
/// A trailing partial chunk (which `pad` never produces) is ignored.
pub fn blocks(padded: &[u8]) -> impl Iterator<Item = &[u8; BLOCK_LEN]> {
    padded
        .chunks_exact(BLOCK_LEN)
        .filter_map(|chunk| <&[u8; BLOCK_LEN]>::try_from(chunk).ok())
}
