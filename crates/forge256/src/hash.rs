// SHA-256 entry points

use crate::compress::compress;
use crate::consts::H0;
use crate::finalize::finalize;
use crate::pad::{blocks, pad};
use crate::schedule::schedule;
use crate::types::Digest;

/// Computes the SHA-256 digest of `message`.
///
/// Accepts any input, including the empty slice. Each call owns its own
/// hash state, so independent messages can be hashed concurrently.
pub fn hash(message: &[u8]) -> Digest {
    let padded = pad(message);

    let mut state = H0;
    for block in blocks(&padded) {
        compress(&mut state, &schedule(block));
    }

    Digest::from_bytes(finalize(&state))
}

/// Computes the SHA-256 hash of the input bytes and returns it as a lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hash(bytes).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_hash() {
        // SHA-256 of empty string is well-known
        let empty_hash = sha256_hex(b"");
        assert_eq!(
            empty_hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        let hello_hash = sha256_hex(b"hello");
        assert_eq!(
            hello_hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_sha256_returns_lowercase_hex() {
        let hash = sha256_hex(b"test");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
        // 256 bits / 4 bits per hex char
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let message = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(hash(message), hash(message));
        assert_ne!(hash(message), hash(b"The quick brown fox jumps over the lazy dog."));
    }
}
