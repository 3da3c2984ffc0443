//! Type definitions for SHA-256 digests.
//!
//! [`Digest`] is the fixed 32-byte output of [`crate::hash`]. It renders and
//! parses as 64 lowercase hex characters and serializes the same way, so a
//! digest read back from JSON compares equal to the one that was written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::DIGEST_LEN;
use crate::error::DigestParseError;

/// Name of the hash algorithm as written in [`HashRef::algo`].
pub const ALGO_NAME: &str = "sha-256";

/// A 256-bit SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Lowercase hex encoding, always 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Number of bit positions in which two digests differ (0..=256).
    pub fn bit_distance(&self, other: &Digest) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8; DIGEST_LEN]> for Digest {
    fn eq(&self, other: &[u8; DIGEST_LEN]) -> bool {
        &self.0 == other
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = DigestParseError;

    /// Parses 64 hex characters, upper- or lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGEST_LEN * 2 {
            return Err(DigestParseError::InvalidLength {
                expected: DIGEST_LEN * 2,
                actual: s.len(),
            });
        }
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Reference to a hash of some content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashRef {
    /// Hash algorithm used, always "sha-256"
    pub algo: String,
    /// Hex-encoded hash value
    pub value: String,
}

impl From<Digest> for HashRef {
    fn from(digest: Digest) -> Self {
        Self {
            algo: ALGO_NAME.to_string(),
            value: digest.to_hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC_HEX: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_digest_hex_display_and_parse_agree() {
        let digest: Digest = ABC_HEX.parse().unwrap();
        assert_eq!(digest.to_string(), ABC_HEX);
        assert_eq!(format!("{:x}", digest), ABC_HEX);
        assert_eq!(digest.as_bytes()[0], 0xba);
    }

    #[test]
    fn test_digest_parse_accepts_uppercase() {
        let upper = ABC_HEX.to_uppercase();
        let digest: Digest = upper.parse().unwrap();
        assert_eq!(digest.to_hex(), ABC_HEX);
    }

    #[test]
    fn test_digest_parse_rejects_wrong_length() {
        let err = "abcd".parse::<Digest>().unwrap_err();
        assert_eq!(
            err,
            DigestParseError::InvalidLength {
                expected: 64,
                actual: 4
            }
        );
    }

    #[test]
    fn test_digest_parse_rejects_non_hex() {
        let bad = "z".repeat(64);
        let err = bad.parse::<Digest>().unwrap_err();
        assert!(matches!(err, DigestParseError::InvalidHex(_)));
        assert!(err.to_string().contains("Invalid hex digest"));
    }

    #[test]
    fn test_digest_serialization() {
        let digest: Digest = ABC_HEX.parse().unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{}\"", ABC_HEX));

        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }

    #[test]
    fn test_bit_distance() {
        let zero = Digest::from([0u8; 32]);
        let ones = Digest::from([0xffu8; 32]);
        assert_eq!(zero.bit_distance(&zero), 0);
        assert_eq!(zero.bit_distance(&ones), 256);

        let mut one_bit = [0u8; 32];
        one_bit[31] = 0x01;
        assert_eq!(zero.bit_distance(&Digest::from(one_bit)), 1);
    }

    #[test]
    fn test_hash_ref_serialization() {
        let digest: Digest = ABC_HEX.parse().unwrap();
        let hash_ref = HashRef::from(digest);

        let json = serde_json::to_string(&hash_ref).unwrap();
        assert!(json.contains("\"algo\":\"sha-256\""));
        assert!(json.contains(ABC_HEX));
    }

    #[test]
    fn test_debug_shows_hex() {
        let digest = Digest::from([0u8; 32]);
        assert_eq!(format!("{:?}", digest), format!("Digest({})", "0".repeat(64)));
    }
}
