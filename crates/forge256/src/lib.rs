//! forge256 - a from-scratch SHA-256 (FIPS 180-4) digest.
//!
//! The pipeline is strictly layered: [`pad()`] splits the message into 64-byte
//! blocks, [`schedule()`] expands each block into 64 words, [`compress()`] folds
//! those words into the running state, and [`finalize()`] serializes the state
//! into the 32-byte [`Digest`]. [`hash()`] runs the whole thing.
//!
//! ```
//! let digest = forge256::hash(b"abc");
//! assert_eq!(
//!     digest.to_string(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```

pub mod compress;
pub mod consts;
pub mod error;
pub mod finalize;
pub mod hash;
pub mod pad;
pub mod schedule;
pub mod types;

pub use compress::compress;
pub use consts::{BLOCK_LEN, DIGEST_LEN};
pub use error::DigestParseError;
pub use finalize::finalize;
pub use hash::{hash, sha256_hex};
pub use pad::pad;
pub use schedule::schedule;
pub use types::{Digest, HashRef, ALGO_NAME};
