// Verification harness: compares forge256 against the sha2 crate
//
// Every check takes the RNG from the caller so a run can be replayed from
// its seed.

use forge256::{hash, Digest, BLOCK_LEN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sha2::{Digest as _, Sha256};
use tracing::{debug, info, warn};

/// Paragraph hashed by `forge256 demo`.
pub const SAMPLE_PARAGRAPH: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Aliquam ac sem et arcu molestie pretium ac non sapien. Vivamus vulputate eleifend feugiat. \
Cras mollis tincidunt nibh, et facilisis augue luctus ac. Curabitur convallis mattis dignissim. \
Pellentesque hendrerit tellus ex, sit amet accumsan libero sodales sed. Ut eget sodales massa, \
pretium convallis nisi. Etiam neque libero, sollicitudin quis tortor a, varius mollis sapien. \
Mauris a ligula imperdiet, placerat metus a, feugiat lacus. Ut tincidunt finibus sapien ut aliquam. \
Duis vestibulum erat nec leo tempor ultrices. Duis pretium, felis porta pharetra semper, ligula \
felis ullamcorper tortor, sit amet lacinia tortor nunc nec enim. Sed vitae porta velit. Sed \
vestibulum mollis est, sit amet vulputate tellus cursus et. Quisque id est vel ipsum pharetra \
dictum vitae in magna. Sed a elementum urna. Sed interdum a mauris vitae iaculis.";

/// Largest random buffer used by the equivalence check: three blocks plus one byte,
/// so every padding case is reachable.
const MAX_RANDOM_LEN: usize = 3 * BLOCK_LEN + 1;

/// Digest from the trusted `sha2` implementation.
pub fn reference_digest(message: &[u8]) -> Digest {
    let bytes: [u8; 32] = Sha256::digest(message).into();
    Digest::from(bytes)
}

/// Builds the harness RNG, drawing a fresh seed when none is given.
///
/// Returns the seed actually used so it can be reported.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (StdRng::seed_from_u64(seed), seed)
}

/// A non-negative random integer rendered in decimal.
fn random_decimal(rng: &mut StdRng) -> String {
    rng.gen_range(0..=i64::MAX).to_string()
}

/// An input whose digest disagreed with the reference.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Mismatch {
    /// Hex-encoded input bytes
    pub input_hex: String,
    pub ours: Digest,
    pub reference: Digest,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EquivalenceReport {
    /// Number of inputs hashed by both implementations
    pub checked: usize,
    /// First disagreement, if any; the check stops there
    pub mismatch: Option<Mismatch>,
}

impl EquivalenceReport {
    pub fn passed(&self) -> bool {
        self.mismatch.is_none()
    }
}

/// Compares one input against the reference.
pub fn compare(message: &[u8]) -> Option<Mismatch> {
    let ours = hash(message);
    let reference = reference_digest(message);
    if ours == reference {
        None
    } else {
        Some(Mismatch {
            input_hex: hex::encode(message),
            ours,
            reference,
        })
    }
}

/// Hashes `rounds` random decimal strings and `rounds` random byte buffers
/// with both implementations, stopping at the first disagreement.
pub fn equivalence_check(rng: &mut StdRng, rounds: usize) -> EquivalenceReport {
    info!(rounds, "Starting equivalence check");
    let mut checked = 0;

    for round in 0..rounds {
        let decimal = random_decimal(rng);

        let len = rng.gen_range(0..=MAX_RANDOM_LEN);
        let mut buffer = vec![0u8; len];
        rng.fill(&mut buffer[..]);

        for message in [decimal.as_bytes(), &buffer[..]] {
            checked += 1;
            if let Some(mismatch) = compare(message) {
                warn!(round, input = %mismatch.input_hex, "Digest differs from reference");
                return EquivalenceReport {
                    checked,
                    mismatch: Some(mismatch),
                };
            }
        }
        debug!(round, decimal = %decimal, len, "Round matched");
    }

    info!(checked, "Equivalence check finished");
    EquivalenceReport {
        checked,
        mismatch: None,
    }
}

/// Two distinct inputs with the same digest.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Collision {
    pub first: String,
    pub second: String,
    pub digest: Digest,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CollisionReport {
    /// Pairs of distinct inputs whose digests were compared
    pub compared: usize,
    /// Pairs skipped because both inputs were equal
    pub skipped: usize,
    pub collision: Option<Collision>,
}

impl CollisionReport {
    pub fn passed(&self) -> bool {
        self.collision.is_none()
    }
}

/// Draws `pairs` pairs of random decimal strings and checks that distinct
/// inputs hash differently. Equal pairs are skipped, not retried.
pub fn collision_check(rng: &mut StdRng, pairs: usize) -> CollisionReport {
    info!(pairs, "Starting collision check");
    let mut report = CollisionReport {
        compared: 0,
        skipped: 0,
        collision: None,
    };

    for _ in 0..pairs {
        let first = random_decimal(rng);
        let second = random_decimal(rng);
        if first == second {
            report.skipped += 1;
            continue;
        }

        report.compared += 1;
        let digest = hash(first.as_bytes());
        if digest == hash(second.as_bytes()) {
            warn!(%first, %second, %digest, "Collision found");
            report.collision = Some(Collision {
                first,
                second,
                digest,
            });
            return report;
        }
    }

    info!(compared = report.compared, skipped = report.skipped, "Collision check finished");
    report
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AvalancheReport {
    pub trials: usize,
    /// Average number of output bits changed by a single input bit flip
    pub mean_flipped_bits: f64,
    pub min_flipped_bits: u32,
    pub max_flipped_bits: u32,
}

impl AvalancheReport {
    /// Mean within 10 bits of the ideal 128.
    pub fn passed(&self) -> bool {
        (118.0..=138.0).contains(&self.mean_flipped_bits)
    }
}

/// Flips one random bit of a random message per trial and measures how many
/// digest bits change.
pub fn avalanche_check(rng: &mut StdRng, trials: usize) -> AvalancheReport {
    info!(trials, "Starting avalanche check");
    let mut total = 0u64;
    let mut min = u32::MAX;
    let mut max = 0;

    for _ in 0..trials {
        let len = rng.gen_range(1..=MAX_RANDOM_LEN);
        let mut message = vec![0u8; len];
        rng.fill(&mut message[..]);

        let before = hash(&message);
        let bit = rng.gen_range(0..len * 8);
        message[bit / 8] ^= 1 << (bit % 8);
        let flipped = before.bit_distance(&hash(&message));

        total += u64::from(flipped);
        min = min.min(flipped);
        max = max.max(flipped);
    }

    let mean = if trials == 0 {
        0.0
    } else {
        total as f64 / trials as f64
    };
    info!(mean, min, max, "Avalanche check finished");

    AvalancheReport {
        trials,
        mean_flipped_bits: mean,
        min_flipped_bits: if trials == 0 { 0 } else { min },
        max_flipped_bits: max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_paragraph_matches_reference() {
        let message = SAMPLE_PARAGRAPH.as_bytes();
        assert!(message.len() > 10 * BLOCK_LEN);
        assert_eq!(hash(message), reference_digest(message));
    }

    #[test]
    fn test_compare_reports_nothing_for_matching_digest() {
        assert_eq!(compare(b"abc"), None);
        assert_eq!(compare(b""), None);
    }

    #[test]
    fn test_equivalence_check_passes() {
        let (mut rng, seed) = seeded_rng(Some(99));
        assert_eq!(seed, 99);

        let report = equivalence_check(&mut rng, 200);
        assert!(report.passed(), "{:?}", report.mismatch);
        assert_eq!(report.checked, 400);
    }

    #[test]
    fn test_collision_check_passes() {
        let (mut rng, _) = seeded_rng(Some(3));
        let report = collision_check(&mut rng, 1000);
        assert!(report.passed());
        assert_eq!(report.compared + report.skipped, 1000);
    }

    #[test]
    fn test_avalanche_check_near_half() {
        let (mut rng, _) = seeded_rng(Some(11));
        let report = avalanche_check(&mut rng, 500);
        assert!(report.passed(), "mean {}", report.mean_flipped_bits);
        assert!(report.min_flipped_bits <= report.max_flipped_bits);
    }

    #[test]
    fn test_avalanche_check_zero_trials() {
        let (mut rng, _) = seeded_rng(Some(1));
        let report = avalanche_check(&mut rng, 0);
        assert_eq!(report.mean_flipped_bits, 0.0);
        assert_eq!(report.min_flipped_bits, 0);
        assert!(!report.passed());
    }

    #[test]
    fn test_same_seed_replays_same_run() {
        let (mut a, _) = seeded_rng(Some(5));
        let (mut b, _) = seeded_rng(Some(5));
        assert_eq!(random_decimal(&mut a), random_decimal(&mut b));
    }

    #[test]
    fn test_report_serialization() {
        let report = CollisionReport {
            compared: 3,
            skipped: 1,
            collision: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"compared\":3"));
        assert!(json.contains("\"collision\":null"));
    }
}
