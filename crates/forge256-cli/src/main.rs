// forge256 CLI - demonstration and verification driver for the forge256 digest

mod harness;
mod input;
mod logging;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use forge256::Digest;
use serde::Serialize;
use tracing::info;

const DEFAULT_ROUNDS: usize = 1000;

/// forge256 - from-scratch SHA-256 with reference checks
#[derive(Parser)]
#[command(name = "forge256")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless FORGE256_LOG or RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash the sample paragraph and run every check (default)
    Demo {
        /// Seed for the random checks
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Hash files, a string, or standard input
    Hash {
        /// Files to hash ("-" reads standard input)
        paths: Vec<String>,

        /// Hash this string instead of (or before) any files
        #[arg(short, long)]
        string: Option<String>,

        /// Expected hex digest; fails if any input hashes differently
        #[arg(long, value_name = "HEX")]
        expect: Option<String>,

        /// Print JSON records instead of "<digest>  <name>" lines
        #[arg(long)]
        json: bool,
    },
    /// Compare against the sha2 crate on random inputs
    Check {
        /// Number of rounds (each hashes a decimal string and a random buffer)
        #[arg(short = 'n', long, default_value_t = DEFAULT_ROUNDS)]
        rounds: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },
    /// Look for collisions between pairs of random inputs
    Collide {
        /// Number of pairs to compare
        #[arg(short = 'n', long, default_value_t = DEFAULT_ROUNDS)]
        pairs: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },
    /// Measure how many output bits a single input bit flip changes
    Avalanche {
        /// Number of single-bit flips
        #[arg(short = 'n', long, default_value_t = DEFAULT_ROUNDS)]
        trials: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Demo { seed: None }) {
        Commands::Demo { seed } => handle_demo(seed),
        Commands::Hash {
            paths,
            string,
            expect,
            json,
        } => handle_hash(&paths, string.as_deref(), expect.as_deref(), json),
        Commands::Check { rounds, seed, json } => handle_check(rounds, seed, json),
        Commands::Collide { pairs, seed, json } => handle_collide(pairs, seed, json),
        Commands::Avalanche { trials, seed, json } => handle_avalanche(trials, seed, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn pass_line(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

fn fail_line(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

fn handle_demo(seed: Option<u64>) -> Result<()> {
    let message = harness::SAMPLE_PARAGRAPH.as_bytes();
    println!("Applying hash function on the following example message:");
    println!("{}", harness::SAMPLE_PARAGRAPH);
    println!();

    let ours = forge256::hash(message);
    let reference = harness::reference_digest(message);
    println!("  forge256:  {}", ours);
    println!("  sha2:      {}", reference);
    println!();

    if ours != reference {
        fail_line("Digests differ");
        return Err(anyhow!("forge256 digest does not match the reference"));
    }
    pass_line("Digests are the same");
    println!();

    let (mut rng, seed) = harness::seeded_rng(seed);
    info!(seed, "Running demo checks");
    println!("  Seed: {}", seed);

    let equivalence = harness::equivalence_check(&mut rng, DEFAULT_ROUNDS);
    report_equivalence(&equivalence)?;

    let collisions = harness::collision_check(&mut rng, DEFAULT_ROUNDS);
    report_collisions(&collisions)?;

    let avalanche = harness::avalanche_check(&mut rng, DEFAULT_ROUNDS);
    report_avalanche(&avalanche)
}

fn handle_hash(
    paths: &[String],
    string: Option<&str>,
    expect: Option<&str>,
    json: bool,
) -> Result<()> {
    let expected = expect
        .map(|hex| hex.parse::<Digest>())
        .transpose()
        .map_err(|e| anyhow!("Invalid --expect value: {}", e))?;

    let inputs = input::collect_inputs(paths, string)?;
    let mut reports = Vec::with_capacity(inputs.len());
    let mut mismatched = Vec::new();

    for item in &inputs {
        let (digest, report) = input::hash_input(item);
        info!(name = %item.name, size = item.bytes.len(), %digest, "Hashed input");

        if let Some(expected) = expected {
            if digest != expected {
                mismatched.push(item.name.clone());
            }
        }
        if !json {
            println!("{}  {}", digest, item.name);
        }
        reports.push(report);
    }

    if json {
        print_json(&reports)?;
    }

    if !mismatched.is_empty() {
        return Err(anyhow!(
            "Digest mismatch for {}: expected {}",
            mismatched.join(", "),
            expect.unwrap_or_default()
        ));
    }
    Ok(())
}

fn handle_check(rounds: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let (mut rng, seed) = harness::seeded_rng(seed);
    info!(seed, "Using seed");
    let report = harness::equivalence_check(&mut rng, rounds);

    if json {
        print_json(&report)?;
        return ensure_passed(report.passed(), "Equivalence check failed");
    }
    println!("  Seed: {}", seed);
    report_equivalence(&report)
}

fn handle_collide(pairs: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let (mut rng, seed) = harness::seeded_rng(seed);
    info!(seed, "Using seed");
    let report = harness::collision_check(&mut rng, pairs);

    if json {
        print_json(&report)?;
        return ensure_passed(report.passed(), "Collision check failed");
    }
    println!("  Seed: {}", seed);
    report_collisions(&report)
}

fn handle_avalanche(trials: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let (mut rng, seed) = harness::seeded_rng(seed);
    info!(seed, "Using seed");
    let report = harness::avalanche_check(&mut rng, trials);

    if json {
        print_json(&report)?;
        return ensure_passed(report.passed(), "Avalanche check failed");
    }
    println!("  Seed: {}", seed);
    report_avalanche(&report)
}

fn ensure_passed(passed: bool, message: &str) -> Result<()> {
    if passed {
        Ok(())
    } else {
        Err(anyhow!("{}", message))
    }
}

fn report_equivalence(report: &harness::EquivalenceReport) -> Result<()> {
    match &report.mismatch {
        None => {
            pass_line(&format!(
                "Equivalence check passed ({} inputs)",
                report.checked
            ));
            Ok(())
        }
        Some(m) => {
            fail_line("Equivalence check failed");
            eprintln!();
            eprintln!("  Input:     {}", m.input_hex);
            eprintln!("  forge256:  {}", m.ours);
            eprintln!("  sha2:      {}", m.reference);
            Err(anyhow!(
                "Digest differs from reference after {} inputs",
                report.checked
            ))
        }
    }
}

fn report_collisions(report: &harness::CollisionReport) -> Result<()> {
    match &report.collision {
        None => {
            pass_line(&format!(
                "Collision check passed ({} pairs, {} skipped)",
                report.compared, report.skipped
            ));
            Ok(())
        }
        Some(c) => {
            fail_line("Collision check failed");
            eprintln!();
            eprintln!("  Input 1: {}", c.first);
            eprintln!("  Input 2: {}", c.second);
            eprintln!("  Digest:  {}", c.digest);
            Err(anyhow!("Distinct inputs produced the same digest"))
        }
    }
}

fn report_avalanche(report: &harness::AvalancheReport) -> Result<()> {
    let summary = format!(
        "mean {:.2} bits flipped (min {}, max {}) over {} trials",
        report.mean_flipped_bits, report.min_flipped_bits, report.max_flipped_bits, report.trials
    );
    if report.passed() {
        pass_line(&format!("Avalanche check passed: {}", summary));
        Ok(())
    } else {
        fail_line(&format!("Avalanche check failed: {}", summary));
        Err(anyhow!("Mean flipped bits outside the expected range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["forge256"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["forge256", "check"]).unwrap();
        match cli.command {
            Some(Commands::Check { rounds, seed, json }) => {
                assert_eq!(rounds, DEFAULT_ROUNDS);
                assert_eq!(seed, None);
                assert!(!json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_hash_with_string_and_seeded_collide() {
        let cli = Cli::try_parse_from(["forge256", "-v", "hash", "-s", "abc", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Hash { string: Some(ref s), json: true, .. }) if s == "abc"
        ));

        let cli = Cli::try_parse_from(["forge256", "collide", "-n", "10", "--seed", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Collide { pairs: 10, seed: Some(7), json: false })
        ));
    }

    #[test]
    fn test_hash_expect_matches() {
        let result = handle_hash(
            &[],
            Some("abc"),
            Some("BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"),
            true,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_hash_expect_mismatch_fails() {
        let wrong = "0".repeat(64);
        let err = handle_hash(&[], Some("abc"), Some(&wrong), true).unwrap_err();
        assert!(err.to_string().contains("Digest mismatch"));
    }

    #[test]
    fn test_hash_expect_invalid_hex_fails() {
        let err = handle_hash(&[], Some("abc"), Some("xyz"), true).unwrap_err();
        assert!(err.to_string().contains("Invalid --expect value"));
    }

    #[test]
    fn test_ensure_passed() {
        assert!(ensure_passed(true, "unused").is_ok());
        assert_eq!(
            ensure_passed(false, "boom").unwrap_err().to_string(),
            "boom"
        );
    }
}
