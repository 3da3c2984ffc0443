// Input collection and per-input hash reports for `forge256 hash`

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use forge256::{hash, Digest, HashRef};
use serde::{Deserialize, Serialize};

/// Name shown for data read from standard input.
pub const STDIN_NAME: &str = "-";

/// A named chunk of bytes to hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Input {
    pub fn from_string(text: &str) -> Self {
        Self {
            name: format!("\"{}\"", text),
            bytes: text.as_bytes().to_vec(),
        }
    }

    pub fn from_path(path: &str) -> Result<Self> {
        if path == STDIN_NAME {
            return Self::from_reader(std::io::stdin().lock());
        }
        let bytes = std::fs::read(Path::new(path))
            .with_context(|| format!("Failed to read '{}'", path))?;
        Ok(Self {
            name: path.to_string(),
            bytes,
        })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context("Failed to read standard input")?;
        Ok(Self {
            name: STDIN_NAME.to_string(),
            bytes,
        })
    }
}

/// Gathers inputs from a literal string and/or paths; stdin when neither is given.
pub fn collect_inputs(paths: &[String], string: Option<&str>) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();
    if let Some(text) = string {
        inputs.push(Input::from_string(text));
    }
    for path in paths {
        inputs.push(Input::from_path(path)?);
    }
    if inputs.is_empty() {
        inputs.push(Input::from_path(STDIN_NAME)?);
    }
    Ok(inputs)
}

/// Hash result for one input, as printed by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashReport {
    /// File name, `-` for stdin, or the quoted literal string
    pub name: String,
    /// Size of the input in bytes
    pub size: u64,
    pub hash: HashRef,
}

impl HashReport {
    pub fn new(input: &Input, digest: Digest) -> Self {
        Self {
            name: input.name.clone(),
            size: input.bytes.len() as u64,
            hash: HashRef::from(digest),
        }
    }
}

/// Hashes one input into its report.
pub fn hash_input(input: &Input) -> (Digest, HashReport) {
    let digest = hash(&input.bytes);
    (digest, HashReport::new(input, digest))
}
