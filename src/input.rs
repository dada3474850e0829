//! Parses the problem instance (component G, §4.6): a target integer and a multiset of
//! brick integers, from either CLI positionals or a JSON file.

use anyhow::{bail, Context as _};
use serde::Deserialize;

/// the wire shape of `--input <path>.json`: strings, so the same JSON can hold "007"
/// without a lossy numeric round-trip, and so malformed entries surface as a parse error
/// rather than a silent `serde_json` type mismatch
#[derive(Debug, Deserialize)]
pub struct RawInput {
    pub target: String,
    pub bricks: Vec<String>,
}

/// a validated problem instance: a non-negative target and a non-empty multiset of
/// non-negative bricks
#[derive(Debug, Clone)]
pub struct Input {
    pub target: i64,
    pub bricks: Vec<i64>,
}

impl TryFrom<&RawInput> for Input {
    type Error = anyhow::Error;

    fn try_from(raw: &RawInput) -> Result<Self, Self::Error> {
        let target = parse_non_negative(&raw.target).context("invalid target")?;
        if raw.bricks.is_empty() {
            bail!("bricks must be non-empty");
        }
        let bricks = raw
            .bricks
            .iter()
            .map(|b| parse_non_negative(b))
            .collect::<anyhow::Result<Vec<_>>>()
            .context("invalid brick")?;
        Ok(Input { target, bricks })
    }
}

impl Input {
    /// builds directly from CLI-supplied strings (positional `target` + `bricks`)
    pub fn from_strings(target: &str, bricks: &[String]) -> anyhow::Result<Self> {
        let raw = RawInput {
            target: target.to_string(),
            bricks: bricks.to_vec(),
        };
        Input::try_from(&raw)
    }
}

fn parse_non_negative(s: &str) -> anyhow::Result<i64> {
    let value: i64 = s
        .trim()
        .parse()
        .with_context(|| format!("{s:?} is not an integer"))?;
    if value < 0 {
        bail!("{s:?} must be non-negative");
    }
    Ok(value)
}
