//! Document and template version numbers.
//!
//! Versions are dotted decimal sequences with an optional leading `v`
//! (`1`, `v1.2`, `1.0.3`). Missing trailing components compare as zero, so
//! `1.0` and `1` are equal.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Returned when a string is not a valid version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version '{0}'")]
pub struct InvalidVersion(pub String);

/// A parsed version.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parses a version string.
    pub fn parse(raw: &str) -> Result<Self, InvalidVersion> {
        let invalid = || InvalidVersion(raw.to_string());
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(invalid());
        }

        let components = digits
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<u64>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }

    /// Returns true if `raw` parses as a version.
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
            first = false;
        }
        Ok(())
    }
}
