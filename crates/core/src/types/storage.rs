//! Storage capacity tiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`StorageTier`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageParseError {
    /// The input string is empty.
    #[error("storage tier cannot be empty")]
    Empty,
    /// The input is not a whole number of gigabytes.
    #[error("invalid storage tier: {0}")]
    Invalid(String),
    /// Capacity tiers are strictly positive.
    #[error("storage tier must be positive")]
    Zero,
}

/// Gigabytes in one terabyte, as storage tiers are labelled.
pub const GIGABYTES_PER_TERABYTE: u32 = 1024;

/// A storage capacity option, in gigabytes.
///
/// Tiers are accepted both as numbers and as text, so `256`, `"256"` and
/// `"256 GB"` all name the same tier once normalized. A `TB` suffix counts
/// 1024 gigabytes, so `"1TB"` is the 1024 GB tier.
///
/// ## Examples
///
/// ```
/// use istore_core::StorageTier;
///
/// let tier: StorageTier = "256 GB".parse().unwrap();
/// assert_eq!(tier, StorageTier::new(256).unwrap());
/// assert_eq!(tier.to_string(), "256 GB");
///
/// assert!("0".parse::<StorageTier>().is_err());
/// assert!("lots".parse::<StorageTier>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StorageTier(u32);

impl StorageTier {
    /// Create a tier from a gigabyte count. Returns `None` for zero.
    #[must_use]
    pub const fn new(gigabytes: u32) -> Option<Self> {
        if gigabytes == 0 {
            None
        } else {
            Some(Self(gigabytes))
        }
    }

    /// Get the capacity in gigabytes.
    #[must_use]
    pub const fn gigabytes(self) -> u32 {
        self.0
    }
}

impl FromStr for StorageTier {
    type Err = StorageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(StorageParseError::Empty);
        }

        let (digits, multiplier) = split_unit(trimmed);
        let gigabytes = digits
            .parse::<u32>()
            .ok()
            .and_then(|amount| amount.checked_mul(multiplier))
            .ok_or_else(|| StorageParseError::Invalid(trimmed.to_owned()))?;

        Self::new(gigabytes).ok_or(StorageParseError::Zero)
    }
}

/// Split an optional case-insensitive `GB`/`TB` unit off `s`, returning the
/// remaining digits and the gigabyte multiplier.
fn split_unit(s: &str) -> (&str, u32) {
    let Some(at) = s.len().checked_sub(2).filter(|&at| s.is_char_boundary(at)) else {
        return (s, 1);
    };
    let (amount, unit) = s.split_at(at);
    if unit.eq_ignore_ascii_case("gb") {
        (amount.trim_end(), 1)
    } else if unit.eq_ignore_ascii_case("tb") {
        (amount.trim_end(), GIGABYTES_PER_TERABYTE)
    } else {
        (s, 1)
    }
}

impl TryFrom<u32> for StorageTier {
    type Error = StorageParseError;

    fn try_from(gigabytes: u32) -> Result<Self, Self::Error> {
        Self::new(gigabytes).ok_or(StorageParseError::Zero)
    }
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} GB", self.0)
    }
}

impl<'de> Deserialize<'de> for StorageTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(gigabytes) => Self::try_from(gigabytes),
            Raw::Text(text) => text.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_numeric_and_labelled_text() {
        let expected = StorageTier::new(128).unwrap();
        assert_eq!("128".parse::<StorageTier>().unwrap(), expected);
        assert_eq!(" 128 ".parse::<StorageTier>().unwrap(), expected);
        assert_eq!("128GB".parse::<StorageTier>().unwrap(), expected);
        assert_eq!("128 gb".parse::<StorageTier>().unwrap(), expected);
    }

    #[test]
    fn test_parse_terabyte_suffix() {
        let expected = StorageTier::new(1024).unwrap();
        assert_eq!("1TB".parse::<StorageTier>().unwrap(), expected);
        assert_eq!("1 tb".parse::<StorageTier>().unwrap(), expected);
        assert_eq!(
            "2TB".parse::<StorageTier>().unwrap(),
            StorageTier::new(2048).unwrap()
        );
        assert_eq!("0TB".parse::<StorageTier>(), Err(StorageParseError::Zero));
        assert!(matches!(
            "TB".parse::<StorageTier>(),
            Err(StorageParseError::Invalid(_))
        ));
        assert!(matches!(
            "5000000TB".parse::<StorageTier>(),
            Err(StorageParseError::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<StorageTier>(), Err(StorageParseError::Empty));
        assert_eq!("0".parse::<StorageTier>(), Err(StorageParseError::Zero));
        assert!(matches!(
            "-64".parse::<StorageTier>(),
            Err(StorageParseError::Invalid(_))
        ));
        assert!(matches!(
            "big".parse::<StorageTier>(),
            Err(StorageParseError::Invalid(_))
        ));
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: StorageTier = serde_json::from_str("256").unwrap();
        let from_text: StorageTier = serde_json::from_str("\"256\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "256");

        assert!(serde_json::from_str::<StorageTier>("0").is_err());
    }
}
