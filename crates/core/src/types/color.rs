//! The global color palette.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a palette color.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color: {0}")]
pub struct ColorParseError(pub String);

/// A finish offered by at least one product.
///
/// The palette is closed: a product can only be offered in one of these
/// colors, so palette membership is enforced by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Titanium,
    Blue,
    White,
    Red,
    Green,
    Gold,
}

impl Color {
    /// Every palette color, in display order.
    pub const ALL: [Self; 7] = [
        Self::Black,
        Self::Titanium,
        Self::Blue,
        Self::White,
        Self::Red,
        Self::Green,
        Self::Gold,
    ];

    /// Stable identifier used in persisted snapshots and filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Titanium => "titanium",
            Self::Blue => "blue",
            Self::White => "white",
            Self::Red => "red",
            Self::Green => "green",
            Self::Gold => "gold",
        }
    }

    /// Swatch color as a CSS hex string.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Black => "#0f1115",
            Self::Titanium => "#9a9fab",
            Self::Blue => "#3a5da8",
            Self::White => "#f5f5f5",
            Self::Red => "#d12b2b",
            Self::Green => "#18a06f",
            Self::Gold => "#c7a35a",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == needle)
            .ok_or_else(|| ColorParseError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_color() {
        for color in Color::ALL {
            assert_eq!(color.as_str().parse::<Color>().unwrap(), color);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Blue".parse::<Color>().unwrap(), Color::Blue);
        assert_eq!(" RED ".parse::<Color>().unwrap(), Color::Red);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "magenta".parse::<Color>(),
            Err(ColorParseError("magenta".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_identifier() {
        assert_eq!(serde_json::to_string(&Color::Titanium).unwrap(), "\"titanium\"");
        let color: Color = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(color, Color::Gold);
    }
}
