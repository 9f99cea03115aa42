//! Shared allocation colour palette
//!
//! The single mapping from stored colour names to concrete colour values.
//! Layout code looks colours up here by reference; nothing else declares
//! colour literals.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Concrete colour value (CSS hex notation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

impl Color {
    /// Hex representation, e.g. `#1589EE`
    #[inline]
    #[must_use]
    pub const fn hex(self) -> &'static str {
        self.0
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Colour used when an allocation has no explicit colour
pub const DEFAULT_COLOR: Color = Color("#1589EE");

/// Named palette entries an allocation may store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorKey {
    /// Blue
    Blue,
    /// Green
    Green,
    /// Red
    Red,
    /// Turquoise
    Turquoise,
    /// Navy
    Navy,
    /// Orange
    Orange,
    /// Purple
    Purple,
    /// Pink
    Pink,
    /// Brown
    Brown,
    /// Lime
    Lime,
    /// Gold
    Gold,
}

impl ColorKey {
    /// Every palette entry, in selector order
    pub const ALL: [ColorKey; 11] = [
        ColorKey::Blue,
        ColorKey::Green,
        ColorKey::Red,
        ColorKey::Turquoise,
        ColorKey::Navy,
        ColorKey::Orange,
        ColorKey::Purple,
        ColorKey::Pink,
        ColorKey::Brown,
        ColorKey::Lime,
        ColorKey::Gold,
    ];

    /// Resolve the palette entry to its colour value
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            ColorKey::Blue => DEFAULT_COLOR,
            ColorKey::Green => Color("#4AAD59"),
            ColorKey::Red => Color("#E52D34"),
            ColorKey::Turquoise => Color("#0DBCB9"),
            ColorKey::Navy => Color("#052F5F"),
            ColorKey::Orange => Color("#E56532"),
            ColorKey::Purple => Color("#62548E"),
            ColorKey::Pink => Color("#CA7CCE"),
            ColorKey::Brown => Color("#823E17"),
            ColorKey::Lime => Color("#7CCC47"),
            ColorKey::Gold => Color("#FCAF32"),
        }
    }

    /// Palette name as stored by the record service
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ColorKey::Blue => "Blue",
            ColorKey::Green => "Green",
            ColorKey::Red => "Red",
            ColorKey::Turquoise => "Turquoise",
            ColorKey::Navy => "Navy",
            ColorKey::Orange => "Orange",
            ColorKey::Purple => "Purple",
            ColorKey::Pink => "Pink",
            ColorKey::Brown => "Brown",
            ColorKey::Lime => "Lime",
            ColorKey::Gold => "Gold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn palette_values_are_distinct() {
        let values: HashSet<_> = ColorKey::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(values.len(), ColorKey::ALL.len());
    }

    #[test]
    fn blue_is_the_default() {
        assert_eq!(ColorKey::Blue.color(), DEFAULT_COLOR);
        assert_eq!(DEFAULT_COLOR.hex(), "#1589EE");
    }

    #[test]
    fn names_match_serde_representation() {
        for key in ColorKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.name()));
        }
    }
}
