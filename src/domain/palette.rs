//! Colours, fonts, garment sizes and approved logos offered by the designer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Colour parsing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("Colour must be #rgb or #rrggbb, got '{0}'")]
    InvalidFormat(String),
}

/// A normalised `#rrggbb` colour (always lowercase, always 7 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional)
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidFormat(value.to_string()));
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(ColorError::InvalidFormat(value.to_string())),
        };

        Ok(HexColor(format!("#{}", expanded.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Built-in palette colour by its display name
    pub fn named(name: &str) -> Option<Self> {
        JERSEY_COLORS
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| HexColor(c.value.to_string()))
    }

    pub(crate) fn from_static(value: &'static str) -> Self {
        // Only used for literals in this crate, which are already normalised.
        HexColor(value.to_string())
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named swatch in the designer palette
#[derive(Debug, Clone, Copy)]
pub struct Swatch {
    pub name: &'static str,
    pub value: &'static str,
}

pub const JERSEY_COLORS: [Swatch; 10] = [
    Swatch { name: "Black", value: "#1a1a1a" },
    Swatch { name: "White", value: "#f5f5f5" },
    Swatch { name: "Navy", value: "#1e3a5f" },
    Swatch { name: "Red", value: "#c41e3a" },
    Swatch { name: "Forest Green", value: "#228b22" },
    Swatch { name: "Royal Blue", value: "#4169e1" },
    Swatch { name: "Purple", value: "#6b3fa0" },
    Swatch { name: "Gold", value: "#ffd700" },
    Swatch { name: "Orange", value: "#ff6b35" },
    Swatch { name: "Pink", value: "#ff69b4" },
];

/// A font choice: display name plus the CSS font stack used when rendering
#[derive(Debug, Clone, Copy)]
pub struct FontChoice {
    pub name: &'static str,
    pub stack: &'static str,
}

pub const JERSEY_FONTS: [FontChoice; 6] = [
    FontChoice { name: "Bold Standard", stack: "Arial Black, sans-serif" },
    FontChoice { name: "Athletic", stack: "Impact, sans-serif" },
    FontChoice { name: "Classic", stack: "Georgia, serif" },
    FontChoice { name: "Modern", stack: "Montserrat, sans-serif" },
    FontChoice { name: "Street", stack: "Permanent Marker, cursive" },
    FontChoice { name: "Clean", stack: "Helvetica, Arial, sans-serif" },
];

pub const DEFAULT_NAME_FONT: &str = "Arial Black, sans-serif";
pub const DEFAULT_NUMBER_FONT: &str = "Impact, sans-serif";

// ============================================================================
// Garment sizes
// ============================================================================

/// Jersey garment size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GarmentSize {
    #[serde(rename = "XS")]
    Xs,
    #[serde(rename = "S")]
    S,
    #[default]
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "2XL")]
    Xxl,
    #[serde(rename = "3XL")]
    Xxxl,
    #[serde(rename = "4XL")]
    Xxxxl,
}

impl GarmentSize {
    pub const ALL: [GarmentSize; 8] = [
        GarmentSize::Xs,
        GarmentSize::S,
        GarmentSize::M,
        GarmentSize::L,
        GarmentSize::Xl,
        GarmentSize::Xxl,
        GarmentSize::Xxxl,
        GarmentSize::Xxxxl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GarmentSize::Xs => "XS",
            GarmentSize::S => "S",
            GarmentSize::M => "M",
            GarmentSize::L => "L",
            GarmentSize::Xl => "XL",
            GarmentSize::Xxl => "2XL",
            GarmentSize::Xxxl => "3XL",
            GarmentSize::Xxxxl => "4XL",
        }
    }

    /// Parse a size label, case-insensitive
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.label().eq_ignore_ascii_case(wanted))
    }

    /// Uniform preview scale for this size. Cosmetic only.
    pub fn preview_scale(&self) -> f64 {
        match self {
            GarmentSize::Xs => 0.85,
            GarmentSize::S => 0.9,
            GarmentSize::M => 1.0,
            GarmentSize::L => 1.1,
            GarmentSize::Xl => 1.2,
            GarmentSize::Xxl => 1.3,
            GarmentSize::Xxxl => 1.4,
            GarmentSize::Xxxxl => 1.5,
        }
    }
}

impl std::fmt::Display for GarmentSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Approved logos
// ============================================================================

/// Admin-approved logo the designer may place on the chest
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ApprovedLogo {
    pub id: &'static str,
    pub name: &'static str,
    pub image_url: &'static str,
    pub category: &'static str,
}

pub const APPROVED_LOGOS: [ApprovedLogo; 7] = [
    ApprovedLogo { id: "logo-1", name: "8TWO Logo", image_url: "/logos/8twologo.jpg", category: "brand" },
    ApprovedLogo { id: "logo-2", name: "8TWO Wordmark", image_url: "/logos/8two-wordmark.svg", category: "brand" },
    ApprovedLogo { id: "logo-3", name: "8TWO Icon", image_url: "/logos/8two-icon.svg", category: "brand" },
    ApprovedLogo { id: "logo-4", name: "8TWO Shield", image_url: "/logos/8two-shield.svg", category: "brand" },
    ApprovedLogo { id: "logo-5", name: "Premier Sports", image_url: "/logos/premier-sports.svg", category: "partner" },
    ApprovedLogo { id: "logo-6", name: "Athletic Club", image_url: "/logos/athletic-club.svg", category: "partner" },
    ApprovedLogo { id: "logo-7", name: "Youth League", image_url: "/logos/youth-league.svg", category: "league" },
];

pub fn approved_logo(id: &str) -> Option<&'static ApprovedLogo> {
    APPROVED_LOGOS.iter().find(|logo| logo.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_normalises() {
        assert_eq!(HexColor::parse("#FFF").unwrap().as_str(), "#ffffff");
        assert_eq!(HexColor::parse("1A1A1A").unwrap().as_str(), "#1a1a1a");
        assert!(HexColor::parse("#12345").is_err());
        assert!(HexColor::parse("#gggggg").is_err());
        assert!(HexColor::parse("").is_err());
    }

    #[test]
    fn test_hex_color_serde() {
        let color: HexColor = serde_json::from_str("\"#ABC\"").unwrap();
        assert_eq!(color.as_str(), "#aabbcc");
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#aabbcc\"");
    }

    #[test]
    fn test_named_palette_colors() {
        assert_eq!(HexColor::named("navy").unwrap().as_str(), "#1e3a5f");
        assert!(HexColor::named("Teal").is_none());
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(GarmentSize::from_label("2xl"), Some(GarmentSize::Xxl));
        assert_eq!(GarmentSize::from_label(" m "), Some(GarmentSize::M));
        assert_eq!(GarmentSize::from_label("5XL"), None);
        assert_eq!(GarmentSize::Xxxxl.to_string(), "4XL");
    }

    #[test]
    fn test_preview_scale_table() {
        assert_eq!(GarmentSize::Xs.preview_scale(), 0.85);
        assert_eq!(GarmentSize::M.preview_scale(), 1.0);
        assert_eq!(GarmentSize::Xxxxl.preview_scale(), 1.5);
    }
}
