//! Font weights, variant keys and the font catalog

mod catalog;

pub use catalog::{AssetRef, FontCatalog, FontFamily, FontVariant};

use std::fmt;
use std::str::FromStr;

use crate::{FontError, Result};

/// Suffix marking an italic variant key (`"700italic"`)
pub const ITALIC_MARKER: &str = "italic";

/// Alias used by Google Fonts catalogs for the 400 upright face
pub const REGULAR_ALIAS: &str = "regular";

/// Font weight (100-900)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const EXTRA_LIGHT: FontWeight = FontWeight(200);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const EXTRA_BOLD: FontWeight = FontWeight(800);
    pub const BLACK: FontWeight = FontWeight(900);
    
    /// Absolute distance between two weights
    pub fn distance(self, other: FontWeight) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        FontWeight(value)
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FontWeight {
    type Err = FontError;
    
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FontError::InvalidWeight(s.to_string()));
        }
        s.parse::<u16>()
            .map(FontWeight)
            .map_err(|_| FontError::InvalidWeight(s.to_string()))
    }
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    /// CSS keyword for this style
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => ITALIC_MARKER,
        }
    }
    
    pub fn is_italic(self) -> bool {
        self == FontStyle::Italic
    }
}

impl From<bool> for FontStyle {
    fn from(italic: bool) -> Self {
        if italic { FontStyle::Italic } else { FontStyle::Normal }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontStyle {
    type Err = FontError;
    
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            other => Err(FontError::InvalidStyle(other.to_string())),
        }
    }
}

/// A (weight, italic) combination within a family
///
/// Catalog keys are written as the decimal weight with an optional
/// `italic` suffix. The Google Fonts spellings `regular` and `italic`
/// stand for the 400 upright and 400 italic faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub weight: FontWeight,
    pub italic: bool,
}

impl VariantKey {
    /// Create a variant key
    pub fn new(weight: FontWeight, italic: bool) -> Self {
        Self { weight, italic }
    }
    
    /// Upright variant of the given weight
    pub fn normal(weight: FontWeight) -> Self {
        Self::new(weight, false)
    }
    
    /// Italic variant of the given weight
    pub fn italic(weight: FontWeight) -> Self {
        Self::new(weight, true)
    }
    
    pub fn style(&self) -> FontStyle {
        FontStyle::from(self.italic)
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            write!(f, "{}{}", self.weight, ITALIC_MARKER)
        } else {
            write!(f, "{}", self.weight)
        }
    }
}

impl FromStr for VariantKey {
    type Err = FontError;
    
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        match key {
            REGULAR_ALIAS => return Ok(VariantKey::normal(FontWeight::NORMAL)),
            ITALIC_MARKER => return Ok(VariantKey::italic(FontWeight::NORMAL)),
            _ => {}
        }
        
        let (digits, italic) = match key.strip_suffix(ITALIC_MARKER) {
            Some(rest) => (rest, true),
            None => (key, false),
        };
        
        let weight = digits
            .parse::<FontWeight>()
            .map_err(|_| FontError::InvalidVariantKey(s.to_string()))?;
        Ok(VariantKey::new(weight, italic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_parse_plain_weight() {
        let key: VariantKey = "700".parse().unwrap();
        assert_eq!(key, VariantKey::normal(FontWeight::BOLD));
    }
    
    #[test]
    fn test_parse_italic_weight() {
        let key: VariantKey = "300italic".parse().unwrap();
        assert_eq!(key, VariantKey::italic(FontWeight::LIGHT));
    }
    
    #[test]
    fn test_parse_google_aliases() {
        assert_eq!("regular".parse::<VariantKey>().unwrap(), VariantKey::normal(FontWeight::NORMAL));
        assert_eq!("italic".parse::<VariantKey>().unwrap(), VariantKey::italic(FontWeight::NORMAL));
    }
    
    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("bold".parse::<VariantKey>(), Err(FontError::InvalidVariantKey(_))));
        assert!("italic700".parse::<VariantKey>().is_err());
        assert!("".parse::<VariantKey>().is_err());
        assert!("-400".parse::<VariantKey>().is_err());
    }
    
    #[test]
    fn test_display_is_canonical() {
        assert_eq!(VariantKey::normal(FontWeight(400)).to_string(), "400");
        assert_eq!(VariantKey::italic(FontWeight(700)).to_string(), "700italic");
        assert_eq!("regular".parse::<VariantKey>().unwrap().to_string(), "400");
    }
    
    #[test]
    fn test_style_keywords() {
        assert_eq!("Italic".parse::<FontStyle>().unwrap(), FontStyle::Italic);
        assert_eq!(FontStyle::from(false).to_string(), "normal");
        assert!("oblique".parse::<FontStyle>().is_err());
    }
    
    #[test]
    fn test_weight_distance() {
        assert_eq!(FontWeight(300).distance(FontWeight(550)), 250);
        assert_eq!(FontWeight(700).distance(FontWeight(550)), 150);
        assert_eq!(FontWeight(400).distance(FontWeight(400)), 0);
    }
    
    #[test]
    fn test_weight_parse() {
        assert_eq!(" 900 ".parse::<FontWeight>().unwrap(), FontWeight::BLACK);
        assert!(matches!("heavy".parse::<FontWeight>(), Err(FontError::InvalidWeight(_))));
        assert!("99999".parse::<FontWeight>().is_err());
    }
}
