//! fOS Fonts - Font Catalog & Variant Matching
//!
//! This crate provides the font data model behind the fOS Fontpad editor:
//! - Font catalogs loaded from `{ family: { variant: asset } }` documents
//! - Variant keys (`"400"`, `"700italic"`, `"regular"`)
//! - Nearest-variant resolution when a weight/italic pair is unavailable

pub mod font;
pub mod matching;

pub use font::{AssetRef, FontCatalog, FontFamily, FontStyle, FontVariant, FontWeight, VariantKey};
pub use matching::{resolve, ResolvedVariant, VariantQuery, FALLBACK_WEIGHT};

/// Font catalog error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Unknown font family: {0}")]
    UnknownFamily(String),
    
    #[error("Font family {family} has no variant {variant}")]
    UnknownVariant { family: String, variant: String },
    
    #[error("Font family {0} has no variants")]
    NoVariantsAvailable(String),
    
    #[error("Invalid font weight: {0:?}")]
    InvalidWeight(String),
    
    #[error("Invalid font style: {0:?}")]
    InvalidStyle(String),
    
    #[error("Invalid variant key: {0:?}")]
    InvalidVariantKey(String),
    
    #[error("Duplicate font family: {0}")]
    DuplicateFamily(String),
    
    #[error("Font family {family} lists variant {variant} more than once")]
    DuplicateVariant { family: String, variant: String },
    
    #[error("Font catalog is empty")]
    EmptyCatalog,
    
    #[error("Failed to parse font catalog: {0}")]
    Parse(#[from] serde_json::Error),
    
    #[error("Failed to read font catalog: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
