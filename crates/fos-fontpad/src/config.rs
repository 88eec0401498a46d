//! Editor Configuration

use std::path::PathBuf;

use fos_fonts::FontWeight;

/// Environment variable naming the family used when nothing is persisted
pub const DEFAULT_FAMILY_VAR: &str = "FONTPAD_DEFAULT_FAMILY";

/// Environment variable naming the weight used when nothing is persisted
pub const DEFAULT_WEIGHT_VAR: &str = "FONTPAD_DEFAULT_WEIGHT";

/// Environment variable naming the storage file
pub const STORAGE_VAR: &str = "FONTPAD_STORAGE";

/// Editor configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Family for a fresh session (first catalog family when unset)
    pub default_family: Option<String>,
    
    /// Weight for a fresh session
    pub default_weight: FontWeight,
    
    /// File backing persisted state (in-memory when unset)
    pub storage_path: Option<PathBuf>,
}

impl EditorConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }
    
    /// Read configuration through a variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        
        if let Some(family) = var(DEFAULT_FAMILY_VAR).filter(|f| !f.trim().is_empty()) {
            config.default_family = Some(family.trim().to_string());
        }
        
        if let Some(weight) = var(DEFAULT_WEIGHT_VAR) {
            match weight.parse() {
                Ok(weight) => config.default_weight = weight,
                Err(e) => tracing::warn!("Ignoring {}: {}", DEFAULT_WEIGHT_VAR, e),
            }
        }
        
        if let Some(path) = var(STORAGE_VAR).filter(|p| !p.is_empty()) {
            config.storage_path = Some(PathBuf::from(path));
        }
        
        config
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_family: None,
            default_weight: FontWeight::NORMAL,
            storage_path: None,
        }
    }
}
