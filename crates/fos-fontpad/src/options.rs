//! Choices offered by the family, weight and style selectors

use fos_fonts::{FontCatalog, FontStyle, Result};

/// One entry of a selection control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Every family, in catalog order
pub fn family_options(catalog: &FontCatalog) -> Vec<SelectOption> {
    catalog
        .family_names()
        .map(|name| SelectOption::new(name, name))
        .collect()
}

/// Upright weights of a family, in catalog order
///
/// The value is the numeric weight; the label is the key as the catalog
/// spells it (`regular` stays `regular`).
pub fn weight_options(catalog: &FontCatalog, family: &str) -> Result<Vec<SelectOption>> {
    let family = catalog.family(family)?;
    Ok(family
        .variants()
        .iter()
        .filter(|v| !v.variant.italic)
        .map(|v| SelectOption::new(v.variant.weight.to_string(), v.key.as_str()))
        .collect())
}

/// Italic and normal
pub fn italic_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new(FontStyle::Italic.as_str(), "Italic"),
        SelectOption::new(FontStyle::Normal.as_str(), "Normal"),
    ]
}
