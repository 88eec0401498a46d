//! Editor state and its transitions
//!
//! Every transition takes the current state by reference and returns the
//! next one. Side effects (persistence, font activation, redraws) belong to
//! [`crate::TextEditor`].

use std::fmt;

use fos_fonts::{FontCatalog, FontError, FontStyle, FontWeight, Result, VariantKey, VariantQuery};

use crate::config::EditorConfig;
use crate::storage::PersistedState;

/// Text and font selection of the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Text content
    pub text: String,
    /// Selected family
    pub family: String,
    /// Selected weight
    pub weight: FontWeight,
    /// Italic flag
    pub italic: bool,
}

impl EditorState {
    /// State of a fresh session
    pub fn initial(catalog: &FontCatalog, config: &EditorConfig) -> Self {
        let family = match config.default_family.as_deref() {
            Some(name) if catalog.contains_family(name) => name,
            Some(name) => {
                tracing::warn!("Default family {} is not in the catalog", name);
                catalog.default_family().name()
            }
            None => catalog.default_family().name(),
        };

        Self {
            text: String::new(),
            family: family.to_string(),
            weight: config.default_weight,
            italic: false,
        }
    }

    /// Rebuild a session from persisted values, falling back per key
    pub fn restore(catalog: &FontCatalog, config: &EditorConfig, persisted: &PersistedState) -> Self {
        let mut state = Self::initial(catalog, config);

        if let Some(text) = &persisted.text {
            state.text = text.clone();
        }

        if let Some(family) = &persisted.family {
            if catalog.contains_family(family) {
                state.family = family.clone();
            } else {
                tracing::warn!("Persisted family {} is not in the catalog, using {}", family, state.family);
            }
        }

        if let Some(weight) = &persisted.weight {
            match weight.parse() {
                Ok(weight) => state.weight = weight,
                Err(e) => tracing::warn!("Ignoring persisted weight: {}", e),
            }
        }

        state.italic = persisted.italic;
        state
    }

    /// Current variant key
    pub fn variant(&self) -> VariantKey {
        VariantKey::new(self.weight, self.italic)
    }

    /// Current style
    pub fn style(&self) -> FontStyle {
        FontStyle::from(self.italic)
    }

    /// Replace the text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Switch family, keeping the look as close as the new family allows
    pub fn with_family(&self, catalog: &FontCatalog, family: &str) -> Result<Self> {
        let resolved = catalog.resolve(family, VariantQuery::new(self.weight, self.italic))?;

        if resolved.key() != self.variant() {
            tracing::debug!("{} has no {}, using {}", family, self.variant(), resolved.key());
        }

        Ok(Self {
            text: self.text.clone(),
            family: family.to_string(),
            weight: resolved.weight,
            italic: resolved.italic,
        })
    }

    /// Pick a weight of the current family
    ///
    /// Italic stays on only if the family has an italic face at that weight.
    pub fn with_weight(&self, catalog: &FontCatalog, weight: FontWeight) -> Result<Self> {
        let family = catalog.family(&self.family)?;
        if !family.contains(VariantKey::normal(weight)) {
            return Err(FontError::UnknownVariant {
                family: self.family.clone(),
                variant: weight.to_string(),
            });
        }

        Ok(Self {
            weight,
            italic: self.italic && family.contains(VariantKey::italic(weight)),
            ..self.clone()
        })
    }

    /// Toggle italic
    ///
    /// Turning italic on is reverted when the current weight has no italic
    /// face. No other weight is tried.
    pub fn with_italic(&self, catalog: &FontCatalog, italic: bool) -> Result<Self> {
        let family = catalog.family(&self.family)?;
        let italic = if italic && !family.contains(VariantKey::italic(self.weight)) {
            tracing::debug!("{} has no {}italic, staying upright", self.family, self.weight);
            false
        } else {
            italic
        };

        Ok(Self {
            italic,
            ..self.clone()
        })
    }

    /// Style the rendering layer applies to the preview
    pub fn preview_style(&self) -> PreviewStyle {
        PreviewStyle {
            family: self.family.clone(),
            weight: self.weight,
            style: self.style(),
        }
    }
}

/// Font styling of the preview text
///
/// Displays as a CSS declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewStyle {
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl fmt::Display for PreviewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "font-family: \"{}\"; font-weight: {}; font-style: {}",
            self.family.replace('"', "\\\""),
            self.weight,
            self.style
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FontCatalog {
        FontCatalog::from_json(
            r#"{
                "ABeeZee": { "400": "a400", "700": "a700", "400italic": "a400i" },
                "Lato": { "400": "l400", "400italic": "l400i" },
                "Oswald": { "400": "o400", "700": "o700" }
            }"#,
        )
        .unwrap()
    }

    fn state(family: &str, weight: u16, italic: bool) -> EditorState {
        EditorState {
            text: "sample".to_string(),
            family: family.to_string(),
            weight: FontWeight(weight),
            italic,
        }
    }

    #[test]
    fn test_initial_state() {
        let catalog = catalog();
        let initial = EditorState::initial(&catalog, &EditorConfig::default());
        assert_eq!(initial.family, "ABeeZee");
        assert_eq!(initial.weight, FontWeight::NORMAL);
        assert!(!initial.italic);
        assert!(initial.text.is_empty());
    }

    #[test]
    fn test_initial_state_with_configured_family() {
        let catalog = catalog();
        let config = EditorConfig {
            default_family: Some("Lato".to_string()),
            ..EditorConfig::default()
        };
        assert_eq!(EditorState::initial(&catalog, &config).family, "Lato");

        let config = EditorConfig {
            default_family: Some("Papyrus".to_string()),
            ..EditorConfig::default()
        };
        assert_eq!(EditorState::initial(&catalog, &config).family, "ABeeZee");
    }

    #[test]
    fn test_family_switch_resolves_closest() {
        let catalog = catalog();
        let next = state("ABeeZee", 700, false).with_family(&catalog, "Lato").unwrap();
        assert_eq!(next.family, "Lato");
        assert_eq!(next.weight, FontWeight(400));
        assert!(!next.italic);
        assert_eq!(next.text, "sample");
    }

    #[test]
    fn test_family_switch_keeps_italic_when_available() {
        let catalog = catalog();
        let next = state("ABeeZee", 400, true).with_family(&catalog, "Lato").unwrap();
        assert_eq!(next.variant(), VariantKey::italic(FontWeight::NORMAL));

        let next = state("ABeeZee", 400, true).with_family(&catalog, "Oswald").unwrap();
        assert_eq!(next.variant(), VariantKey::normal(FontWeight::NORMAL));
    }

    #[test]
    fn test_family_switch_unknown_family() {
        let catalog = catalog();
        let result = state("ABeeZee", 400, false).with_family(&catalog, "Papyrus");
        assert!(matches!(result, Err(FontError::UnknownFamily(_))));
    }

    #[test]
    fn test_weight_switch_preserves_available_italic() {
        let catalog = catalog();
        let next = state("ABeeZee", 700, true).with_weight(&catalog, FontWeight(400)).unwrap();
        assert!(next.italic);

        let next = state("ABeeZee", 400, true).with_weight(&catalog, FontWeight(700)).unwrap();
        assert_eq!(next.weight, FontWeight(700));
        assert!(!next.italic);
    }

    #[test]
    fn test_weight_switch_does_not_turn_italic_on() {
        let catalog = catalog();
        let next = state("ABeeZee", 700, false).with_weight(&catalog, FontWeight(400)).unwrap();
        assert!(!next.italic);
    }

    #[test]
    fn test_weight_switch_rejects_missing_weight() {
        let catalog = catalog();
        let result = state("Lato", 400, false).with_weight(&catalog, FontWeight(900));
        assert!(matches!(result, Err(FontError::UnknownVariant { .. })));
    }

    #[test]
    fn test_italic_toggle_rejected_without_face() {
        let catalog = catalog();
        let next = state("Oswald", 400, false).with_italic(&catalog, true).unwrap();
        assert!(!next.italic);

        // No substitute weight is tried either
        let next = state("ABeeZee", 700, false).with_italic(&catalog, true).unwrap();
        assert_eq!(next.variant(), VariantKey::normal(FontWeight::BOLD));
    }

    #[test]
    fn test_italic_toggle() {
        let catalog = catalog();
        let on = state("ABeeZee", 400, false).with_italic(&catalog, true).unwrap();
        assert!(on.italic);
        let off = on.with_italic(&catalog, false).unwrap();
        assert!(!off.italic);
    }

    #[test]
    fn test_restore_falls_back_per_key() {
        let catalog = catalog();
        let persisted = PersistedState {
            text: Some("kept".to_string()),
            family: Some("Papyrus".to_string()),
            weight: Some("bold".to_string()),
            italic: true,
        };
        let restored = EditorState::restore(&catalog, &EditorConfig::default(), &persisted);
        assert_eq!(restored.text, "kept");
        assert_eq!(restored.family, "ABeeZee");
        assert_eq!(restored.weight, FontWeight::NORMAL);
        assert!(restored.italic);
    }

    #[test]
    fn test_preview_style_css() {
        let style = state("ABeeZee", 700, true).preview_style();
        assert_eq!(
            style.to_string(),
            "font-family: \"ABeeZee\"; font-weight: 700; font-style: italic"
        );
    }
}
