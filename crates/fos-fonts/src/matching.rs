//! Variant matching
//!
//! Picks the available variant of a family that looks closest to a
//! requested weight/italic combination:
//!
//! 1. An exact italic match wins.
//! 2. Otherwise, when italic is requested, the first italic variant in
//!    catalog order is used, whatever its weight.
//! 3. Otherwise the upright variant with the nearest weight is used. On a
//!    tie the earlier variant in catalog order wins.
//! 4. A family without upright variants yields [`FALLBACK_WEIGHT`], which
//!    is not guaranteed to exist in that family.

use crate::font::{FontWeight, VariantKey};

/// Weight returned when a family has no upright variant to choose from
pub const FALLBACK_WEIGHT: FontWeight = FontWeight::NORMAL;

/// Desired weight and italic flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantQuery {
    /// Desired weight
    pub weight: FontWeight,
    /// Desired italic flag
    pub italic: bool,
}

impl VariantQuery {
    /// Create a new query
    pub fn new(weight: FontWeight, italic: bool) -> Self {
        Self { weight, italic }
    }

    /// Set weight
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Request italic
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Request upright
    pub fn normal(mut self) -> Self {
        self.italic = false;
        self
    }
}

impl Default for VariantQuery {
    fn default() -> Self {
        Self::new(FontWeight::NORMAL, false)
    }
}

impl From<VariantKey> for VariantQuery {
    fn from(key: VariantKey) -> Self {
        Self::new(key.weight, key.italic)
    }
}

/// Outcome of variant matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedVariant {
    pub weight: FontWeight,
    pub italic: bool,
}

impl ResolvedVariant {
    /// Variant key of the resolved variant
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.weight, self.italic)
    }
}

impl From<VariantKey> for ResolvedVariant {
    fn from(key: VariantKey) -> Self {
        Self {
            weight: key.weight,
            italic: key.italic,
        }
    }
}

/// Resolve a query against a family's variants, given in catalog order
pub fn resolve<I>(variants: I, query: VariantQuery) -> ResolvedVariant
where
    I: IntoIterator<Item = VariantKey>,
{
    let variants: Vec<VariantKey> = variants.into_iter().collect();

    if query.italic {
        let exact = VariantKey::italic(query.weight);
        if variants.contains(&exact) {
            return exact.into();
        }

        if let Some(&substitute) = variants.iter().find(|v| v.italic) {
            tracing::debug!("No {} variant, substituting {}", exact, substitute);
            return substitute.into();
        }
    }

    let upright = variants.iter().filter(|v| !v.italic).map(|v| v.weight);
    match closest_weight(upright, query.weight) {
        Some(weight) => ResolvedVariant { weight, italic: false },
        None => {
            tracing::warn!(
                "No upright variants to match weight {}, falling back to {}",
                query.weight,
                FALLBACK_WEIGHT
            );
            ResolvedVariant { weight: FALLBACK_WEIGHT, italic: false }
        }
    }
}

/// Nearest weight to `target`; the first one seen wins a tie
fn closest_weight(weights: impl Iterator<Item = FontWeight>, target: FontWeight) -> Option<FontWeight> {
    weights.reduce(|best, candidate| {
        if candidate.distance(target) < best.distance(target) {
            candidate
        } else {
            best
        }
    })
}
