//! Font catalog: families, their variants and asset references
//!
//! The catalog document is a nested JSON object:
//!
//! ```json
//! {
//!   "ABeeZee": { "400": "https://fonts/abeezee.ttf", "400italic": "https://fonts/abeezee-i.ttf" },
//!   "Lato":    { "300": "lato-300.ttf", "700": "lato-700.ttf" }
//! }
//! ```
//!
//! Document order of families and variants is kept; variant matching
//! depends on it.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use super::{FontWeight, VariantKey};
use crate::matching::{self, ResolvedVariant, VariantQuery};
use crate::{FontError, Result};

/// Reference to a loadable font asset (URL or path)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AssetRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AssetRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One variant entry of a family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontVariant {
    /// Key as written in the catalog (`"regular"`, `"700italic"`)
    pub key: String,
    /// Parsed weight and italic flag
    pub variant: VariantKey,
    /// Asset backing this variant
    pub asset: AssetRef,
}

/// A font family and its available variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    name: String,
    variants: Vec<FontVariant>,
}

impl FontFamily {
    /// Build a family from `(variant key, asset)` pairs in catalog order
    pub fn new<I, K, A>(name: impl Into<String>, variants: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: Into<AssetRef>,
    {
        let name = name.into();
        let mut entries: Vec<FontVariant> = Vec::new();

        for (key, asset) in variants {
            let key = key.into();
            let variant: VariantKey = key.parse()?;
            if entries.iter().any(|v| v.variant == variant) {
                return Err(FontError::DuplicateVariant {
                    family: name,
                    variant: key,
                });
            }
            entries.push(FontVariant {
                key,
                variant,
                asset: asset.into(),
            });
        }

        Ok(Self { name, variants: entries })
    }

    /// Family name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All variants in catalog order
    pub fn variants(&self) -> &[FontVariant] {
        &self.variants
    }

    /// Variant keys in catalog order
    pub fn variant_keys(&self) -> impl Iterator<Item = VariantKey> + '_ {
        self.variants.iter().map(|v| v.variant)
    }

    /// Upright weights in catalog order
    pub fn weights(&self) -> impl Iterator<Item = FontWeight> + '_ {
        self.variants
            .iter()
            .filter(|v| !v.variant.italic)
            .map(|v| v.variant.weight)
    }

    /// Look up a variant entry
    pub fn get(&self, key: VariantKey) -> Option<&FontVariant> {
        self.variants.iter().find(|v| v.variant == key)
    }

    /// Check whether the family offers a variant
    pub fn contains(&self, key: VariantKey) -> bool {
        self.get(key).is_some()
    }

    /// Asset reference for a variant
    pub fn asset(&self, key: VariantKey) -> Option<&AssetRef> {
        self.get(key).map(|v| &v.asset)
    }

    /// Check whether any italic variant exists
    pub fn has_italic(&self) -> bool {
        self.variants.iter().any(|v| v.variant.italic)
    }

    /// Closest available variant to the query
    pub fn resolve(&self, query: VariantQuery) -> ResolvedVariant {
        matching::resolve(self.variant_keys(), query)
    }

    /// Number of variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if the family has no variants
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Catalog of font families
#[derive(Debug, Clone)]
pub struct FontCatalog {
    families: Vec<FontFamily>,
    /// Index by family name
    by_name: HashMap<String, usize>,
}

impl FontCatalog {
    /// Build a catalog from families in display order
    pub fn new(families: Vec<FontFamily>) -> Result<Self> {
        if families.is_empty() {
            return Err(FontError::EmptyCatalog);
        }

        let mut by_name = HashMap::with_capacity(families.len());
        for (index, family) in families.iter().enumerate() {
            if by_name.insert(family.name.clone(), index).is_some() {
                return Err(FontError::DuplicateFamily(family.name.clone()));
            }
            if family.is_empty() {
                tracing::warn!("Font family {} has no variants", family.name);
            }
        }

        Ok(Self { families, by_name })
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: OrderedMap<OrderedMap<String>> = serde_json::from_str(json)?;

        let families = raw
            .0
            .into_iter()
            .map(|(name, variants)| FontFamily::new(name, variants.0))
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self::new(families)?;
        tracing::debug!("Parsed font catalog with {} families", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!("Loaded {} font families from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Families in catalog order
    pub fn families(&self) -> &[FontFamily] {
        &self.families
    }

    /// Family names in catalog order
    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|f| f.name())
    }

    /// First family of the catalog
    pub fn default_family(&self) -> &FontFamily {
        &self.families[0]
    }

    /// Look up a family without failing
    pub fn get(&self, name: &str) -> Option<&FontFamily> {
        self.by_name.get(name).map(|&i| &self.families[i])
    }

    /// Look up a family
    pub fn family(&self, name: &str) -> Result<&FontFamily> {
        self.get(name)
            .ok_or_else(|| FontError::UnknownFamily(name.to_string()))
    }

    /// Check whether a family exists
    pub fn contains_family(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Asset reference for a family variant
    pub fn asset(&self, family: &str, key: VariantKey) -> Result<&AssetRef> {
        let entry = self.family(family)?;
        if entry.is_empty() {
            return Err(FontError::NoVariantsAvailable(family.to_string()));
        }
        entry.asset(key).ok_or_else(|| FontError::UnknownVariant {
            family: family.to_string(),
            variant: key.to_string(),
        })
    }

    /// Resolve the closest variant of a family
    pub fn resolve(&self, family: &str, query: VariantQuery) -> Result<ResolvedVariant> {
        Ok(self.family(family)?.resolve(query))
    }

    /// Number of families
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// JSON object decoded as a list of entries, keeping document order
struct OrderedMap<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> std::result::Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}
