// Catalog loading and indexing.
//
// Reads the item catalog CSV (columns: name, premium Y/N, tier) once at
// startup and builds in-memory indexes so the allocation engine can filter by
// name, root family, and tier with set lookups instead of full scans.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One entry in the static item catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Unique display name.
    pub name: String,
    /// Whether this is a premium variant (the constrained subcategory).
    pub premium: bool,
    /// Cost/weight class. Governs budget consumption and draw probability.
    pub tier: u32,
    /// Grouping key linking a base item to its premium variants. At most one
    /// member of a family may ever be owned by a single participant.
    pub root_family: String,
}

/// The immutable item catalog plus its lookup indexes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    by_name: HashMap<String, usize>,
    by_family: HashMap<String, Vec<usize>>,
    by_tier: HashMap<u32, Vec<usize>>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("duplicate item name in catalog: {0}")]
    DuplicateName(String),

    #[error("bad tier value `{value}` for item {name}")]
    BadTier { name: String, value: String },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw catalog CSV row. Extra columns are absorbed via `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RawItemRow {
    name: String,
    #[serde(default)]
    premium: String,
    tier: String,
    /// Absorb any extra columns the catalog sheet includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Root family derivation
// ---------------------------------------------------------------------------

/// Derive the family key for an item: the base name shared by an item and its
/// premium variants.
///
/// Variant names carry a `mega `/`primal ` prefix and sometimes an ` x`/` y`
/// suffix; the base name is what remains after stripping them. Non-variant
/// names map to themselves (lowercased and trimmed).
pub fn normalize_root(name: &str, premium: bool) -> String {
    let mut root = name.trim().to_lowercase();

    let is_primal = root.starts_with("primal ");
    if !premium && !is_primal {
        return root;
    }

    if let Some(stripped) = root.strip_prefix("mega ") {
        root = stripped.trim().to_string();
    } else if let Some(stripped) = root.strip_prefix("primal ") {
        root = stripped.trim().to_string();
    }

    if let Some(stripped) = root.strip_suffix(" x").or_else(|| root.strip_suffix(" y")) {
        root = stripped.trim().to_string();
    }

    root
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

impl Catalog {
    /// Build a catalog from raw (name, premium, tier) triples, deriving root
    /// families and indexes. Used directly by tests; `load` wraps the CSV path.
    pub fn from_rows(rows: Vec<(String, bool, u32)>) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();

        for (name, premium, tier) in rows {
            let root_family = normalize_root(&name, premium);
            let idx = catalog.items.len();
            if catalog.by_name.insert(name.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateName(name));
            }
            catalog.by_family.entry(root_family.clone()).or_default().push(idx);
            catalog.by_tier.entry(tier).or_default().push(idx);
            catalog.items.push(Item {
                name,
                premium,
                tier,
                root_family,
            });
        }

        Ok(catalog)
    }

    /// Load the catalog from a CSV file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let path_display = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
            path: path_display.clone(),
            source: e,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for record in reader.deserialize::<RawItemRow>() {
            let row = record.map_err(|e| CatalogError::Csv {
                path: path_display.clone(),
                source: e,
            })?;
            let premium = row.premium.trim().eq_ignore_ascii_case("y");
            let tier = row.tier.trim().parse::<u32>().map_err(|_| CatalogError::BadTier {
                name: row.name.clone(),
                value: row.tier.clone(),
            })?;
            rows.push((row.name, premium, tier));
        }

        let catalog = Self::from_rows(rows)?;
        info!("Catalog loaded: {} items from {}", catalog.len(), path_display);
        Ok(catalog)
    }

    /// All items, in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by its exact name.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.by_name.get(name).map(|&idx| &self.items[idx])
    }

    /// Family key for a named item, if it exists in the catalog.
    pub fn root_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|item| item.root_family.as_str())
    }

    /// All members of a root family.
    pub fn family_members(&self, root: &str) -> impl Iterator<Item = &Item> {
        self.by_family
            .get(root)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.items[idx])
    }

    /// All items of a given tier.
    pub fn tier_members(&self, tier: u32) -> impl Iterator<Item = &Item> {
        self.by_tier
            .get(&tier)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.items[idx])
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
