//! Cross-section label catalog and the section registry built from it

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Label used for cross-sections the catalog does not know
pub const DEFAULT_SECTION_LABEL: &str = "IPE 300";

/// Mapping from engineering cross-section names to target section labels.
///
/// Lookup is by exact name; anything else falls back to `default_label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionCatalog {
    pub default_label: String,
    pub labels: BTreeMap<String, String>,
}

impl SectionCatalog {
    /// Catalog with no entries
    pub fn empty(default_label: &str) -> Self {
        Self {
            default_label: default_label.to_string(),
            labels: BTreeMap::new(),
        }
    }

    /// Add or replace an entry
    pub fn with_label(mut self, name: &str, label: &str) -> Self {
        self.labels.insert(name.to_string(), label.to_string());
        self
    }

    /// Target label for a cross-section name
    pub fn label_for(&self, name: &str) -> &str {
        self.labels
            .get(name)
            .map(String::as_str)
            .unwrap_or(&self.default_label)
    }
}

impl Default for SectionCatalog {
    /// Round bars and the guy-wire rope used by the tower generator
    fn default() -> Self {
        Self::empty(DEFAULT_SECTION_LABEL)
            .with_label("D32", "R 32")
            .with_label("D14", "R 14")
            .with_label("D25", "R 25")
            .with_label("D16", "R 16")
            .with_label("SWR_1x7_D9", "Cable 10.00")
    }
}

/// A section allocated in the target model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredSection {
    pub no: u32,
    /// Engineering name from the document
    pub name: String,
    /// Label in the target model
    pub label: String,
}

/// Cross-section name to section number, in first-seen order.
///
/// Numbers are dense and start at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<RegisteredSection>,
    by_name: HashMap<String, u32>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name if unseen.
    ///
    /// Returns the new entry, or `None` when the name was already registered.
    pub fn register(&mut self, name: &str, catalog: &SectionCatalog) -> Option<&RegisteredSection> {
        if self.by_name.contains_key(name) {
            return None;
        }
        let no = self.sections.len() as u32 + 1;
        self.by_name.insert(name.to_string(), no);
        self.sections.push(RegisteredSection {
            no,
            name: name.to_string(),
            label: catalog.label_for(name).to_string(),
        });
        self.sections.last()
    }

    /// Section number of a registered name
    pub fn get(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// Registered sections in allocation order
    pub fn sections(&self) -> &[RegisteredSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
