//! Title to catalog position lookup.
//!
//! Titles are not unique in real catalogs (remakes, re-releases). The first
//! occurrence in catalog order owns the title; later rows with the same title
//! are still indexed by position in the matrix but cannot be queried by name.

use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    positions: HashMap<String, usize>,
    duplicates: usize,
}

impl TitleIndex {
    /// Index titles in catalog order
    pub fn build<'a>(titles: impl IntoIterator<Item = &'a str>) -> Self {
        let mut positions = HashMap::new();
        let mut duplicates = 0;

        for (position, title) in titles.into_iter().enumerate() {
            let owner = *positions.entry(title.to_string()).or_insert(position);
            if owner != position {
                debug!("Duplicate title {:?} at {}, keeping {}", title, position, owner);
                duplicates += 1;
            }
        }

        Self {
            positions,
            duplicates,
        }
    }

    /// Catalog position of the first row with this title
    pub fn get(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    /// Number of distinct titles
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Rows whose title was already taken by an earlier row
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
