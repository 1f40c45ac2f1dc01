use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

/// Raised when the pool cannot fill the requested number of cells.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("item pool holds {available} items but {required} are required")]
pub struct InsufficientItems {
    pub required: usize,
    pub available: usize,
}

/// Tile ideas shipped with the program. 28 entries for a 25-cell card, so
/// every rendered card leaves exactly three spares for the footer listing.
pub static DEFAULT_ITEMS: &[&str] = &[
    "Donk aka rims worth more than car",
    "American muscle car, pre-1980",
    "Honda touring bike with really loud music",
    "Pounding bass",
    "Driving in bus lane",
    "Driving with headlights off",
    "Driving over 60 miles an hour",
    "Person randomly wandering across road mid-block",
    "Ambulance with lights & siren",
    "Police car with lights & siren",
    "Fire truck with lights & siren",
    "Person wearing clogs",
    "Car with every window tinted",
    "Car with no license plate",
    "Friday evening. I've got my best sweatpants on",
    "Bollard/ building hit by vehicle in last 24 hours",
    "Outback, Tesla and Prius in a row - any order",
    "Car with no hubcaps",
    "Person wearing mask outdoors with no one around",
    "Someone brought their dog to the bar",
    "Two adjacent #7 buses. One full. One empty",
    "Car turning but no signal",
    "Two or more people riding a lime scooter on sidewalk",
    "Lost bicyclist going up rainier",
    "Stoplight is red but my car is still going",
    "Body panel different color from main car color",
    "Visibly damaged car driving down road",
    "Spoiler way too big for car",
];

/// Ordered, de-duplicated collection of candidate tile texts.
///
/// Construction drops repeated entries (first occurrence wins) so sampling
/// without replacement can never place the same text twice on one card.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPool {
    items: Vec<String>,
}

impl ItemPool {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for item in items {
            let item = item.into();
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Self { items: unique }
    }

    /// Load a pool from a file: a JSON string array for `.json` paths,
    /// otherwise plain text with one item per line (blank lines skipped).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read item file {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            let items: Vec<String> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON string array", path.display()))?;
            Ok(Self::new(items))
        } else {
            Ok(Self::new(
                raw.lines().map(str::trim).filter(|line| !line.is_empty()),
            ))
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Return the first `count` items, or fail when the pool is too small.
    ///
    /// This is a deterministic truncation, not sampling; callers use it to
    /// validate pool size before any card generation starts.
    pub fn select_subset(&self, count: usize) -> Result<&[String], InsufficientItems> {
        if self.items.len() < count {
            return Err(InsufficientItems {
                required: count,
                available: self.items.len(),
            });
        }
        Ok(&self.items[..count])
    }
}

impl Default for ItemPool {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_pool_has_28_unique_items() {
        let pool = ItemPool::default();
        assert_eq!(pool.len(), 28);
        for (i, a) in pool.iter().enumerate() {
            for b in pool.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn duplicates_are_dropped_keeping_first_occurrence() {
        let pool = ItemPool::new(["b", "a", "b", "c", "a"]);
        assert_eq!(pool.items(), &["b", "a", "c"]);
    }

    #[test]
    fn select_subset_returns_prefix() {
        let pool = ItemPool::new(["a", "b", "c", "d"]);
        let subset = pool.select_subset(2).unwrap();
        assert_eq!(subset, &["a", "b"]);
    }

    #[test]
    fn select_subset_boundary() {
        let pool = ItemPool::new(["a", "b", "c"]);
        assert_eq!(pool.select_subset(3).unwrap(), pool.items());
        assert_eq!(
            pool.select_subset(4),
            Err(InsufficientItems {
                required: 4,
                available: 3
            })
        );
    }

    #[test]
    fn load_plain_lines_skips_blanks() {
        let path = std::env::temp_dir().join("valley_bingo_pool_lines_test.txt");
        std::fs::write(&path, "one\n\n  two  \nthree\n").unwrap();
        let pool = ItemPool::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(pool.items(), &["one", "two", "three"]);
    }

    #[test]
    fn load_json_array() {
        let path = std::env::temp_dir().join("valley_bingo_pool_json_test.json");
        std::fs::write(&path, r#"["one", "two", "one"]"#).unwrap();
        let pool = ItemPool::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(pool.items(), &["one", "two"]);
    }
}
