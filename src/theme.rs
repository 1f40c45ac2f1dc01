use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::card::CARD_SIZE;

/// Fixed text printed on every card.
///
/// Defaults reproduce the Rainier Avenue card; a JSON file with any subset of
/// the fields overrides them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Theme {
    /// Decorative page title.
    pub title: String,
    /// Marker shown in the center cell instead of an item.
    pub free_marker: String,
    /// One letter per grid column, printed above the item rows.
    pub column_letters: String,
    /// Footer paragraphs printed below the grid, in order.
    pub footer_lines: Vec<String>,
    /// Label introducing the unused-item listing at the page bottom.
    pub unused_label: String,
    /// Separator placed between unused items.
    pub separator: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: "Rainier Avenue".to_string(),
            free_marker: "Free".to_string(),
            column_letters: "BINGO".to_string(),
            footer_lines: vec![
                "Celebrating the things that make the Valley, the Valley.".to_string(),
                "Feedback // Tile ideas // Shade @rainier_valley_bingo (IG)".to_string(),
            ],
            unused_label: "Slow night? Here are some more tile ideas - or add your own: "
                .to_string(),
            separator: " | ".to_string(),
        }
    }
}

impl Theme {
    /// Load theme overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        let theme: Theme = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid theme file", path.display()))?;
        theme.validate()?;
        Ok(theme)
    }

    fn validate(&self) -> Result<()> {
        let letters = self.column_letters.chars().count();
        if letters != CARD_SIZE {
            return Err(anyhow!(
                "column_letters must hold exactly {} characters, got {}",
                CARD_SIZE,
                letters
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_yields_defaults() {
        let theme: Theme = serde_json::from_str("{}").unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let theme: Theme = serde_json::from_str(r#"{"title": "Beacon Hill"}"#).unwrap();
        assert_eq!(theme.title, "Beacon Hill");
        assert_eq!(theme.free_marker, "Free");
        assert_eq!(theme.column_letters, "BINGO");
    }

    #[test]
    fn load_rejects_wrong_letter_count() {
        let path = std::env::temp_dir().join("valley_bingo_theme_test.json");
        std::fs::write(&path, r#"{"column_letters": "BING"}"#).unwrap();
        let result = Theme::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
