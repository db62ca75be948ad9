//! Tag color allocation for the log renderer.

use std::collections::{HashMap, VecDeque};

use colored::Color;

/// Colors handed out to tags, least recently used first.
const ROTATION: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Assigns each tag a stable color.
///
/// There are only a handful of colors, so a new tag takes the color used
/// least recently. A tag keeps its color once assigned, even when a later tag
/// is handed the same one.
#[derive(Debug, Clone)]
pub struct TagPalette {
    known: HashMap<String, Color>,
    recency: VecDeque<Color>,
}

impl Default for TagPalette {
    fn default() -> Self {
        Self {
            known: HashMap::new(),
            recency: ROTATION.into_iter().collect(),
        }
    }
}

impl TagPalette {
    /// Palette with fixed colors for some tags.
    pub fn with_presets(presets: impl IntoIterator<Item = (String, Color)>) -> Self {
        let mut palette = Self::default();
        palette.known.extend(presets);
        palette
    }

    pub fn allocate(&mut self, tag: &str) -> Color {
        let color = match self.known.get(tag) {
            Some(color) => *color,
            None => {
                let color = self.recency.front().copied().unwrap_or(Color::White);
                self.known.insert(tag.to_string(), color);
                color
            }
        };
        // Preset colors outside the rotation don't take part in recency.
        if let Some(pos) = self.recency.iter().position(|c| *c == color) {
            self.recency.remove(pos);
            self.recency.push_back(color);
        }
        color
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_tags_take_rotation_in_order() {
        let mut palette = TagPalette::default();
        let colors: Vec<Color> = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|tag| palette.allocate(tag))
            .collect();
        assert_eq!(colors, ROTATION.to_vec());
    }

    #[test]
    fn test_repeated_tag_keeps_color() {
        let mut palette = TagPalette::default();
        assert_eq!(palette.allocate("wifi"), Color::Red);
        assert_eq!(palette.allocate("ble"), Color::Green);
        assert_eq!(palette.allocate("wifi"), Color::Red);
    }

    #[test]
    fn test_eighth_tag_reuses_least_recently_used() {
        let mut palette = TagPalette::default();
        for tag in ["a", "b", "c", "d", "e", "f", "g"] {
            palette.allocate(tag);
        }
        // Touch "a" so that "b" (green) becomes least recently used.
        palette.allocate("a");
        assert_eq!(palette.allocate("h"), Color::Green);
        assert_eq!(palette.allocate("b"), Color::Green);
    }

    #[test]
    fn test_presets() {
        let mut palette = TagPalette::with_presets([
            ("BOOT".to_string(), Color::BrightRed),
            ("net".to_string(), Color::Cyan),
        ]);
        assert_eq!(palette.allocate("BOOT"), Color::BrightRed);
        assert_eq!(palette.allocate("net"), Color::Cyan);
        assert_eq!(palette.allocate("other"), Color::Red);
    }
}
