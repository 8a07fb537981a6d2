use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Genre → colour mapping
// ---------------------------------------------------------------------------

/// Stable genre colours, built once per dataset so a genre keeps its colour
/// no matter which filters are active.
#[derive(Debug, Clone)]
pub struct GenreColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl GenreColors {
    pub fn new(genres: &[String]) -> Self {
        let mapping = genres
            .iter()
            .cloned()
            .zip(generate_palette(genres.len()))
            .collect();
        GenreColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping
            .get(genre)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(6);
        assert_eq!(colours.len(), 6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_genre_falls_back_to_gray() {
        let colors = GenreColors::new(&["Drama".to_string(), "Crime".to_string()]);
        assert_ne!(colors.color_for("Drama"), colors.color_for("Crime"));
        assert_eq!(colors.color_for("Western"), Color32::GRAY);
    }
}
