use std::collections::{BTreeMap, BTreeSet};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: platform → Color32
// ---------------------------------------------------------------------------

/// Maps each platform to a stable colour, shared by every chart and by the
/// filter checkboxes.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map from the dataset's platform set.
    pub fn new(platforms: &BTreeSet<String>) -> Self {
        let palette = generate_palette(platforms.len());
        let mapping = platforms
            .iter()
            .zip(palette)
            .map(|(p, c)| (p.clone(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a platform; grey for unknown names.
    pub fn color_for(&self, platform: &str) -> Color32 {
        self.mapping.get(platform).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platforms_get_distinct_stable_colors() {
        let platforms: BTreeSet<String> =
            ["Facebook", "Instagram", "TikTok"].map(String::from).into();
        let map = ColorMap::new(&platforms);
        let colors: BTreeSet<_> = platforms
            .iter()
            .map(|p| map.color_for(p).to_array())
            .collect();
        assert_eq!(colors.len(), 3);
        assert_eq!(map.color_for("Instagram"), map.color_for("Instagram"));
        assert_eq!(map.color_for("unknown"), Color32::GRAY);
    }
}
