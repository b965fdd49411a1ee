use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours, stepping the hue by the golden
/// angle so colour `i` is the same whatever `n` is.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (200.0 + i as f32 * 137.508) % 360.0;
            hsl_to_color32(Hsl::new(hue, 0.6, 0.5))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous scales for value-graded bars
// ---------------------------------------------------------------------------

/// Sequential colour scales used to shade bars by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Light to dark blue.
    Blues,
    /// Purple through teal to yellow.
    Viridis,
}

impl ColorScale {
    /// Colour at position `t` in `0.0..=1.0`.
    pub fn at(self, t: f32) -> Color32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        let hsl = match self {
            ColorScale::Blues => Hsl::new(lerp(205.0, 215.0), lerp(0.55, 0.7), lerp(0.8, 0.32)),
            ColorScale::Viridis => Hsl::new(lerp(280.0, 55.0), lerp(0.55, 0.9), lerp(0.3, 0.55)),
        };
        hsl_to_color32(hsl)
    }

    /// Colour for `value` relative to the `[min, max]` range of a series.
    pub fn for_value(self, value: f64, min: f64, max: f64) -> Color32 {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.at(1.0);
        }
        self.at(((value - min) / span) as f32)
    }
}

// ---------------------------------------------------------------------------
// Color mapping: experience level → Color32
// ---------------------------------------------------------------------------

/// Maps categories (experience levels) to distinct colours.
///
/// Categories from the canonical order get their colours first so a level
/// keeps its colour whatever the current filter shows.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(canonical: &[String], present: &[String]) -> Self {
        let mut categories: Vec<&String> = canonical.iter().collect();
        categories.extend(present.iter().filter(|p| !canonical.contains(*p)));

        let palette = generate_palette(categories.len());
        let mapping = categories
            .into_iter()
            .zip(palette)
            .map(|(c, color)| (c.clone(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn level_colours_are_stable_across_filters() {
        let canonical: Vec<String> = ["junior", "pleno", "senior"].map(String::from).to_vec();
        let all = ColorMap::new(&canonical, &["senior".to_string()]);
        let other = ColorMap::new(&canonical, &["junior".to_string(), "intern".to_string()]);
        assert_eq!(all.color_for("senior"), other.color_for("senior"));
        assert_ne!(other.color_for("intern"), Color32::GRAY);
        assert_eq!(all.color_for("intern"), Color32::GRAY);
    }

    #[test]
    fn scale_endpoints_differ() {
        assert_ne!(ColorScale::Blues.at(0.0), ColorScale::Blues.at(1.0));
        assert_eq!(ColorScale::Viridis.for_value(5.0, 5.0, 5.0), ColorScale::Viridis.at(1.0));
    }
}
