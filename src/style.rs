use std::path::Path;

use eframe::egui::Color32;
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Map style document
// ---------------------------------------------------------------------------

/// Declarative style document for the map view, loaded before the map is
/// constructed. A missing or malformed document aborts initialization; the
/// map is never built against a half-read style.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MapStyle {
    /// Map background, hex `#rrggbb`.
    pub background: HexColor,
    pub marker: MarkerStyle,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerStyle {
    /// Stroke color, hex `#rrggbb`.
    pub color: HexColor,
    /// Fill color, hex `#rrggbb`.
    pub fill_color: HexColor,
    pub radius: f32,
    pub weight: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        MapStyle {
            background: HexColor(Color32::from_rgb(0xf4, 0xf4, 0xf4)),
            marker: MarkerStyle::default(),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        // The raster variant's circle-marker constants.
        MarkerStyle {
            color: HexColor(Color32::from_rgb(0xc1, 0x12, 0x1f)),
            fill_color: HexColor(Color32::WHITE),
            radius: 6.0,
            weight: 1.2,
        }
    }
}

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("reading style document: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing style document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load and parse a style document. Any failure is fatal to map
/// construction; callers surface it and stop.
pub fn load_style(path: &Path) -> Result<MapStyle, StyleError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

// ---------------------------------------------------------------------------
// Hex color
// ---------------------------------------------------------------------------

/// A `Color32` that deserializes from `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub Color32);

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s)
            .map(HexColor)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color '{s}'")))
    }
}

fn parse_hex(s: &str) -> Option<Color32> {
    let hex = s.strip_prefix('#')?;
    // Byte indexing below requires ASCII; anything else is malformed anyway.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_marker_matches_raster_constants() {
        let m = MarkerStyle::default();
        assert_eq!(m.color.0, Color32::from_rgb(0xc1, 0x12, 0x1f));
        assert_eq!(m.fill_color.0, Color32::WHITE);
        assert_eq!(m.radius, 6.0);
        assert_eq!(m.weight, 1.2);
    }

    #[test]
    fn parses_document_with_partial_fields() {
        let style: MapStyle = serde_json::from_str(
            r##"{ "background": "#101418", "marker": { "radius": 8.0 } }"##,
        )
        .unwrap();
        assert_eq!(style.background.0, Color32::from_rgb(0x10, 0x14, 0x18));
        assert_eq!(style.marker.radius, 8.0);
        // untouched fields keep their defaults
        assert_eq!(style.marker.weight, 1.2);
    }

    #[test]
    fn rejects_bad_hex_color() {
        let err = serde_json::from_str::<MapStyle>(r##"{ "background": "red" }"##);
        assert!(err.is_err());
        let err = serde_json::from_str::<MapStyle>(r##"{ "background": "#12345" }"##);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_multibyte_color_without_panicking() {
        // '€' is 3 bytes, so "a€ab" passes a byte-length check of 6.
        assert_eq!(parse_hex("#a\u{20ac}ab"), None);
        let err = serde_json::from_str::<MapStyle>("{ \"background\": \"#a\u{20ac}ab\" }");
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_style(Path::new("/nonexistent/style.json")).unwrap_err();
        assert!(matches!(err, StyleError::Io(_)));
    }
}
