//! Theme tokens for a catalog page.
//!
//! A catalog stores only its overrides; the tokens a page renders with are
//! computed by [`ThemeTokens::resolve`] from a preset plus those overrides. The
//! result is a plain value handed to the rendering boundary, which applies it
//! once (e.g. as custom properties on the page root).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vitrine_core::ValueObject;

/// Prefix of every generated CSS custom property.
const TOKEN_PREFIX: &str = "--vt-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Classic,
    Dark,
    Pastel,
}

struct Palette {
    primary: &'static str,
    accent: &'static str,
    background: &'static str,
    text: &'static str,
    font_family: &'static str,
    radius_px: u8,
}

impl ThemePreset {
    fn palette(self) -> Palette {
        match self {
            ThemePreset::Classic => Palette {
                primary: "#1f2937",
                accent: "#f59e0b",
                background: "#ffffff",
                text: "#111827",
                font_family: "Inter, sans-serif",
                radius_px: 8,
            },
            ThemePreset::Dark => Palette {
                primary: "#f9fafb",
                accent: "#22d3ee",
                background: "#0f172a",
                text: "#e5e7eb",
                font_family: "Inter, sans-serif",
                radius_px: 8,
            },
            ThemePreset::Pastel => Palette {
                primary: "#7c3aed",
                accent: "#f472b6",
                background: "#fdf4ff",
                text: "#3b0764",
                font_family: "Poppins, sans-serif",
                radius_px: 16,
            },
        }
    }
}

/// Per-catalog theme customization. Unset fields inherit from the preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub preset: ThemePreset,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    pub radius_px: Option<u8>,
}

/// Resolved design tokens, keyed by CSS custom property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeTokens(BTreeMap<String, String>);

impl ValueObject for ThemeTokens {}

impl ThemeTokens {
    /// Compute the tokens for a catalog's overrides.
    ///
    /// Color overrides that are not `#rgb` / `#rrggbb` hex are ignored and the
    /// preset value is used instead.
    pub fn resolve(overrides: &ThemeOverrides) -> Self {
        let palette = overrides.preset.palette();
        let color = |value: &Option<String>, fallback: &'static str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|c| is_hex_color(c))
                .map(str::to_ascii_lowercase)
                .unwrap_or_else(|| fallback.to_string())
        };

        let primary = color(&overrides.primary_color, palette.primary);
        let accent = color(&overrides.accent_color, palette.accent);
        let background = color(&overrides.background_color, palette.background);
        let text = color(&overrides.text_color, palette.text);
        let font_family = overrides
            .font_family
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty() && !f.contains([';', '{', '}']))
            .unwrap_or(palette.font_family)
            .to_string();
        let radius = overrides.radius_px.unwrap_or(palette.radius_px);

        let mut tokens = BTreeMap::new();
        let mut put = |name: &str, value: String| {
            tokens.insert(format!("{TOKEN_PREFIX}{name}"), value);
        };
        put("on-primary", contrast_text(&primary).to_string());
        put("on-accent", contrast_text(&accent).to_string());
        put("primary", primary);
        put("accent", accent);
        put("background", background);
        put("text", text);
        put("font-family", font_family);
        put("radius", format!("{radius}px"));

        Self(tokens)
    }

    /// Token value by name without the `--vt-` prefix (e.g. `"primary"`).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(&format!("{TOKEN_PREFIX}{name}"))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as one CSS rule scoped to `selector`.
    pub fn to_css(&self, selector: &str) -> String {
        let body: String = self
            .iter()
            .map(|(name, value)| format!("  {name}: {value};\n"))
            .collect();
        format!("{selector} {{\n{body}}}\n")
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn channel(hex: &str, idx: usize) -> f64 {
    let raw = if hex.len() == 3 {
        let c = &hex[idx..idx + 1];
        u8::from_str_radix(&c.repeat(2), 16).unwrap_or(0)
    } else {
        u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16).unwrap_or(0)
    };
    let c = f64::from(raw) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Black or white, whichever reads better on `color` (WCAG relative luminance).
fn contrast_text(color: &str) -> &'static str {
    let hex = color.trim_start_matches('#');
    let luminance = 0.2126 * channel(hex, 0) + 0.7152 * channel(hex, 1) + 0.0722 * channel(hex, 2);
    if luminance > 0.179 { "#000000" } else { "#ffffff" }
}
