//! Fill and stroke styling shared by all node kinds.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Sticky-note palette addressed by the color keys suggestion producers emit.
pub const STICKY_PALETTE: &[(&str, SerializableColor)] = &[
    ("yellow", SerializableColor::new(0xFE, 0xF3, 0x9D, 255)),
    ("pink", SerializableColor::new(0xFB, 0xCF, 0xE8, 255)),
    ("blue", SerializableColor::new(0xBF, 0xDB, 0xFE, 255)),
    ("green", SerializableColor::new(0xBB, 0xF7, 0xD0, 255)),
    ("purple", SerializableColor::new(0xDD, 0xD6, 0xFE, 255)),
    ("orange", SerializableColor::new(0xFE, 0xD7, 0xAA, 255)),
];

/// Look up a palette color by key, falling back to the first entry.
pub fn palette_color(key: &str) -> SerializableColor {
    STICKY_PALETTE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .or_else(|| STICKY_PALETTE.first())
        .map(|(_, color)| *color)
        .unwrap_or_else(SerializableColor::white)
}

/// How a node's interior is painted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    #[default]
    None,
    Solid { color: SerializableColor },
    LinearGradient {
        from: SerializableColor,
        to: SerializableColor,
        /// Gradient direction in degrees, 0 = left to right.
        angle: f64,
    },
    /// Image URL stretched over the node's box.
    Image { url: String },
}

impl Fill {
    pub fn solid(color: SerializableColor) -> Self {
        Self::Solid { color }
    }

    /// Solid color as a peniko Color, if this is a solid fill.
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Fill::Solid { color } => Some((*color).into()),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }
}

/// Where the stroke sits relative to the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeAlign {
    #[default]
    Center,
    Inside,
    Outside,
}

impl StrokeAlign {
    /// Offset of the stroke centerline from the outline, positive outward.
    pub fn centerline_offset(self, stroke_width: f64) -> f64 {
        match self {
            StrokeAlign::Center => 0.0,
            StrokeAlign::Inside => -stroke_width / 2.0,
            StrokeAlign::Outside => stroke_width / 2.0,
        }
    }
}

/// Style properties common to every node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(default)]
    pub fill: Fill,
    pub stroke_color: SerializableColor,
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_align: StrokeAlign,
}

impl NodeStyle {
    /// Style for a sticky note with the given background.
    pub fn sticky(color: SerializableColor) -> Self {
        Self {
            fill: Fill::solid(color),
            stroke_width: 0.0,
            ..Self::default()
        }
    }

    /// Style for stroke-only nodes (pencil, line, arrow, text).
    pub fn stroke_only() -> Self {
        Self {
            fill: Fill::None,
            ..Self::default()
        }
    }

    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            fill: Fill::solid(SerializableColor::white()),
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            stroke_align: StrokeAlign::Center,
        }
    }
}
