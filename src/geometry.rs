//! Shared geometric and color primitives, plus the size-driven geometry of the control.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized tick shape, mapped into the padded square on every recompute.
pub const TICK_SHAPE: [Point; 3] = [
    Point::new(0.2, 0.3),
    Point::new(0.5, 0.6),
    Point::new(0.95, 0.05),
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// 32-bit ARGB color, serialized as `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArgbColor(pub u32);

impl ArgbColor {
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Channels as `(r, g, b, a)` in `0.0..=1.0`, the layout cairo expects.
    pub fn to_rgba_f64(self) -> (f64, f64, f64, f64) {
        let channel = |value: u8| f64::from(value) / 255.0;
        (
            channel(self.red()),
            channel(self.green()),
            channel(self.blue()),
            channel(self.alpha()),
        )
    }

    /// Parses `#AARRGGBB` or `#RRGGBB` (opaque). The leading `#` is optional.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let raw = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            8 => Some(Self(raw)),
            6 => Some(Self(0xFF00_0000 | raw)),
            _ => None,
        }
    }
}

impl fmt::Display for ArgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl TryFrom<String> for ArgbColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid ARGB color `{value}`"))
    }
}

impl From<ArgbColor> for String {
    fn from(color: ArgbColor) -> Self {
        color.to_string()
    }
}

/// Stroke ratios relative to the square size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryRatios {
    pub circle_stroke: f32,
    pub circle_extent: f32,
    pub tick_stroke: f32,
}

impl Default for GeometryRatios {
    fn default() -> Self {
        Self {
            circle_stroke: 0.1,
            circle_extent: 0.4,
            tick_stroke: 0.14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometrySnapshot {
    pub tick_path: Vec<Point>,
    pub tick_length: f32,
    pub tick_stroke_width: f32,
    pub circle_center: Point,
    pub circle_radius: f32,
    pub circle_stroke_width: f32,
}

impl GeometrySnapshot {
    pub fn circle_bounds(&self) -> Bounds {
        let Point { x, y } = self.circle_center;
        Bounds {
            left: x - self.circle_radius,
            top: y - self.circle_radius,
            right: x + self.circle_radius,
            bottom: y + self.circle_radius,
        }
    }
}

/// Rebuilds the whole snapshot for a square of `size` pixels.
///
/// Non-positive or NaN sizes degenerate to zero-length paths and zero radii.
pub fn recompute(size: f32, shadow_radius: f32, ratios: &GeometryRatios) -> GeometrySnapshot {
    let size = size.max(0.0);
    let shadow_radius = shadow_radius.max(0.0);

    let circle_stroke_width = size * ratios.circle_stroke;
    let circle_radius =
        (size * ratios.circle_extent - circle_stroke_width * 0.5 - shadow_radius).max(0.0);
    let center = size * 0.5;

    let tick_stroke_width = size * ratios.tick_stroke;
    let padding = tick_stroke_width * 0.5 + shadow_radius;
    let cropped = (size - padding * 2.0).max(0.0);
    let tick_path = TICK_SHAPE
        .iter()
        .map(|point| Point::new(point.x * cropped + padding, point.y * cropped + padding))
        .collect::<Vec<_>>();
    let tick_length = polyline_length(&tick_path);

    GeometrySnapshot {
        tick_path,
        tick_length,
        tick_stroke_width,
        circle_center: Point::new(center, center),
        circle_radius,
        circle_stroke_width,
    }
}

pub fn polyline_length(points: &[Point]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(pair[1]))
        .sum()
}
