//! Drawing Surface Module
//! The panel-oriented plotting API the renderer drives, plus the value types
//! passed through it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Relative padding applied to auto-scaled axes on each side.
pub const AUTO_MARGIN: f64 = 0.05;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("No panel selected")]
    NoActivePanel,
    #[error("Panel {index} is outside a {rows}x{cols} grid")]
    PanelOutOfRange {
        index: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Series length mismatch: {xs} x values, {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },
    #[error("Invalid axis range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[error("Backend error: {0}")]
    Backend(String),
}

/// One panel of a `rows x cols` grid, indexed row-major from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSlot {
    pub rows: usize,
    pub cols: usize,
    pub index: usize,
}

impl PanelSlot {
    pub const fn new(rows: usize, cols: usize, index: usize) -> Self {
        Self { rows, cols, index }
    }

    pub fn is_valid(&self) -> bool {
        self.rows
            .checked_mul(self.cols)
            .is_some_and(|panels| self.index < panels)
    }
}

/// Axis limits: derived from the data, or fixed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<(f64, f64)>", into = "Option<(f64, f64)>")]
pub enum AxisRange {
    #[default]
    Auto,
    Fixed { min: f64, max: f64 },
}

impl AxisRange {
    pub fn fixed(min: f64, max: f64) -> Self {
        AxisRange::Fixed { min, max }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, AxisRange::Auto)
    }

    /// Displayed limits given the finite data extent, if any.
    pub fn resolve(&self, extent: Option<(f64, f64)>) -> (f64, f64) {
        match *self {
            AxisRange::Fixed { min, max } if min == max => widen(min),
            AxisRange::Fixed { min, max } => (min, max),
            AxisRange::Auto => match extent {
                None => (0.0, 1.0),
                Some((lo, hi)) if lo == hi => widen(lo),
                Some((lo, hi)) => pad(lo, hi),
            },
        }
    }
}

/// Pad `[lo, hi]` by the auto margin, keeping the span representable.
fn pad(lo: f64, hi: f64) -> (f64, f64) {
    let margin = hi * AUTO_MARGIN - lo * AUTO_MARGIN;
    let padded = (lo - margin, hi + margin);
    if (padded.1 - padded.0).is_finite() {
        padded
    } else if (hi - lo).is_finite() {
        (lo, hi)
    } else {
        // Span exceeds f64::MAX, so lo < 0 < hi and the midpoint is within MAX / 2.
        let mid = lo / 2.0 + hi / 2.0;
        let half = f64::MAX / 2.0;
        (mid - half, mid + half)
    }
}

fn widen(value: f64) -> (f64, f64) {
    let delta = if value == 0.0 {
        0.5
    } else {
        value.abs() * AUTO_MARGIN
    };
    (
        (value - delta).max(f64::MIN),
        (value + delta).min(f64::MAX),
    )
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        AxisRange::Fixed { min, max }
    }
}

impl From<Option<(f64, f64)>> for AxisRange {
    fn from(range: Option<(f64, f64)>) -> Self {
        range.map_or(AxisRange::Auto, AxisRange::from)
    }
}

impl From<AxisRange> for Option<(f64, f64)> {
    fn from(range: AxisRange) -> Self {
        match range {
            AxisRange::Auto => None,
            AxisRange::Fixed { min, max } => Some((min, max)),
        }
    }
}

/// RGB color, written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const BLACK: SeriesColor = SeriesColor::rgb(0, 0, 0);
    pub const WHITE: SeriesColor = SeriesColor::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for SeriesColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color '{}'", value))
    }
}

impl From<SeriesColor> for String {
    fn from(color: SeriesColor) -> Self {
        color.to_string()
    }
}

/// Legend label and color of one series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesStyle {
    pub label: Option<String>,
    /// `None` takes the next color of the surface's cycle.
    pub color: Option<SeriesColor>,
}

impl SeriesStyle {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            color: None,
        }
    }

    pub fn with_color(mut self, color: SeriesColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// A figure made of panels that plotting calls are directed at.
///
/// Calls other than `select_panel` apply to the most recently selected panel.
pub trait DrawingSurface {
    fn select_panel(&mut self, slot: PanelSlot) -> Result<(), SurfaceError>;

    fn plot_line(&mut self, xs: &[f64], ys: &[f64], style: &SeriesStyle)
        -> Result<(), SurfaceError>;

    fn scatter(&mut self, xs: &[f64], ys: &[f64], style: &SeriesStyle) -> Result<(), SurfaceError>;

    fn set_x_label(&mut self, label: &str) -> Result<(), SurfaceError>;

    fn set_y_label(&mut self, label: &str) -> Result<(), SurfaceError>;

    fn set_x_range(&mut self, range: AxisRange) -> Result<(), SurfaceError>;

    fn set_y_range(&mut self, range: AxisRange) -> Result<(), SurfaceError>;

    fn show_legend(&mut self) -> Result<(), SurfaceError>;

    fn set_title(&mut self, title: &str) -> Result<(), SurfaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn auto_range_pads_extent() {
        let (lo, hi) = AxisRange::Auto.resolve(Some((0.0, 10.0)));
        assert_relative_eq!(lo, -0.5);
        assert_relative_eq!(hi, 10.5);
    }

    #[test]
    fn auto_range_without_data() {
        assert_eq!(AxisRange::Auto.resolve(None), (0.0, 1.0));
    }

    #[test]
    fn degenerate_extent_is_widened() {
        assert_eq!(AxisRange::Auto.resolve(Some((0.0, 0.0))), (-0.5, 0.5));

        let (lo, hi) = AxisRange::Auto.resolve(Some((-4.0, -4.0)));
        assert_relative_eq!(lo, -4.2);
        assert_relative_eq!(hi, -3.8);
    }

    #[test]
    fn fixed_range_ignores_data() {
        let range = AxisRange::fixed(0.0, 10.0);
        assert_eq!(range.resolve(Some((-100.0, 100.0))), (0.0, 10.0));
        assert_eq!(range.resolve(None), (0.0, 10.0));
    }

    #[test]
    fn fixed_range_keeps_inverted_order() {
        assert_eq!(AxisRange::fixed(10.0, 0.0).resolve(Some((0.0, 5.0))), (10.0, 0.0));
    }

    #[test]
    fn auto_range_near_f64_limits_stays_finite() {
        let (lo, hi) = AxisRange::Auto.resolve(Some((-1e308, 1e308)));
        assert!(lo.is_finite() && hi.is_finite());
        assert!((hi - lo).is_finite());
        assert!(lo < 0.0 && hi > 0.0);

        let (lo, hi) = AxisRange::Auto.resolve(Some((1e307, 1.7e308)));
        assert!((hi - lo).is_finite());
        assert!(lo <= 1e307 && hi >= 1.7e308);

        let (lo, hi) = AxisRange::Auto.resolve(Some((f64::MAX, f64::MAX)));
        assert_eq!(hi, f64::MAX);
        assert!(lo < hi && lo.is_finite());
    }

    #[test]
    fn fixed_range_with_equal_bounds_is_widened() {
        let (lo, hi) = AxisRange::fixed(2.0, 2.0).resolve(None);
        assert_relative_eq!(lo, 1.9);
        assert_relative_eq!(hi, 2.1);
    }

    #[test]
    fn range_from_optional_pair() {
        assert_eq!(AxisRange::from(None), AxisRange::Auto);
        assert_eq!(
            AxisRange::from(Some((1.0, 2.0))),
            AxisRange::Fixed { min: 1.0, max: 2.0 }
        );
    }

    #[test]
    fn color_hex_parsing() {
        assert_eq!(
            SeriesColor::from_hex("#1f77b4"),
            Some(SeriesColor::rgb(0x1f, 0x77, 0xb4))
        );
        assert_eq!(SeriesColor::from_hex("ff0000"), Some(SeriesColor::rgb(255, 0, 0)));
        assert_eq!(SeriesColor::from_hex("#ff00"), None);
        assert_eq!(SeriesColor::from_hex("#gg0000"), None);
        assert_eq!(SeriesColor::BLACK.to_string(), "#000000");
    }

    #[test]
    fn panel_slot_bounds() {
        assert!(PanelSlot::new(1, 2, 1).is_valid());
        assert!(!PanelSlot::new(1, 2, 2).is_valid());
        assert!(!PanelSlot::new(0, 0, 0).is_valid());
        assert!(!PanelSlot::new(usize::MAX, 2, 0).is_valid());
    }
}
