//! Plotters Figure
//! A [`DrawingSurface`] that records panel contents and draws them with plotters.
//!
//! Layout:
//! 1. The canvas is split evenly into the selected `rows x cols` grid.
//! 2. Each panel gets its caption, a mesh with axis descriptions, line series,
//!    circle markers, and a legend box when one was requested.

use crate::charts::surface::{
    AxisRange, DrawingSurface, PanelSlot, SeriesColor, SeriesStyle, SurfaceError,
};
use crate::config::FigureStyle;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Color cycle for series drawn without an explicit color.
pub const PALETTE: [SeriesColor; 5] = [
    SeriesColor::rgb(31, 119, 180),  // Blue
    SeriesColor::rgb(255, 127, 14),  // Orange
    SeriesColor::rgb(44, 160, 44),   // Green
    SeriesColor::rgb(214, 39, 40),   // Red
    SeriesColor::rgb(148, 103, 189), // Purple
];

const LEGEND_SWATCH: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Markers,
}

/// One plotted series with its color already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub kind: SeriesKind,
    pub points: Vec<(f64, f64)>,
    pub label: Option<String>,
    pub color: SeriesColor,
}

/// Recorded contents of one panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    pub series: Vec<PlottedSeries>,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub legend: bool,
    next_color: usize,
}

impl Panel {
    /// Finite extent of all series along x.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        Self::extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
    }

    /// Finite extent of all series along y.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        Self::extent(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
    }

    pub fn x_limits(&self) -> (f64, f64) {
        self.x_range.resolve(self.x_extent())
    }

    pub fn y_limits(&self) -> (f64, f64) {
        self.y_range.resolve(self.y_extent())
    }

    fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
        values
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn has_labels(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }

    fn resolve_color(&mut self, style: &SeriesStyle) -> SeriesColor {
        style.color.unwrap_or_else(|| {
            let color = PALETTE[self.next_color % PALETTE.len()];
            self.next_color += 1;
            color
        })
    }
}

/// Multi-panel figure rendered through plotters.
#[derive(Debug, Clone, Default)]
pub struct PlottersFigure {
    style: FigureStyle,
    grid: (usize, usize),
    panels: Vec<Panel>,
    active: Option<usize>,
}

impl PlottersFigure {
    pub fn new(style: FigureStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    /// Grid shape as `(rows, cols)`; `(0, 0)` before any panel is selected.
    pub fn grid(&self) -> (usize, usize) {
        self.grid
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn active_panel(&self) -> Option<usize> {
        self.active
    }

    fn active_mut(&mut self) -> Result<&mut Panel, SurfaceError> {
        let index = self.active.ok_or(SurfaceError::NoActivePanel)?;
        self.panels
            .get_mut(index)
            .ok_or(SurfaceError::NoActivePanel)
    }

    fn push_series(
        &mut self,
        kind: SeriesKind,
        xs: &[f64],
        ys: &[f64],
        style: &SeriesStyle,
    ) -> Result<(), SurfaceError> {
        if xs.len() != ys.len() {
            return Err(SurfaceError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let panel = self.active_mut()?;
        let color = panel.resolve_color(style);
        panel.series.push(PlottedSeries {
            kind,
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
            label: style.label.clone(),
            color,
        });
        Ok(())
    }

    fn check_range(range: AxisRange) -> Result<AxisRange, SurfaceError> {
        match range {
            // Inverted bounds are kept and draw a reversed axis.
            AxisRange::Fixed { min, max } if !(max - min).is_finite() => {
                Err(SurfaceError::InvalidRange { min, max })
            }
            _ => Ok(range),
        }
    }

    /// Draw every panel onto `root` and present it.
    pub fn draw_on<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), SurfaceError> {
        log::debug!(
            "Drawing {}x{} figure with {} panels",
            self.grid.0,
            self.grid.1,
            self.panels.len()
        );

        root.fill(&to_rgb(self.style.background))
            .map_err(backend_error)?;

        if !self.panels.is_empty() {
            let areas = root.split_evenly(self.grid);
            for (index, (panel, area)) in self.panels.iter().zip(areas.iter()).enumerate() {
                log::trace!("Drawing panel {} ({} series)", index, panel.series.len());
                self.draw_panel(panel, area)?;
            }
        }

        root.present().map_err(backend_error)
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        panel: &Panel,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), SurfaceError> {
        let style = &self.style;
        let (x_min, x_max) = panel.x_limits();
        let (y_min, y_max) = panel.y_limits();

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50);
        if !panel.title.is_empty() {
            builder.caption(&panel.title, self.font(style.title_font_size));
        }
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(backend_error)?;

        let mut mesh = chart.configure_mesh();
        mesh.label_style(self.font(style.label_font_size))
            .axis_desc_style(self.font(style.label_font_size));
        if let Some(label) = &panel.x_label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &panel.y_label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw().map_err(backend_error)?;

        let line_width = style.line_width;
        let radius = style.marker_radius;

        for series in &panel.series {
            let color = to_rgb(series.color);
            match series.kind {
                SeriesKind::Line => {
                    let anno = chart
                        .draw_series(LineSeries::new(
                            series.points.iter().copied(),
                            color.stroke_width(line_width),
                        ))
                        .map_err(backend_error)?;
                    if let Some(label) = &series.label {
                        anno.label(label.as_str()).legend(move |(x, y)| {
                            PathElement::new(
                                vec![(x, y), (x + LEGEND_SWATCH, y)],
                                color.stroke_width(line_width),
                            )
                        });
                    }
                }
                SeriesKind::Markers => {
                    let anno = chart
                        .draw_series(
                            series
                                .points
                                .iter()
                                .map(|&point| Circle::new(point, radius, color.filled())),
                        )
                        .map_err(backend_error)?;
                    if let Some(label) = &series.label {
                        anno.label(label.as_str()).legend(move |(x, y)| {
                            Circle::new((x + LEGEND_SWATCH / 2, y), radius, color.filled())
                        });
                    }
                }
            }
        }

        if panel.legend && panel.has_labels() {
            chart
                .configure_series_labels()
                .label_font(self.font(style.label_font_size))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(backend_error)?;
        }

        Ok(())
    }

    fn font(&self, size: u32) -> FontDesc<'_> {
        (self.style.font_family.as_str(), f64::from(size)).into_font()
    }

    /// Render the figure as an SVG document of the configured size.
    pub fn render_svg(&self) -> Result<String, SurfaceError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.style.width, self.style.height))
                .into_drawing_area();
            self.draw_on(&root)?;
        }
        Ok(svg)
    }

    /// Render the figure into an RGB raster of the configured size.
    #[cfg(feature = "bitmap")]
    pub fn render_rgb(&self) -> Result<image::RgbImage, SurfaceError> {
        let (width, height) = (self.style.width, self.style.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw_on(&root)?;
        }
        image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| SurfaceError::Backend("raster buffer has the wrong size".to_string()))
    }
}

impl DrawingSurface for PlottersFigure {
    fn select_panel(&mut self, slot: PanelSlot) -> Result<(), SurfaceError> {
        if !slot.is_valid() {
            return Err(SurfaceError::PanelOutOfRange {
                index: slot.index,
                rows: slot.rows,
                cols: slot.cols,
            });
        }

        if self.grid != (slot.rows, slot.cols) {
            self.grid = (slot.rows, slot.cols);
            self.panels = vec![Panel::default(); slot.rows * slot.cols];
        }
        self.active = Some(slot.index);
        Ok(())
    }

    fn plot_line(&mut self, xs: &[f64], ys: &[f64], style: &SeriesStyle) -> Result<(), SurfaceError> {
        self.push_series(SeriesKind::Line, xs, ys, style)
    }

    fn scatter(&mut self, xs: &[f64], ys: &[f64], style: &SeriesStyle) -> Result<(), SurfaceError> {
        self.push_series(SeriesKind::Markers, xs, ys, style)
    }

    fn set_x_label(&mut self, label: &str) -> Result<(), SurfaceError> {
        self.active_mut()?.x_label = Some(label.to_string());
        Ok(())
    }

    fn set_y_label(&mut self, label: &str) -> Result<(), SurfaceError> {
        self.active_mut()?.y_label = Some(label.to_string());
        Ok(())
    }

    fn set_x_range(&mut self, range: AxisRange) -> Result<(), SurfaceError> {
        let range = Self::check_range(range)?;
        self.active_mut()?.x_range = range;
        Ok(())
    }

    fn set_y_range(&mut self, range: AxisRange) -> Result<(), SurfaceError> {
        let range = Self::check_range(range)?;
        self.active_mut()?.y_range = range;
        Ok(())
    }

    fn show_legend(&mut self) -> Result<(), SurfaceError> {
        self.active_mut()?.legend = true;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), SurfaceError> {
        self.active_mut()?.title = title.to_string();
        Ok(())
    }
}

fn to_rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn backend_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> SurfaceError {
    SurfaceError::Backend(err.to_string())
}
