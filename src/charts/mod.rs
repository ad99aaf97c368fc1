//! Charts module - Panel surfaces and the phase plot renderer

mod figure;
mod renderer;
mod surface;

pub use figure::{Panel, PlottedSeries, PlottersFigure, SeriesKind, PALETTE};
pub use renderer::{
    plot_xv, PhasePlotRenderer, RenderError, PHASE_COLOR, PHASE_PANEL, STATE_SPACE_TITLE,
    TIME_PANEL,
};
pub use surface::{
    AxisRange, DrawingSurface, PanelSlot, SeriesColor, SeriesStyle, SurfaceError, AUTO_MARGIN,
};
