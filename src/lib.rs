//! Phase Plot - time-series and phase-space views of a simulated system
//!
//! Renders position and velocity samples as two side-by-side panels onto an
//! explicit, caller-owned [`DrawingSurface`].

pub mod charts;
pub mod config;
pub mod data;

pub use charts::{
    plot_xv, AxisRange, DrawingSurface, PanelSlot, PhasePlotRenderer, PlottersFigure,
    RenderError, SeriesColor, SeriesStyle, SurfaceError,
};
pub use config::{load_config, ConfigError, FigureStyle, PanelLimits, PlotConfig, PlotOptions};
pub use data::{TimeAxis, Trajectory, TrajectoryError};
