//! Phase Plot Renderer
//! Draws a simulated trajectory as two side-by-side panels.
//!
//! Layout:
//! 1. Left: position `x` and velocity `v` against time `t`
//! 2. Right: state-space trajectory `v` against `x`, with the first state marked

use crate::charts::surface::{DrawingSurface, PanelSlot, SeriesColor, SeriesStyle, SurfaceError};
use crate::config::PlotOptions;
use crate::data::{Trajectory, TrajectoryError};
use thiserror::Error;

/// Title of the phase-space panel, independent of the caller's title.
pub const STATE_SPACE_TITLE: &str = "State Space Plot";

/// Color of the phase-space trajectory and its start marker.
pub const PHASE_COLOR: SeriesColor = SeriesColor::BLACK;

pub const TIME_PANEL: PanelSlot = PanelSlot::new(1, 2, 0);
pub const PHASE_PANEL: PanelSlot = PanelSlot::new(1, 2, 1);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid trajectory: {0}")]
    Trajectory(#[from] TrajectoryError),
    #[error("Drawing failed: {0}")]
    Surface(#[from] SurfaceError),
}

pub struct PhasePlotRenderer;

impl PhasePlotRenderer {
    /// Draw the time-series and phase-space panels onto `surface`.
    pub fn render<S: DrawingSurface + ?Sized>(
        surface: &mut S,
        trajectory: &Trajectory<'_>,
        options: &PlotOptions,
    ) -> Result<(), RenderError> {
        log::debug!(
            "Rendering phase plot: {} samples, {} time axis",
            trajectory.len(),
            if trajectory.time_axis().is_index() {
                "index"
            } else {
                "explicit"
            }
        );

        Self::draw_time_series(surface, trajectory, options)?;
        Self::draw_state_space(surface, trajectory, options)?;
        Ok(())
    }

    fn draw_time_series<S: DrawingSurface + ?Sized>(
        surface: &mut S,
        trajectory: &Trajectory<'_>,
        options: &PlotOptions,
    ) -> Result<(), SurfaceError> {
        let t = trajectory.times();

        surface.select_panel(TIME_PANEL)?;
        surface.plot_line(&t, trajectory.position(), &SeriesStyle::labeled("x"))?;
        surface.plot_line(&t, trajectory.velocity(), &SeriesStyle::labeled("v"))?;
        surface.set_x_label("t")?;
        surface.set_x_range(options.time_panel.x)?;
        surface.set_y_range(options.time_panel.y)?;
        surface.show_legend()?;
        surface.set_title(&options.title)
    }

    fn draw_state_space<S: DrawingSurface + ?Sized>(
        surface: &mut S,
        trajectory: &Trajectory<'_>,
        options: &PlotOptions,
    ) -> Result<(), SurfaceError> {
        let (x0, v0) = trajectory.start();

        surface.select_panel(PHASE_PANEL)?;
        surface.plot_line(
            trajectory.position(),
            trajectory.velocity(),
            &SeriesStyle::default().with_color(PHASE_COLOR),
        )?;
        surface.scatter(
            &[x0],
            &[v0],
            &SeriesStyle::labeled("start").with_color(PHASE_COLOR),
        )?;
        surface.set_x_label("x")?;
        surface.set_y_label("v")?;
        surface.set_x_range(options.phase_panel.x)?;
        surface.set_y_range(options.phase_panel.y)?;
        surface.show_legend()?;
        surface.set_title(STATE_SPACE_TITLE)
    }
}

/// Validate raw series and render them; `t = None` plots against the sample index.
pub fn plot_xv<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    x: &[f64],
    v: &[f64],
    t: Option<&[f64]>,
    options: &PlotOptions,
) -> Result<(), RenderError> {
    let trajectory = Trajectory::from_parts(x, v, t)?;
    PhasePlotRenderer::render(surface, &trajectory, options)
}
