//! Data module - Simulated trajectories

mod trajectory;

pub use trajectory::{TimeAxis, Trajectory, TrajectoryError};
