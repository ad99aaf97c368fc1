//! Trajectory Module
//! Position/velocity samples of a simulated system plus their time axis.

use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error("Trajectory has no samples")]
    Empty,
    #[error("Series '{series}' has {found} samples, expected {expected}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Time values shared by the position and velocity series.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TimeAxis<'a> {
    /// Sample index `0..N-1`, used when the caller has no time values.
    #[default]
    Index,
    Samples(&'a [f64]),
}

impl TimeAxis<'_> {
    pub fn is_index(&self) -> bool {
        matches!(self, TimeAxis::Index)
    }
}

/// Validated position (`x`) and velocity (`v`) series of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<'a> {
    x: &'a [f64],
    v: &'a [f64],
    t: TimeAxis<'a>,
}

impl<'a> Trajectory<'a> {
    /// Build a trajectory on the implicit index time axis.
    pub fn new(x: &'a [f64], v: &'a [f64]) -> Result<Self, TrajectoryError> {
        if x.is_empty() {
            return Err(TrajectoryError::Empty);
        }
        if v.len() != x.len() {
            return Err(TrajectoryError::LengthMismatch {
                series: "v",
                expected: x.len(),
                found: v.len(),
            });
        }

        Ok(Self {
            x,
            v,
            t: TimeAxis::Index,
        })
    }

    /// Attach explicit time values; must match the sample count.
    pub fn with_time(mut self, t: &'a [f64]) -> Result<Self, TrajectoryError> {
        if t.len() != self.x.len() {
            return Err(TrajectoryError::LengthMismatch {
                series: "t",
                expected: self.x.len(),
                found: t.len(),
            });
        }
        self.t = TimeAxis::Samples(t);
        Ok(self)
    }

    /// Build from optional time values, falling back to the index axis.
    pub fn from_parts(
        x: &'a [f64],
        v: &'a [f64],
        t: Option<&'a [f64]>,
    ) -> Result<Self, TrajectoryError> {
        let trajectory = Self::new(x, v)?;
        match t {
            Some(t) => trajectory.with_time(t),
            None => Ok(trajectory),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn position(&self) -> &'a [f64] {
        self.x
    }

    pub fn velocity(&self) -> &'a [f64] {
        self.v
    }

    pub fn time_axis(&self) -> &TimeAxis<'a> {
        &self.t
    }

    /// Time values, materializing the index axis when needed.
    pub fn times(&self) -> Cow<'a, [f64]> {
        match self.t {
            TimeAxis::Index => Cow::Owned((0..self.x.len()).map(|i| i as f64).collect()),
            TimeAxis::Samples(t) => Cow::Borrowed(t),
        }
    }

    /// First state `(x[0], v[0])`.
    pub fn start(&self) -> (f64, f64) {
        (self.x[0], self.v[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_axis_when_time_omitted() {
        let x = [0.0, 1.0, 2.0];
        let v = [0.0, -1.0, -2.0];
        let trajectory = Trajectory::new(&x, &v).unwrap();

        assert!(trajectory.time_axis().is_index());
        assert_eq!(trajectory.times().as_ref(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn explicit_time_is_borrowed() {
        let x = [1.0, 2.0];
        let v = [3.0, 4.0];
        let t = [0.5, 1.5];
        let trajectory = Trajectory::from_parts(&x, &v, Some(&t[..])).unwrap();

        assert!(matches!(trajectory.times(), Cow::Borrowed(_)));
        assert_eq!(trajectory.times().as_ref(), &t);
    }

    #[test]
    fn rejects_empty_series() {
        assert_eq!(Trajectory::new(&[], &[]), Err(TrajectoryError::Empty));
    }

    #[test]
    fn rejects_velocity_length_mismatch() {
        let err = Trajectory::new(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::LengthMismatch {
                series: "v",
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn rejects_time_length_mismatch() {
        let err = Trajectory::from_parts(&[1.0, 2.0], &[1.0, 2.0], Some(&[0.0][..])).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::LengthMismatch { series: "t", .. }
        ));
    }

    #[test]
    fn start_is_first_sample() {
        let x = [5.0, 6.0, 7.0];
        let v = [1.0, 2.0, 3.0];
        assert_eq!(Trajectory::new(&x, &v).unwrap().start(), (5.0, 1.0));
    }
}
